//! Export service: fetch -> reconcile -> emit, with injected stores.

use thiserror::Error;

use geniki_report::{ExportFile, ReportError, emit};
use geniki_vouchers::{
    ExportRange, FetchOptions, NoteStore, NoteStoreError, OrderService, VoucherRecord,
    fetch_notes, reconcile,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error(transparent)]
    Notes(#[from] NoteStoreError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

impl ExportError {
    pub fn is_empty_export(&self) -> bool {
        matches!(self, ExportError::Report(ReportError::EmptyExport))
    }
}

/// One export pipeline over a note store and an order service.
///
/// Holds no per-run state; every call to [`Self::export`] is independent.
#[derive(Debug)]
pub struct VoucherExportService<N, O> {
    notes: N,
    orders: O,
    options: FetchOptions,
}

impl<N, O> VoucherExportService<N, O>
where
    N: NoteStore,
    O: OrderService,
{
    pub fn new(notes: N, orders: O, options: FetchOptions) -> Self {
        Self {
            notes,
            orders,
            options,
        }
    }

    /// Fetch and reconcile without rendering.
    pub async fn records(&self, range: &ExportRange) -> Result<Vec<VoucherRecord>, ExportError> {
        let notes = fetch_notes(&self.notes, range, &self.options).await?;
        let records = reconcile(&notes, &self.orders).await;

        tracing::info!(
            start = %range.start(),
            end = %range.end(),
            notes = notes.len(),
            records = records.len(),
            "voucher records reconciled"
        );

        Ok(records)
    }

    /// Run the full export and return the spreadsheet.
    ///
    /// Fails with [`ReportError::EmptyExport`] when nothing qualifies.
    pub async fn export(&self, range: &ExportRange) -> Result<ExportFile, ExportError> {
        let records = self.records(range).await?;
        if records.is_empty() {
            tracing::info!(start = %range.start(), end = %range.end(), "no vouchers in range");
        }
        Ok(emit(&records)?)
    }
}
