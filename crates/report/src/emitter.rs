use thiserror::Error;

use geniki_vouchers::VoucherRecord;

use crate::xlsx::{Cell, SheetBuilder};

pub const EXPORT_FILE_NAME: &str = "voucher_export.xlsx";
pub const EXPORT_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const HEADER: [&str; 4] = ["Order ID", "Voucher Number", "Voucher Date", "Order Amount"];

const SHEET_NAME: &str = "Vouchers";
const VOUCHER_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Nothing to export; no file is generated.
    #[error("No vouchers found in selected date range")]
    EmptyExport,

    #[error("failed to build spreadsheet package: {0}")]
    Package(String),
}

impl From<zip::result::ZipError> for ReportError {
    fn from(value: zip::result::ZipError) -> Self {
        Self::Package(value.to_string())
    }
}

/// A generated download: bytes plus the metadata needed to serve them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Render voucher records as a spreadsheet.
///
/// Row 1 is a bold header; each record follows on its own row with the
/// voucher date truncated to `YYYY-MM-DD`.
pub fn emit(records: &[VoucherRecord]) -> Result<ExportFile, ReportError> {
    if records.is_empty() {
        return Err(ReportError::EmptyExport);
    }

    let mut sheet = SheetBuilder::new(SHEET_NAME);
    sheet.bold_row(HEADER.iter().map(|h| Cell::Text(h.to_string())).collect());

    for record in records {
        sheet.row(vec![
            Cell::Number(record.order_id.to_string()),
            Cell::Text(record.voucher_number.to_string()),
            Cell::Text(record.voucher_date.format(VOUCHER_DATE_FORMAT).to_string()),
            Cell::Number(record.order_amount.normalize().to_string()),
        ]);
    }

    let bytes = sheet.finish()?;
    tracing::info!(rows = records.len(), size = bytes.len(), "voucher spreadsheet generated");

    Ok(ExportFile {
        file_name: EXPORT_FILE_NAME,
        content_type: EXPORT_CONTENT_TYPE,
        bytes,
    })
}
