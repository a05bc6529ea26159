use serde::{Deserialize, Serialize};

use geniki_vouchers::VoucherRecord;

/// Date range as submitted by the export form (or query string).
///
/// Fields are optional so that a missing date surfaces as a validation
/// error rather than an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl ExportRequest {
    pub fn start_date(&self) -> &str {
        self.start_date.as_deref().unwrap_or("")
    }

    pub fn end_date(&self) -> &str {
        self.end_date.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VoucherRecordDto {
    pub order_id: u64,
    pub voucher_number: String,
    pub voucher_date: String,
    pub order_amount: String,
}

impl From<&VoucherRecord> for VoucherRecordDto {
    fn from(record: &VoucherRecord) -> Self {
        Self {
            order_id: record.order_id.get(),
            voucher_number: record.voucher_number.as_str().to_string(),
            voucher_date: record.voucher_date.format("%Y-%m-%d %H:%M:%S").to_string(),
            order_amount: record.order_amount.normalize().to_string(),
        }
    }
}
