//! Spreadsheet output for voucher exports.

pub mod emitter;
pub mod xlsx;

pub use emitter::{
    EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME, ExportFile, HEADER, ReportError, emit,
};
pub use xlsx::{Cell, SheetBuilder};
