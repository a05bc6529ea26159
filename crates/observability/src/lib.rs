//! Tracing/logging setup shared by the export service binaries.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize process-wide logging.
///
/// Output format comes from `GENIKI_LOG_FORMAT` (`json` by default, or
/// `pretty`); filtering from `RUST_LOG`. Safe to call multiple times;
/// subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}
