//! Infrastructure layer: configuration, storage adapters, export wiring.

pub mod config;
pub mod export;
pub mod store;

pub use config::{ConfigError, ExportConfig, OrderStorage};
pub use export::{ExportError, VoucherExportService};
