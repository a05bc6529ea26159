use std::sync::Arc;

use anyhow::Context;

use geniki_infra::store::mysql::connect;
use geniki_infra::store::{MySqlNoteStore, MySqlOrderService};
use geniki_infra::{ExportConfig, VoucherExportService};
use geniki_vouchers::{FetchOptions, NoteStore, OrderService};

pub type DynExportService = VoucherExportService<Arc<dyn NoteStore>, Arc<dyn OrderService>>;

/// Everything request handlers need, shared behind an `Arc`.
pub struct AppServices {
    pub exports: DynExportService,
}

impl AppServices {
    pub fn new(
        notes: Arc<dyn NoteStore>,
        orders: Arc<dyn OrderService>,
        options: FetchOptions,
    ) -> Self {
        Self {
            exports: VoucherExportService::new(notes, orders, options),
        }
    }

    /// Wire the MySQL adapters against the WordPress database in `config`.
    pub async fn from_config(config: &ExportConfig) -> anyhow::Result<Self> {
        if config.database_url.is_none() {
            anyhow::bail!("GENIKI_DATABASE_URL must be set");
        }

        let pool = connect(config)
            .await
            .context("failed to connect to the WordPress database")?;

        let notes = MySqlNoteStore::new(pool.clone(), config.table_prefix.clone())?;
        let orders = MySqlOrderService::new(pool, config.table_prefix.clone(), config.order_storage)?;

        tracing::info!(
            table_prefix = %config.table_prefix,
            order_storage = ?config.order_storage,
            max_notes = config.max_notes,
            "export services wired"
        );

        Ok(Self::new(Arc::new(notes), Arc::new(orders), config.fetch_options()))
    }
}
