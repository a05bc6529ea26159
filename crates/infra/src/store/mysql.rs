//! MySQL adapters over a WordPress/WooCommerce database.
//!
//! Notes live in `{prefix}comments` (`comment_type = 'order_note'`). Orders
//! live either in `{prefix}posts` + `{prefix}postmeta` or, with HPOS enabled,
//! in `{prefix}wc_orders`.

use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;

use geniki_core::OrderId;
use geniki_vouchers::{
    NoteQuery, NoteStore, NoteStoreError, Order, OrderLookupError, OrderNote, OrderService,
    SortOrder,
};

use crate::config::{ConfigError, ExportConfig, OrderStorage, validate_table_prefix};

/// Open a pool for the configured database.
pub async fn connect(config: &ExportConfig) -> Result<MySqlPool, sqlx::Error> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| sqlx::Error::Configuration("GENIKI_DATABASE_URL is not set".into()))?;

    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await
}

/// Escape `%`, `_` and `\` for a `LIKE` pattern using the default `\` escape.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn note_query_sql(prefix: &str, order: SortOrder, limited: bool) -> String {
    let direction = match order {
        SortOrder::Ascending => "ASC",
        SortOrder::Descending => "DESC",
    };
    // CAST(... AS BINARY) forces a case-sensitive LIKE regardless of collation.
    let mut sql = format!(
        r#"
        SELECT comment_post_ID AS order_id,
               comment_date    AS note_date,
               comment_content AS note_text
        FROM {prefix}comments
        WHERE comment_type = ?
          AND comment_content LIKE CAST(? AS BINARY)
          AND comment_date >= ?
          AND comment_date <= ?
        ORDER BY comment_date {direction}, comment_ID {direction}
        "#
    );
    if limited {
        sql.push_str("LIMIT ?");
    }
    sql
}

fn map_sqlx_error(operation: &str, e: sqlx::Error) -> String {
    tracing::error!(operation, error = %e, "mysql query failed");
    format!("{operation}: {e}")
}

/// WordPress comment table as a [`NoteStore`].
#[derive(Debug, Clone)]
pub struct MySqlNoteStore {
    pool: MySqlPool,
    table_prefix: String,
}

impl MySqlNoteStore {
    pub fn new(pool: MySqlPool, table_prefix: impl Into<String>) -> Result<Self, ConfigError> {
        let table_prefix = table_prefix.into();
        validate_table_prefix(&table_prefix)?;
        Ok(Self { pool, table_prefix })
    }
}

fn row_to_note(row: &MySqlRow) -> Result<OrderNote, sqlx::Error> {
    let order_id: u64 = row.try_get("order_id")?;
    let note_date: NaiveDateTime = row.try_get("note_date")?;
    let text: String = row.try_get("note_text")?;
    Ok(OrderNote::new(OrderId::new(order_id), note_date, text))
}

#[async_trait::async_trait]
impl NoteStore for MySqlNoteStore {
    async fn query_notes(&self, query: &NoteQuery) -> Result<Vec<OrderNote>, NoteStoreError> {
        let sql = note_query_sql(&self.table_prefix, query.order, query.limit.is_some());
        let pattern = format!("%{}%", escape_like(&query.text_contains));

        let mut q = sqlx::query(&sql)
            .bind(query.kind.as_str())
            .bind(pattern)
            .bind(query.from)
            .bind(query.to);
        if let Some(limit) = query.limit {
            q = q.bind(limit as u64);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| NoteStoreError::Storage(map_sqlx_error("query_notes", e)))?;

        rows.iter()
            .map(row_to_note)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| NoteStoreError::Storage(map_sqlx_error("decode_note", e)))
    }
}

/// WooCommerce orders as an [`OrderService`].
#[derive(Debug, Clone)]
pub struct MySqlOrderService {
    pool: MySqlPool,
    table_prefix: String,
    storage: OrderStorage,
}

impl MySqlOrderService {
    pub fn new(
        pool: MySqlPool,
        table_prefix: impl Into<String>,
        storage: OrderStorage,
    ) -> Result<Self, ConfigError> {
        let table_prefix = table_prefix.into();
        validate_table_prefix(&table_prefix)?;
        Ok(Self {
            pool,
            table_prefix,
            storage,
        })
    }

    fn order_sql(&self) -> String {
        let prefix = &self.table_prefix;
        match self.storage {
            OrderStorage::Posts => format!(
                r#"
                SELECT p.ID AS order_id,
                       MAX(CASE WHEN pm.meta_key = '_payment_method' THEN pm.meta_value END) AS payment_method,
                       MAX(CASE WHEN pm.meta_key = '_order_total' THEN pm.meta_value END) AS order_total
                FROM {prefix}posts p
                LEFT JOIN {prefix}postmeta pm
                       ON pm.post_id = p.ID
                      AND pm.meta_key IN ('_payment_method', '_order_total')
                WHERE p.ID = ?
                  AND p.post_type = 'shop_order'
                GROUP BY p.ID
                "#
            ),
            OrderStorage::Hpos => format!(
                r#"
                SELECT id AS order_id,
                       payment_method,
                       CAST(total_amount AS CHAR) AS order_total
                FROM {prefix}wc_orders
                WHERE id = ?
                  AND type = 'shop_order'
                "#
            ),
        }
    }
}

/// WooCommerce treats a missing or blank total as zero.
fn parse_total(raw: Option<&str>) -> Result<Decimal, rust_decimal::Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Decimal::ZERO),
        Some(s) => Decimal::from_str(s),
    }
}

#[async_trait::async_trait]
impl OrderService for MySqlOrderService {
    async fn get_order(&self, id: OrderId) -> Result<Order, OrderLookupError> {
        let sql = self.order_sql();
        let row = sqlx::query(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| OrderLookupError::Storage(map_sqlx_error("get_order", e)))?
            .ok_or(OrderLookupError::NotFound(id))?;

        let payment_method: Option<String> = row
            .try_get("payment_method")
            .map_err(|e| OrderLookupError::Storage(map_sqlx_error("decode_order", e)))?;
        let total_raw: Option<String> = row
            .try_get("order_total")
            .map_err(|e| OrderLookupError::Storage(map_sqlx_error("decode_order", e)))?;
        let total = parse_total(total_raw.as_deref()).map_err(|e| {
            OrderLookupError::Storage(format!("order {id} has an unparseable total: {e}"))
        })?;

        Ok(Order::new(id, payment_method.unwrap_or_default(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(escape_like("Geniki"), "Geniki");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn note_sql_uses_prefix_order_and_optional_limit() {
        let sql = note_query_sql("shop_", SortOrder::Ascending, true);
        assert!(sql.contains("FROM shop_comments"));
        assert!(sql.contains("ORDER BY comment_date ASC, comment_ID ASC"));
        assert!(sql.trim_end().ends_with("LIMIT ?"));

        let sql = note_query_sql("wp_", SortOrder::Descending, false);
        assert!(sql.contains("ORDER BY comment_date DESC"));
        assert!(!sql.contains("LIMIT"));
    }

    #[test]
    fn totals_parse_like_woocommerce() {
        assert_eq!(parse_total(None).unwrap(), Decimal::ZERO);
        assert_eq!(parse_total(Some(" ")).unwrap(), Decimal::ZERO);
        assert_eq!(parse_total(Some("25.50")).unwrap(), Decimal::new(2550, 2));
        assert!(parse_total(Some("abc")).is_err());
    }
}
