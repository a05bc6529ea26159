//! Configuration loading and representation.
//!
//! Everything comes from environment variables; see [`ExportConfig::from_env`].

use thiserror::Error;

use geniki_vouchers::{DEFAULT_NOTE_MARKER, FetchOptions};

pub const DEFAULT_TABLE_PREFIX: &str = "wp_";
pub const DEFAULT_MAX_NOTES: usize = 50_000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where WooCommerce keeps its orders.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OrderStorage {
    /// Legacy `posts` + `postmeta` tables.
    #[default]
    Posts,
    /// High-performance order storage (`wc_orders`).
    Hpos,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// MySQL connection URL of the WordPress database.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub table_prefix: String,
    pub order_storage: OrderStorage,
    pub note_marker: String,
    pub max_notes: usize,
    pub bind_addr: String,
    pub jwt_secret: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            table_prefix: DEFAULT_TABLE_PREFIX.to_string(),
            order_storage: OrderStorage::default(),
            note_marker: DEFAULT_NOTE_MARKER.to_string(),
            max_notes: DEFAULT_MAX_NOTES,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            jwt_secret: None,
        }
    }
}

impl ExportConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (unset or blank keys use defaults).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        config.database_url = get("GENIKI_DATABASE_URL");
        config.jwt_secret = get("JWT_SECRET");

        if let Some(prefix) = get("GENIKI_TABLE_PREFIX") {
            config.table_prefix = prefix;
        }
        validate_table_prefix(&config.table_prefix)?;

        if let Some(storage) = get("GENIKI_ORDER_STORAGE") {
            config.order_storage = match storage.to_ascii_lowercase().as_str() {
                "posts" | "legacy" => OrderStorage::Posts,
                "hpos" => OrderStorage::Hpos,
                other => {
                    return Err(ConfigError::invalid(
                        "GENIKI_ORDER_STORAGE",
                        format!("expected 'posts' or 'hpos', got '{other}'"),
                    ));
                }
            };
        }

        if let Some(marker) = get("GENIKI_NOTE_MARKER") {
            config.note_marker = marker;
        }

        if let Some(max) = get("GENIKI_MAX_NOTES") {
            config.max_notes = max
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::invalid("GENIKI_MAX_NOTES", "must be a positive integer"))?;
        }

        if let Some(max) = get("GENIKI_MAX_CONNECTIONS") {
            config.max_connections = max
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    ConfigError::invalid("GENIKI_MAX_CONNECTIONS", "must be a positive integer")
                })?;
        }

        if let Some(addr) = get("GENIKI_BIND_ADDR") {
            config.bind_addr = addr;
        }

        Ok(config)
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            marker: self.note_marker.clone(),
            limit: Some(self.max_notes),
        }
    }
}

/// The prefix is interpolated into SQL, so only identifier characters pass.
pub fn validate_table_prefix(prefix: &str) -> Result<(), ConfigError> {
    if prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            "GENIKI_TABLE_PREFIX",
            "only ASCII letters, digits and '_' are allowed",
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ExportConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ExportConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ExportConfig::default());
        assert_eq!(config.table_prefix, "wp_");
        assert_eq!(config.note_marker, "Geniki");
        assert_eq!(config.order_storage, OrderStorage::Posts);
        assert_eq!(config.fetch_options().limit, Some(DEFAULT_MAX_NOTES));
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[
            ("GENIKI_DATABASE_URL", "mysql://wp:wp@localhost/wp"),
            ("GENIKI_TABLE_PREFIX", "shop2_"),
            ("GENIKI_ORDER_STORAGE", "HPOS"),
            ("GENIKI_MAX_NOTES", "10"),
            ("GENIKI_BIND_ADDR", "127.0.0.1:9000"),
            ("JWT_SECRET", "s3cret"),
        ])
        .unwrap();

        assert_eq!(config.database_url.as_deref(), Some("mysql://wp:wp@localhost/wp"));
        assert_eq!(config.table_prefix, "shop2_");
        assert_eq!(config.order_storage, OrderStorage::Hpos);
        assert_eq!(config.max_notes, 10);
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.jwt_secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[("GENIKI_TABLE_PREFIX", "  "), ("JWT_SECRET", "")]).unwrap();
        assert_eq!(config.table_prefix, "wp_");
        assert_eq!(config.jwt_secret, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(load(&[("GENIKI_TABLE_PREFIX", "wp_; DROP TABLE x")]).is_err());
        assert!(load(&[("GENIKI_ORDER_STORAGE", "sqlite")]).is_err());
        assert!(load(&[("GENIKI_MAX_NOTES", "0")]).is_err());
        assert!(load(&[("GENIKI_MAX_NOTES", "many")]).is_err());
    }
}
