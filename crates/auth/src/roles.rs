use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::{Capability, MANAGE_WOOCOMMERCE};

/// WordPress role carried in a token (e.g. `"shop_manager"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Capabilities this role grants, as far as this service cares.
    ///
    /// Mirrors WooCommerce's defaults: administrators and shop managers may
    /// manage the shop; everyone else gets nothing here.
    pub fn capabilities(&self) -> Vec<Capability> {
        match self.as_str() {
            "administrator" | "shop_manager" => vec![MANAGE_WOOCOMMERCE],
            _ => Vec::new(),
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
