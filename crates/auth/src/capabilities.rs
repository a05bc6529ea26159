use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Capability required to run voucher exports (WordPress shop managers and
/// administrators hold it).
pub const MANAGE_WOOCOMMERCE: Capability = Capability(Cow::Borrowed("manage_woocommerce"));

/// Capability identifier.
///
/// Modeled after WordPress capabilities: opaque strings such as
/// `"manage_woocommerce"`. The wildcard `"*"` grants everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(Cow<'static, str>);

impl Capability {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
