use serde::{Deserialize, Serialize};

use crate::{Capability, Role};

/// Identity of an authenticated principal (WordPress user login, service
/// account name, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully resolved principal for authorization decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub principal_id: PrincipalId,
    pub roles: Vec<Role>,
    pub capabilities: Vec<Capability>,
}

impl Principal {
    /// Build a principal whose capabilities are the union of what its roles
    /// grant plus any explicitly granted ones.
    pub fn from_roles(principal_id: PrincipalId, roles: Vec<Role>, extra: Vec<Capability>) -> Self {
        let mut capabilities: Vec<Capability> = roles.iter().flat_map(Role::capabilities).collect();
        for cap in extra {
            if !capabilities.contains(&cap) {
                capabilities.push(cap);
            }
        }
        capabilities.dedup();
        Self {
            principal_id,
            roles,
            capabilities,
        }
    }
}
