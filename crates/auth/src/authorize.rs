use thiserror::Error;

use crate::{Capability, Principal};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing capability '{0}'")]
    Forbidden(String),
}

/// Check that `principal` holds `required`.
///
/// - No IO
/// - No panics
pub fn authorize(principal: &Principal, required: &Capability) -> Result<(), AuthzError> {
    let granted = principal
        .capabilities
        .iter()
        .any(|c| c.is_wildcard() || c == required);

    if granted {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}
