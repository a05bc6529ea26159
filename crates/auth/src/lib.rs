//! `geniki-auth`: authentication/authorization boundary for the export
//! surface.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod authorize;
pub mod capabilities;
pub mod claims;
pub mod principal;
pub mod roles;

pub use authorize::{AuthzError, authorize};
pub use capabilities::{Capability, MANAGE_WOOCOMMERCE};
pub use claims::{Hs256JwtValidator, JwtClaims, JwtValidator, TokenValidationError, validate_claims};
pub use principal::{Principal, PrincipalId};
pub use roles::Role;
