use axum::{Router, routing::get};

pub mod system;
pub mod vouchers;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/vouchers", vouchers::router())
}
