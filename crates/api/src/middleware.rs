use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use geniki_auth::{JwtValidator, MANAGE_WOOCOMMERCE, authorize};

use crate::app::errors;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?;

    let claims = state.jwt.validate(token, Utc::now()).map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        StatusCode::UNAUTHORIZED
    })?;

    req.extensions_mut().insert(PrincipalContext::new(
        claims.sub,
        claims.roles,
        claims.capabilities,
    ));

    Ok(next.run(req).await)
}

/// Route layer for shop-management endpoints.
///
/// Runs after [`auth_middleware`] and before any body extractor, so a caller
/// without `manage_woocommerce` gets 403 whatever it sent.
pub async fn require_manage_woocommerce(
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(principal) = req.extensions().get::<PrincipalContext>() else {
        return errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "missing principal");
    };

    if let Err(e) = authorize(principal.principal(), &MANAGE_WOOCOMMERCE) {
        tracing::info!(principal = %principal.principal_id(), "shop management denied");
        return errors::authz_error_to_response(e);
    }

    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?
        .trim();

    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}
