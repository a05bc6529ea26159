use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Extension, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};

use geniki_vouchers::ExportRange;

use crate::app::dto::{ExportRequest, VoucherRecordDto};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;
use crate::middleware;

/// Shop-management routes; callers need `manage_woocommerce`.
pub fn router() -> Router {
    Router::new()
        .route("/", get(list_vouchers))
        .route("/export", axum::routing::post(export_vouchers))
        .route_layer(axum::middleware::from_fn(middleware::require_manage_woocommerce))
}

/// Admin page. Served without a token: it holds no data, and the browser
/// sends the bearer token itself when it posts the range.
const EXPORT_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Export Vouchers</title></head>
<body>
<h1>Export Vouchers</h1>
<form id="export-form" method="post" action="/vouchers/export">
  <label for="token">Access Token:</label>
  <input type="password" id="token" name="token" autocomplete="off" required>
  <label for="start_date">Start Date:</label>
  <input type="date" id="start_date" name="start_date" required>
  <label for="end_date">End Date:</label>
  <input type="date" id="end_date" name="end_date" required>
  <button type="submit">Export</button>
</form>
<p id="status" role="alert"></p>
<script>
const form = document.getElementById('export-form');
const status = document.getElementById('status');
form.token.value = sessionStorage.getItem('geniki_token') || '';

form.addEventListener('submit', async (event) => {
  event.preventDefault();
  status.textContent = '';
  const token = form.token.value.trim();
  sessionStorage.setItem('geniki_token', token);

  const response = await fetch(form.action, {
    method: 'POST',
    headers: { 'Authorization': 'Bearer ' + token },
    body: new URLSearchParams({
      start_date: form.start_date.value,
      end_date: form.end_date.value,
    }),
  });

  if (!response.ok) {
    let message = response.status + ' ' + response.statusText;
    try {
      message = (await response.json()).message || message;
    } catch (_) {}
    status.textContent = message;
    return;
  }

  const blob = await response.blob();
  const url = URL.createObjectURL(blob);
  const link = document.createElement('a');
  link.href = url;
  link.download = 'voucher_export.xlsx';
  document.body.appendChild(link);
  link.click();
  link.remove();
  URL.revokeObjectURL(url);
});
</script>
</body>
</html>
"#;

fn parse_range(req: &ExportRequest) -> Result<ExportRange, Response> {
    ExportRange::parse(req.start_date(), req.end_date()).map_err(errors::domain_error_to_response)
}

pub async fn export_page() -> Html<&'static str> {
    Html(EXPORT_PAGE)
}

pub async fn export_vouchers(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Form(body): Form<ExportRequest>,
) -> Response {
    let range = match parse_range(&body) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    let file = match services.exports.export(&range).await {
        Ok(f) => f,
        Err(e) => return errors::export_error_to_response(e),
    };

    tracing::info!(
        principal = %principal.principal_id(),
        start = %range.start(),
        end = %range.end(),
        bytes = file.bytes.len(),
        "voucher export served"
    );

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
            (header::CACHE_CONTROL, "max-age=0".to_string()),
        ],
        file.bytes,
    )
        .into_response()
}

/// JSON preview of what an export over the same range would contain.
pub async fn list_vouchers(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<ExportRequest>,
) -> Response {
    let range = match parse_range(&query) {
        Ok(r) => r,
        Err(resp) => return resp,
    };

    match services.exports.records(&range).await {
        Ok(records) => Json(serde_json::json!({
            "start": range.start().to_string(),
            "end": range.end().to_string(),
            "records": records.iter().map(VoucherRecordDto::from).collect::<Vec<_>>(),
        }))
        .into_response(),
        Err(e) => errors::export_error_to_response(e),
    }
}
