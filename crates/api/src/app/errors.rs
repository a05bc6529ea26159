use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use geniki_auth::AuthzError;
use geniki_core::DomainError;
use geniki_infra::ExportError;
use geniki_report::ReportError;
use geniki_vouchers::NoteStoreError;

pub fn export_error_to_response(err: ExportError) -> axum::response::Response {
    match err {
        ExportError::Report(ReportError::EmptyExport) => json_error(
            StatusCode::NOT_FOUND,
            "empty_export",
            ReportError::EmptyExport.to_string(),
        ),
        ExportError::Report(ReportError::Package(msg)) => {
            tracing::error!(error = %msg, "failed to package export");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "report_error", msg)
        }
        ExportError::Notes(e @ NoteStoreError::TooManyNotes { .. }) => {
            tracing::warn!(error = %e, "export refused: row cap exceeded");
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "too_many_notes", e.to_string())
        }
        ExportError::Notes(e @ NoteStoreError::Storage(_)) => {
            tracing::error!(error = %e, "note store failed during export");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
    }
}

pub fn authz_error_to_response(err: AuthzError) -> axum::response::Response {
    json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
