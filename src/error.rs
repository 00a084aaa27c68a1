use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::services::import::ImportError;
use crate::services::reconcile::ReconcileError;

/// API-level error, rendered as a JSON `{"error": msg}` body. Duplicate-key
/// conflicts never reach this type; the store swallows them and reports them
/// as skipped counts.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("scraping backend is not configured; set JOBSPY_API_URL")]
    ProviderUnavailable,

    #[error("scraping failed: {0}")]
    Provider(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("import failed: {0}")]
    Import(String),
}

impl From<ReconcileError> for ApiError {
    fn from(err: ReconcileError) -> Self {
        match err {
            ReconcileError::Provider(e) => ApiError::Provider(e.to_string()),
            ReconcileError::Database(e) => ApiError::Database(e),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::NotFound(path) => ApiError::NotFound(format!("CSV file not found: {path}")),
            ImportError::Database(e) => ApiError::Database(e),
            other => ApiError::Import(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::ProviderUnavailable
            | ApiError::Provider(_)
            | ApiError::Database(_)
            | ApiError::Import(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
