use axum::extract::State;
use axum::Json;
use garde::Validate;
use serde::Serialize;

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::models::scrape::{ScrapeOutcome, ScrapeRequest};
use crate::services::{import, reconcile};

/// POST /api/scrape — run the scraper and refresh the unreviewed pool.
pub async fn scrape_jobs(
    State(state): State<AppState>,
    Json(request): Json<ScrapeRequest>,
) -> Result<Json<ScrapeOutcome>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let provider = state
        .provider
        .clone()
        .ok_or(ApiError::ProviderUnavailable)?;

    let outcome = reconcile::reconcile(&state.db, provider.as_ref(), &request).await?;
    Ok(Json(outcome))
}

#[derive(Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub added: u64,
    pub skipped: u64,
}

/// POST /api/import-csv — one-shot import from the configured CSV file.
pub async fn import_csv(State(state): State<AppState>) -> Result<Json<ImportResponse>, ApiError> {
    let report = import::import_csv(&state.db, &state.csv_import_path).await?;

    Ok(Json(ImportResponse {
        message: format!("Imported {} jobs from CSV", report.added),
        added: report.added,
        skipped: report.skipped,
    }))
}
