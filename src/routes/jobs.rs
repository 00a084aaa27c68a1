use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::app_state::AppState;
use crate::db::queries;
use crate::error::ApiError;
use crate::models::job::{JobFilter, JobRecord, JobUpdate};
use crate::models::scrape::StatsResponse;

#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobRecord>,
    pub total: usize,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// GET /api/jobs — list jobs with optional status/checked/search filters.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<JobListResponse>, ApiError> {
    let jobs = queries::list_jobs(&state.db, &filter).await?;
    let total = jobs.len();
    Ok(Json(JobListResponse { jobs, total }))
}

/// PATCH /api/jobs/{id} — update checked state, status, or notes.
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<JobUpdate>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if update.is_empty() {
        return Err(ApiError::Validation("No updates provided".to_string()));
    }

    let found = queries::update_job(&state.db, id, &update).await?;
    if !found {
        return Err(ApiError::NotFound("Job not found".to_string()));
    }

    Ok(Json(SuccessResponse { success: true }))
}

/// DELETE /api/jobs/{id} — remove a single job.
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, ApiError> {
    let found = queries::delete_job(&state.db, id).await?;
    if !found {
        return Err(ApiError::NotFound("Job not found".to_string()));
    }

    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/stats — aggregate counts over the whole store.
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    let total = queries::count_total(&state.db).await?;
    let checked = queries::count_checked(&state.db).await?;
    let by_status = queries::count_by_status(&state.db).await?;
    let by_site = queries::count_by_site(&state.db).await?;

    Ok(Json(StatsResponse {
        total,
        by_status,
        checked,
        unchecked: total - checked,
        by_site,
    }))
}
