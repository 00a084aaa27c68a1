use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Status assigned to freshly inserted listings. Records with any other
/// status are user-curated and protected from the reconciler's bulk deletion.
pub const STATUS_NEW: &str = "new";

/// Status that drives the `applied_at` side effect.
pub const STATUS_APPLIED: &str = "applied";

/// A stored job listing, one row per unique `job_url`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JobRecord {
    pub id: i64,
    pub site: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub date_posted: Option<NaiveDate>,
    pub job_url: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub salary_source: String,
    pub is_remote: bool,
    pub checked: bool,
    pub status: String,
    pub notes: String,
    pub applied_at: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

/// A listing about to be inserted (scrape or CSV import). Store-assigned
/// fields (id, checked, status, notes, applied_at, created_at) take their
/// schema defaults.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub site: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub date_posted: Option<NaiveDate>,
    pub job_url: String,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub salary_source: String,
    pub is_remote: bool,
}

/// Filters for listing jobs. All fields optional; `status == "all"` is a
/// sentinel for "no status filter".
#[derive(Debug, Default, Deserialize)]
pub struct JobFilter {
    pub status: Option<String>,
    pub checked: Option<bool>,
    pub search: Option<String>,
}

/// Partial update for a stored job. An all-`None` payload is rejected at the
/// route boundary before any SQL is built.
#[derive(Debug, Default, Deserialize)]
pub struct JobUpdate {
    pub checked: Option<bool>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl JobUpdate {
    pub fn is_empty(&self) -> bool {
        self.checked.is_none() && self.status.is_none() && self.notes.is_none()
    }
}
