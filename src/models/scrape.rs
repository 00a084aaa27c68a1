use garde::Validate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request to run the scraper and refresh the unreviewed pool.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ScrapeRequest {
    #[garde(length(min = 1, max = 500))]
    pub search_query: Option<String>,

    #[garde(length(min = 1, max = 200))]
    pub location: Option<String>,

    #[garde(range(min = 1, max = 1000))]
    pub results_wanted: Option<u32>,

    #[garde(range(min = 1, max = 720))]
    pub hours_old: Option<u32>,

    /// Comma-separated title keywords to exclude instead of the defaults.
    #[garde(length(min = 1, max = 500))]
    pub exclude_keywords: Option<String>,
}

/// Response after a reconciliation run.
#[derive(Debug, Serialize)]
pub struct ScrapeOutcome {
    pub message: String,
    pub added: u64,
    pub skipped: u64,
    pub deleted: u64,
    pub total_found: u64,
}

/// Response for `GET /api/stats`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total: i64,
    pub by_status: HashMap<String, i64>,
    pub checked: i64,
    pub unchecked: i64,
    pub by_site: HashMap<String, i64>,
}

/// One failed row in a batch insert (scrape merge or CSV import).
#[derive(Debug)]
pub struct RowFailure {
    pub job_url: String,
    pub reason: String,
}

/// Accumulated outcome of a batch of per-record inserts. Row failures are
/// recorded here and counted as skipped; they never abort the batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub added: u64,
    pub skipped: u64,
    pub failures: Vec<RowFailure>,
}

impl BatchReport {
    pub fn record_added(&mut self) {
        self.added += 1;
    }

    pub fn record_duplicate(&mut self) {
        self.skipped += 1;
    }

    pub fn record_failure(&mut self, job_url: &str, reason: impl ToString) {
        self.skipped += 1;
        self.failures.push(RowFailure {
            job_url: job_url.to_string(),
            reason: reason.to_string(),
        });
    }
}
