//! Scrape Reconciliation
//!
//! Refreshes the unreviewed pool from the external provider: filter and sort
//! the scraped batch, wipe every stored record still marked 'new', then
//! insert the survivors. Records the user has acted on (any status other
//! than 'new') are snapshotted up front and never touched.
//!
//! The delete-then-insert sequence is not wrapped in a transaction; a crash
//! between the two phases leaves the pool empty until the next successful
//! run. Known gap, accepted for this workload.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::collections::HashSet;
use tracing::{info, warn};

use crate::db::queries;
use crate::models::job::NewJob;
use crate::models::scrape::{BatchReport, ScrapeOutcome, ScrapeRequest};
use crate::services::provider::{JobSearchProvider, ProviderError, ScrapedJob, SearchParams};

/// Marketplaces queried on every run.
const TARGET_SITES: [&str; 4] = ["indeed", "linkedin", "zip_recruiter", "glassdoor"];

/// Search query used when the caller does not supply one.
const DEFAULT_SEARCH_QUERY: &str = "\"software engineer\" OR \"software developer\" OR \"qa engineer\" OR \
     \"quality assurance engineer\" OR \"test engineer\" OR \"software test engineer\" OR \
     \"Software Development Engineer\"";

/// Title keywords excluded when the caller does not supply a list.
const DEFAULT_EXCLUDE_KEYWORDS: [&str; 10] = [
    "senior",
    "sr.",
    "sr",
    "lead",
    "principal",
    "staff",
    "manager",
    "architect",
    "head",
    "director",
];

const DEFAULT_LOCATION: &str = "USA";
const DEFAULT_RESULTS_WANTED: u32 = 100;
const DEFAULT_HOURS_OLD: u32 = 72;

/// Error type for a reconciliation run.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("scraping failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("database error during reconciliation: {0}")]
    Database(#[from] sqlx::Error),
}

/// Run one scrape-and-merge cycle.
///
/// A provider failure aborts before any mutation; the store is left exactly
/// as it was. Per-record insert failures are counted as skipped and logged,
/// without aborting the rest of the batch.
pub async fn reconcile(
    pool: &SqlitePool,
    provider: &dyn JobSearchProvider,
    request: &ScrapeRequest,
) -> Result<ScrapeOutcome, ReconcileError> {
    let search_term = request
        .search_query
        .clone()
        .unwrap_or_else(|| DEFAULT_SEARCH_QUERY.to_string());
    let results_wanted = request.results_wanted.unwrap_or(DEFAULT_RESULTS_WANTED);

    let params = SearchParams {
        site_name: TARGET_SITES.iter().map(|s| s.to_string()).collect(),
        search_term,
        location: request
            .location
            .clone()
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        results_wanted,
        hours_old: request.hours_old.unwrap_or(DEFAULT_HOURS_OLD),
        country_indeed: "USA".to_string(),
    };

    let scraped = provider.search(&params).await?;

    if scraped.is_empty() {
        return Ok(ScrapeOutcome {
            message: "No jobs found".to_string(),
            added: 0,
            skipped: 0,
            deleted: 0,
            total_found: 0,
        });
    }

    let keywords = resolve_exclude_keywords(request.exclude_keywords.as_deref());
    let filtered: Vec<ScrapedJob> = scraped
        .into_iter()
        .filter(|job| !title_excluded(&job.title, &keywords))
        .collect();

    let mut batch = sort_and_truncate(filtered, results_wanted as usize);

    // Snapshot curated URLs before the wipe; anything the user acted on must
    // survive this run untouched.
    let curated: HashSet<String> = queries::curated_urls(pool).await?.into_iter().collect();

    let deleted = queries::delete_new_jobs(pool).await?;

    batch.retain(|job| !curated.contains(&job.job_url));
    let total_found = batch.len() as u64;

    let mut report = BatchReport::default();
    for job in &batch {
        match queries::insert_job_ignore_duplicate(pool, &to_new_job(job)).await {
            Ok(true) => report.record_added(),
            Ok(false) => report.record_duplicate(),
            Err(e) => report.record_failure(&job.job_url, &e),
        }
    }

    for failure in &report.failures {
        warn!(job_url = %failure.job_url, reason = %failure.reason, "job insert failed");
    }

    info!(
        added = report.added,
        skipped = report.skipped,
        deleted,
        total_found,
        "reconciliation complete"
    );

    metrics::counter!("scrape_runs_total").increment(1);
    metrics::counter!("jobs_added_total").increment(report.added);
    metrics::counter!("jobs_deleted_total").increment(deleted);

    Ok(ScrapeOutcome {
        message: "Scraping complete".to_string(),
        added: report.added,
        skipped: report.skipped,
        deleted,
        total_found,
    })
}

/// Parse the caller's comma-separated keyword list, or fall back to the
/// default seniority terms. Keywords are matched lowercased.
fn resolve_exclude_keywords(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(list) => list
            .split(',')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect(),
        None => DEFAULT_EXCLUDE_KEYWORDS
            .iter()
            .map(|k| k.to_string())
            .collect(),
    }
}

/// Case-insensitive substring match of any keyword against the title.
fn title_excluded(title: &str, keywords: &[String]) -> bool {
    let title = title.to_lowercase();
    keywords.iter().any(|k| title.contains(k.as_str()))
}

/// Parse a provider-supplied posting date. Accepts a plain calendar date,
/// an RFC 3339 timestamp, or a US-style date; anything else is unknown.
pub fn parse_posted_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%m/%d/%Y") {
        return Some(date);
    }

    None
}

/// Newest postings first, unknown dates last, then cap the batch at `limit`.
fn sort_and_truncate(mut jobs: Vec<ScrapedJob>, limit: usize) -> Vec<ScrapedJob> {
    jobs.sort_by(|a, b| {
        let da = parse_posted_date(a.date_posted.as_deref());
        let db = parse_posted_date(b.date_posted.as_deref());
        // None compares less than any Some, so descending order puts
        // unparseable dates at the end.
        db.cmp(&da)
    });
    jobs.truncate(limit);
    jobs
}

/// Map a scraped listing onto an insertable row. Store-level defaults set
/// status 'new' and checked false.
fn to_new_job(job: &ScrapedJob) -> NewJob {
    NewJob {
        site: job.site.clone(),
        title: job.title.clone(),
        company: job.company.clone().unwrap_or_default(),
        location: job.location.clone().unwrap_or_default(),
        job_type: job.job_type.clone().unwrap_or_default(),
        date_posted: parse_posted_date(job.date_posted.as_deref()),
        job_url: job.job_url.clone(),
        salary_min: job.min_amount,
        salary_max: job.max_amount,
        salary_source: job.salary_source.clone().unwrap_or_default(),
        is_remote: job.is_remote.unwrap_or(false),
    }
}
