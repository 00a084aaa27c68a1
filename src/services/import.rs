//! One-shot CSV Import
//!
//! Loads previously exported listings from a fixed local file into the store.
//! Purely additive: no exclude-keyword filtering, no deletion, duplicates by
//! URL are skipped. Bad rows are recorded in the batch report and the rest of
//! the file still imports.

use serde::Deserialize;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::warn;

use crate::db::queries;
use crate::models::job::NewJob;
use crate::models::scrape::BatchReport;
use crate::services::reconcile::parse_posted_date;

/// Error type for CSV import.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("CSV file not found: {0}")]
    NotFound(String),

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("database error during import: {0}")]
    Database(#[from] sqlx::Error),
}

/// One CSV row. Extra columns in the file are ignored; missing ones default
/// to empty. Numeric and boolean fields are parsed leniently since the file
/// comes from an external export.
#[derive(Debug, Deserialize)]
struct CsvJobRow {
    #[serde(default)]
    site: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    job_type: Option<String>,
    #[serde(default)]
    date_posted: Option<String>,
    #[serde(default)]
    job_url: Option<String>,
    #[serde(default)]
    min_amount: Option<f64>,
    #[serde(default)]
    max_amount: Option<f64>,
    #[serde(default)]
    is_remote: Option<String>,
}

/// Import every row from the CSV file at `path`. Fails only when the file
/// is absent or unreadable; per-row problems are accumulated in the report.
pub async fn import_csv(pool: &SqlitePool, path: &Path) -> Result<BatchReport, ImportError> {
    if !path.exists() {
        return Err(ImportError::NotFound(path.display().to_string()));
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let mut report = BatchReport::default();
    for (index, result) in reader.deserialize::<CsvJobRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) => {
                report.record_failure(&format!("row {}", index + 1), &e);
                continue;
            }
        };

        let job_url = row.job_url.clone().unwrap_or_default();
        if job_url.is_empty() {
            report.record_failure(&format!("row {}", index + 1), "missing job_url");
            continue;
        }

        let job = to_new_job(row, job_url.clone());
        match queries::insert_job_ignore_duplicate(pool, &job).await {
            Ok(true) => report.record_added(),
            Ok(false) => report.record_duplicate(),
            Err(e) => report.record_failure(&job_url, &e),
        }
    }

    for failure in &report.failures {
        warn!(job_url = %failure.job_url, reason = %failure.reason, "CSV row skipped");
    }

    Ok(report)
}

fn to_new_job(row: CsvJobRow, job_url: String) -> NewJob {
    NewJob {
        site: row.site.unwrap_or_default(),
        title: row.title.unwrap_or_default(),
        company: row.company.unwrap_or_default(),
        location: row.location.unwrap_or_default(),
        job_type: row.job_type.unwrap_or_default(),
        date_posted: parse_posted_date(row.date_posted.as_deref()),
        job_url,
        salary_min: row.min_amount,
        salary_max: row.max_amount,
        // The export format carries no salary_source column.
        salary_source: String::new(),
        is_remote: parse_bool(row.is_remote.as_deref()),
    }
}

/// Lenient boolean parse for exported truth values ("True", "1", "yes").
fn parse_bool(raw: Option<&str>) -> bool {
    matches!(
        raw.map(|s| s.trim().to_lowercase()).as_deref(),
        Some("true") | Some("1") | Some("yes")
    )
}
