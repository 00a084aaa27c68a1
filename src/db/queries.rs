use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::collections::HashMap;

use crate::models::job::{JobFilter, JobRecord, JobUpdate, NewJob, STATUS_APPLIED, STATUS_NEW};

/// Sentinel status filter meaning "no status filter".
const STATUS_ALL: &str = "all";

/// List jobs matching the filter, newest postings first (NULL dates last),
/// ties broken by insertion time. No pagination; the full matching set is
/// returned.
pub async fn list_jobs(
    pool: &SqlitePool,
    filter: &JobFilter,
) -> Result<Vec<JobRecord>, sqlx::Error> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM jobs WHERE 1=1");

    if let Some(status) = filter.status.as_deref() {
        if status != STATUS_ALL {
            query.push(" AND status = ").push_bind(status.to_string());
        }
    }

    if let Some(checked) = filter.checked {
        query.push(" AND checked = ").push_bind(checked);
    }

    if let Some(search) = filter.search.as_deref() {
        let pattern = format!("%{search}%");
        query
            .push(" AND (title LIKE ")
            .push_bind(pattern.clone())
            .push(" OR company LIKE ")
            .push_bind(pattern.clone())
            .push(" OR location LIKE ")
            .push_bind(pattern)
            .push(")");
    }

    query.push(" ORDER BY date_posted IS NULL, date_posted DESC, created_at DESC");

    query.build_query_as::<JobRecord>().fetch_all(pool).await
}

/// Fetch a single job by id.
pub async fn get_job(pool: &SqlitePool, id: i64) -> Result<Option<JobRecord>, sqlx::Error> {
    sqlx::query_as::<_, JobRecord>("SELECT * FROM jobs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Apply a partial update to a job. Returns false when the id does not exist.
///
/// Whenever `status` is written, `applied_at` is recomputed: set to today's
/// date on "applied" (overwriting any prior value), cleared otherwise -- even
/// if the stored status already had that value. Callers must reject an empty
/// update before reaching this function.
pub async fn update_job(
    pool: &SqlitePool,
    id: i64,
    update: &JobUpdate,
) -> Result<bool, sqlx::Error> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE jobs SET ");
    let mut fields = query.separated(", ");

    if let Some(checked) = update.checked {
        fields.push("checked = ");
        fields.push_bind_unseparated(checked);
    }

    if let Some(status) = update.status.as_deref() {
        fields.push("status = ");
        fields.push_bind_unseparated(status.to_string());

        if status == STATUS_APPLIED {
            fields.push("applied_at = ");
            fields.push_bind_unseparated(Utc::now().date_naive());
        } else {
            fields.push("applied_at = NULL");
        }
    }

    if let Some(notes) = update.notes.as_deref() {
        fields.push("notes = ");
        fields.push_bind_unseparated(notes.to_string());
    }

    query.push(" WHERE id = ").push_bind(id);

    let result = query.build().execute(pool).await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a single job. Returns false when the id does not exist.
pub async fn delete_job(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Wipe the unreviewed pool (every record with status 'new'). Reconciler only.
pub async fn delete_new_jobs(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM jobs WHERE status = ?")
        .bind(STATUS_NEW)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// URLs of records the user has acted on (status != 'new'). The reconciler
/// snapshots these before wiping the unreviewed pool so it never resurrects
/// a curated record.
pub async fn curated_urls(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT job_url FROM jobs WHERE status != ?")
        .bind(STATUS_NEW)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(url,)| url).collect())
}

/// Insert a listing, skipping silently on a `job_url` conflict. Returns true
/// if a row was actually inserted, false if the URL already existed.
pub async fn insert_job_ignore_duplicate(
    pool: &SqlitePool,
    job: &NewJob,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT OR IGNORE INTO jobs
        (site, title, company, location, job_type, date_posted, job_url,
         salary_min, salary_max, salary_source, is_remote)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&job.site)
    .bind(&job.title)
    .bind(&job.company)
    .bind(&job.location)
    .bind(&job.job_type)
    .bind(job.date_posted)
    .bind(&job.job_url)
    .bind(job.salary_min)
    .bind(job.salary_max)
    .bind(&job.salary_source)
    .bind(job.is_remote)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Total number of stored jobs.
pub async fn count_total(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM jobs")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Number of jobs the user has marked as checked.
pub async fn count_checked(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM jobs WHERE checked = 1")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Job counts grouped by status.
pub async fn count_by_status(pool: &SqlitePool) -> Result<HashMap<String, i64>, sqlx::Error> {
    let rows: Vec<(String, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM jobs GROUP BY status")
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().collect())
}

/// Job counts grouped by source marketplace.
pub async fn count_by_site(pool: &SqlitePool) -> Result<HashMap<String, i64>, sqlx::Error> {
    let rows: Vec<(String, i64)> = sqlx::query_as("SELECT site, COUNT(*) FROM jobs GROUP BY site")
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().collect())
}
