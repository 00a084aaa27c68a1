#![allow(dead_code)]

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use jobdash::db;
use jobdash::models::job::NewJob;

/// Fresh in-memory database with the schema applied. A single connection is
/// pinned so every query sees the same in-memory store.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    db::migrate(&pool).await.expect("Failed to run migration");

    pool
}

/// Minimal insertable job with the given URL and title.
pub fn new_job(url: &str, title: &str) -> NewJob {
    NewJob {
        site: "indeed".to_string(),
        title: title.to_string(),
        company: "Acme".to_string(),
        location: "Remote, USA".to_string(),
        job_type: "fulltime".to_string(),
        date_posted: None,
        job_url: url.to_string(),
        salary_min: None,
        salary_max: None,
        salary_source: String::new(),
        is_remote: false,
    }
}
