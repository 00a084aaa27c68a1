use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Initialize the SQLite connection pool, creating the database file if it
/// does not exist yet.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Run the idempotent startup migration: create the jobs table and add any
/// columns introduced after the table first shipped. Column additions consult
/// `pragma_table_info` first, so re-running is always safe.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            site TEXT NOT NULL DEFAULT '',
            title TEXT NOT NULL DEFAULT '',
            company TEXT NOT NULL DEFAULT '',
            location TEXT NOT NULL DEFAULT '',
            job_type TEXT NOT NULL DEFAULT '',
            date_posted TEXT,
            job_url TEXT NOT NULL UNIQUE,
            salary_min REAL,
            salary_max REAL,
            salary_source TEXT NOT NULL DEFAULT '',
            is_remote INTEGER NOT NULL DEFAULT 0,
            checked INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'new',
            notes TEXT NOT NULL DEFAULT '',
            applied_at TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // applied_at was added after the first release; older database files
    // predate it.
    ensure_column(pool, "applied_at", "TEXT").await?;

    Ok(())
}

/// Add a column to the jobs table if it is not already present.
async fn ensure_column(
    pool: &SqlitePool,
    column: &str,
    column_type: &str,
) -> Result<(), sqlx::Error> {
    let exists: Option<(String,)> =
        sqlx::query_as("SELECT name FROM pragma_table_info('jobs') WHERE name = ?")
            .bind(column)
            .fetch_optional(pool)
            .await?;

    if exists.is_none() {
        tracing::info!(column, "adding missing column to jobs table");
        sqlx::query(&format!("ALTER TABLE jobs ADD COLUMN {column} {column_type}"))
            .execute(pool)
            .await?;
    }

    Ok(())
}

pub mod queries;
