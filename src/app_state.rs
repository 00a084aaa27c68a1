use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;

use crate::services::provider::JobSearchProvider;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// None when no scraping backend is configured; `/api/scrape` then fails
    /// with ProviderUnavailable without touching the store.
    pub provider: Option<Arc<dyn JobSearchProvider>>,
    pub csv_import_path: PathBuf,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        provider: Option<Arc<dyn JobSearchProvider>>,
        csv_import_path: PathBuf,
    ) -> Self {
        Self {
            db,
            provider,
            csv_import_path,
        }
    }
}
