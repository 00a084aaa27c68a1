use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Server bind address (e.g., "0.0.0.0:8000").
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// SQLite connection string; the file is created if missing.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Base URL of the JobSpy-compatible scraping service. When unset, the
    /// scrape endpoint reports the provider as unavailable.
    pub jobspy_api_url: Option<String>,

    /// Fixed path the one-time CSV importer reads from.
    #[serde(default = "default_csv_import_path")]
    pub csv_import_path: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_database_url() -> String {
    "sqlite://jobs.db".to_string()
}

fn default_csv_import_path() -> String {
    "recent_non_senior_jobs.csv".to_string()
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }
}
