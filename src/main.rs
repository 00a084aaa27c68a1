use axum::routing::{delete, get, patch, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use jobdash::app_state::AppState;
use jobdash::config::AppConfig;
use jobdash::db;
use jobdash::routes;
use jobdash::services::provider::{JobSearchProvider, JobSpyClient};

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    tracing::info!("Initializing jobdash server");

    // Initialize Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    let prometheus_handle = Arc::new(prometheus_handle);

    // Register application metrics
    metrics::describe_counter!("scrape_runs_total", "Completed reconciliation runs");
    metrics::describe_counter!("jobs_added_total", "Jobs inserted by reconciliation");
    metrics::describe_counter!("jobs_deleted_total", "Jobs wiped from the unreviewed pool");

    // Initialize database and run the idempotent startup migration
    tracing::info!("Opening SQLite database");
    let db_pool = db::init_pool(&config.database_url)
        .await
        .expect("Failed to open database");

    db::migrate(&db_pool)
        .await
        .expect("Failed to run database migration");

    // Initialize the scraping provider client, if configured
    let provider: Option<Arc<dyn JobSearchProvider>> = match config.jobspy_api_url.as_deref() {
        Some(url) => {
            tracing::info!(url, "Initializing JobSpy provider client");
            Some(Arc::new(
                JobSpyClient::new(url).expect("Failed to initialize JobSpy client"),
            ))
        }
        None => {
            tracing::warn!("JOBSPY_API_URL not set; /api/scrape will be unavailable");
            None
        }
    };

    // Create shared application state
    let state = AppState::new(db_pool, provider, PathBuf::from(&config.csv_import_path));

    // Build API routes
    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/jobs", get(routes::jobs::list_jobs))
        .route("/api/jobs/{id}", patch(routes::jobs::update_job))
        .route("/api/jobs/{id}", delete(routes::jobs::delete_job))
        .route("/api/scrape", post(routes::scrape::scrape_jobs))
        .route("/api/stats", get(routes::jobs::get_stats))
        .route("/api/import-csv", post(routes::scrape::import_csv))
        .with_state(state)
        // Prometheus metrics endpoint (separate state)
        .route(
            "/metrics",
            get(routes::metrics::prometheus_metrics).with_state(prometheus_handle),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(1024 * 1024)); // 1 MB limit

    tracing::info!("Starting jobdash on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
