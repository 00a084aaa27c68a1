//! Job Search Dashboard Backend
//!
//! Stores scraped job listings in a local SQLite database and exposes a REST
//! API for filtering, annotating, deleting, and re-scraping them. The scrape
//! itself is delegated to an external JobSpy-compatible service; this crate
//! owns the merge policy that refreshes the unreviewed pool without touching
//! records the user has already acted on.

pub mod app_state;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
