pub mod job;
pub mod scrape;
