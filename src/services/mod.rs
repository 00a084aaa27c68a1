pub mod import;
pub mod provider;
pub mod reconcile;
