pub mod catalog;
pub mod config;

pub use catalog::{fetch, fetch_first, CatalogStore};
pub use config::ConfigStore;
