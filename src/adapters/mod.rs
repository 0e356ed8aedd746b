pub mod config_store;
pub mod memory_catalog;

pub use config_store::TomlConfigStore;
pub use memory_catalog::InMemoryCatalog;
