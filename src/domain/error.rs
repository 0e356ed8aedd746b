use thiserror::Error;

use crate::domain::component::Category;

/// Domain-level errors for Rigsmith.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Rejected before resolution starts.
    #[error("Invalid budget: {0}")]
    InvalidBudget(String),

    #[error("Required components missing: {}", format_categories(.missing))]
    RequiredComponentMissing { missing: Vec<Category> },

    /// The catalog itself failed, as opposed to returning no match.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl DomainError {
    /// True when the failure comes from the catalog store rather than from
    /// the budget or the catalog's contents.
    pub fn is_catalog_fault(&self) -> bool {
        matches!(self, DomainError::CatalogUnavailable(_))
    }
}

fn format_categories(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for DomainError {
    fn from(err: toml::de::Error) -> Self {
        DomainError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DomainError {
    fn from(err: toml::ser::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}
