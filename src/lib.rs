#![forbid(unsafe_code)]

//! Budget-driven, compatibility-checked PC build recommendations.
//!
//! A profile and a total budget go through the budget allocator, the staged
//! [`CompatibilityResolver`] and the configuration assembler to produce a
//! [`Configuration`]. The catalog is reached only through the
//! [`CatalogStore`] port.

pub mod adapters;
pub mod app;
pub mod commands;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use adapters::{InMemoryCatalog, TomlConfigStore};
pub use app::{AdvisorController, CompatibilityResolver, PrebuiltFinder};
pub use domain::{
    allocate, AppConfig, Budget, BudgetPlan, CatalogSnapshot, Category, Configuration,
    DomainError, PrebuiltSystem, Profile, Warning,
};
pub use ports::{CatalogStore, ConfigStore};
