pub mod budget;
pub mod catalog;
pub mod component;
pub mod config;
pub mod configuration;
pub mod error;
pub mod power;
pub mod profile;
pub mod query;
pub mod resolution;

pub use budget::{allocate, minimum_budget, minimum_total, Budget, BudgetPlan};
pub use catalog::{CatalogSnapshot, ProfileRequirements};
pub use component::{
    Case, Category, Cooler, CoolerKind, Cpu, Drive, FromRecord, Gpu, Hdd, Listing, MemoryType,
    Motherboard, PrebuiltSystem, Psu, Ram, Record, RecordKind,
};
pub use config::{AppConfig, CatalogConfig, LoggingConfig, ResolverConfig};
pub use configuration::{Components, Configuration, ConfigurationAssembler, Warning};
pub use error::DomainError;
pub use power::PowerEstimator;
pub use profile::Profile;
pub use query::{Direction, Field, FieldValue, Predicate, Query, Queryable, SortKey};
pub use resolution::ResolutionState;
