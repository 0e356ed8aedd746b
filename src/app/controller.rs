use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::adapters::{InMemoryCatalog, TomlConfigStore};
use crate::domain::{
    allocate, AppConfig, Budget, BudgetPlan, Category, Configuration, DomainError,
    PrebuiltSystem, Profile,
};
use crate::infrastructure::init_logging;
use crate::ports::{CatalogStore, ConfigStore};

use super::prebuilt::PrebuiltFinder;
use super::resolver::CompatibilityResolver;

/// Wires configuration, logging and the catalog together and exposes the
/// advisor's operations.
pub struct AdvisorController {
    config: RwLock<AppConfig>,
    config_store: Arc<dyn ConfigStore>,
    catalog: RwLock<Option<Arc<dyn CatalogStore>>>,
    catalog_override: Option<PathBuf>,
    _log_guard: Option<WorkerGuard>,
}

impl AdvisorController {
    /// Initialize from the OS config directory.
    ///
    /// `catalog_override` replaces the configured catalog path. A missing
    /// catalog is not an error here; operations that need one report
    /// [`DomainError::CatalogUnavailable`].
    pub fn new(catalog_override: Option<PathBuf>) -> Result<Self, DomainError> {
        let config_store: Arc<dyn ConfigStore> = Arc::new(TomlConfigStore::new()?);
        let config = config_store.load()?;

        let log_guard = init_logging(&config_store.logs_dir(), &config.logging)?;

        info!("Rigsmith starting up");

        let controller = Self {
            config: RwLock::new(config),
            config_store,
            catalog: RwLock::new(None),
            catalog_override,
            _log_guard: log_guard,
        };

        if let Err(e) = controller.reload_catalog() {
            warn!(error = %e, "Catalog not loaded");
        }

        info!("AdvisorController initialized");
        Ok(controller)
    }

    /// Build a controller around an existing store and catalog. Logging is
    /// left to the caller.
    pub fn with_store(
        config_store: Arc<dyn ConfigStore>,
        catalog: Arc<dyn CatalogStore>,
    ) -> Result<Self, DomainError> {
        let config = config_store.load()?;
        Ok(Self {
            config: RwLock::new(config),
            config_store,
            catalog: RwLock::new(Some(catalog)),
            catalog_override: None,
            _log_guard: None,
        })
    }

    fn catalog(&self) -> Result<Arc<dyn CatalogStore>, DomainError> {
        self.catalog
            .read()
            .clone()
            .ok_or_else(|| DomainError::CatalogUnavailable("no catalog loaded".to_string()))
    }

    fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog_override
            .clone()
            .or_else(|| self.config_store.catalog_path(&self.config.read()))
    }

    /// Re-read the catalog file and swap it in. Returns the number of
    /// listings loaded.
    pub fn reload_catalog(&self) -> Result<usize, DomainError> {
        let path = self.catalog_path().ok_or_else(|| {
            DomainError::CatalogUnavailable("no catalog path configured".to_string())
        })?;

        let catalog = InMemoryCatalog::from_path(&path)?;
        let records = catalog.len();
        *self.catalog.write() = Some(Arc::new(catalog));

        info!(path = ?path, records, "Catalog reloaded");
        Ok(records)
    }

    /// Per-category spending plan for a profile and total.
    pub fn allocate_budget(&self, profile: Profile, budget: Budget) -> BudgetPlan {
        allocate(profile, budget)
    }

    pub fn resolve(
        &self,
        profile: Profile,
        budget: Budget,
        brand: Option<&str>,
    ) -> Result<Configuration, DomainError> {
        let catalog = self.catalog()?;
        let resolver_config = self.config.read().resolver.clone();
        CompatibilityResolver::new(catalog.as_ref(), resolver_config).resolve(profile, budget, brand)
    }

    pub fn find_best_prebuilt(
        &self,
        profile: Profile,
        budget: Budget,
    ) -> Result<Option<PrebuiltSystem>, DomainError> {
        let catalog = self.catalog()?;
        PrebuiltFinder::new(catalog.as_ref()).best(profile, budget)
    }

    pub fn find_next_prebuilt(
        &self,
        profile: Profile,
        budget: Budget,
        excluded: &[String],
    ) -> Result<Option<PrebuiltSystem>, DomainError> {
        let catalog = self.catalog()?;
        PrebuiltFinder::new(catalog.as_ref()).next(profile, budget, excluded)
    }

    /// CPU manufacturers available as brand filters.
    pub fn cpu_brands(&self) -> Result<Vec<String>, DomainError> {
        self.catalog()?.manufacturers(Category::Cpu)
    }

    /// Get the current configuration.
    pub fn config(&self) -> AppConfig {
        self.config.read().clone()
    }

    /// Persist and apply a new configuration. The catalog is not reloaded;
    /// call [`AdvisorController::reload_catalog`] after changing its path.
    pub fn update_config(&self, config: AppConfig) -> Result<(), DomainError> {
        self.config_store.save(&config)?;
        *self.config.write() = config;

        info!("Configuration updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogSnapshot, Cpu, Listing, MemoryType};

    fn cpu(manufacturer: &str) -> Cpu {
        Cpu {
            listing: Listing {
                name: format!("{manufacturer} chip"),
                manufacturer: manufacturer.to_string(),
                price: 10_000,
                rating: None,
                link: None,
            },
            socket: "AM5".to_string(),
            cores: 6,
            threads: None,
            clock_ghz: 4.0,
            memory_types: vec![MemoryType::Ddr5],
            thermal_output: 65,
            power_draw: None,
            integrated_graphics: None,
        }
    }

    fn controller(dir: &std::path::Path) -> AdvisorController {
        let store = Arc::new(TomlConfigStore::with_dir(dir).unwrap());
        let catalog = Arc::new(InMemoryCatalog::new(CatalogSnapshot {
            cpus: vec![cpu("Intel"), cpu("AMD"), cpu("AMD")],
            ..Default::default()
        }));
        AdvisorController::with_store(store, catalog).unwrap()
    }

    #[test]
    fn test_cpu_brands() {
        let dir = tempfile::tempdir().unwrap();
        let brands = controller(dir.path()).cpu_brands().unwrap();
        assert_eq!(brands, vec!["AMD", "Intel"]);
    }

    #[test]
    fn test_update_config_persists() {
        let dir = tempfile::tempdir().unwrap();
        let controller = controller(dir.path());

        let mut config = controller.config();
        config.resolver.cooling_margin = 1.5;
        controller.update_config(config).unwrap();

        let store = TomlConfigStore::with_dir(dir.path()).unwrap();
        assert_eq!(store.load().unwrap().resolver.cooling_margin, 1.5);
        assert_eq!(controller.config().resolver.cooling_margin, 1.5);
    }

    #[test]
    fn test_reload_without_path_keeps_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let controller = controller(dir.path());

        let err = controller.reload_catalog().unwrap_err();
        assert!(err.is_catalog_fault());
        assert_eq!(controller.cpu_brands().unwrap().len(), 2);
    }

    #[test]
    fn test_reload_reads_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let controller = controller(dir.path());

        let snapshot = CatalogSnapshot {
            cpus: vec![cpu("Zhaoxin")],
            ..Default::default()
        };
        std::fs::write(
            dir.path().join("catalog.json"),
            serde_json::to_string(&snapshot).unwrap(),
        )
        .unwrap();

        let mut config = controller.config();
        config.catalog.path = Some(PathBuf::from("catalog.json"));
        controller.update_config(config).unwrap();

        assert_eq!(controller.reload_catalog().unwrap(), 1);
        assert_eq!(controller.cpu_brands().unwrap(), vec!["Zhaoxin"]);
    }
}
