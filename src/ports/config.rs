use std::path::PathBuf;

use crate::domain::{AppConfig, DomainError};

/// Port for persisting the advisor's settings.
pub trait ConfigStore: Send + Sync {
    /// Load settings, writing the defaults first if nothing is stored yet.
    fn load(&self) -> Result<AppConfig, DomainError>;

    fn save(&self, config: &AppConfig) -> Result<(), DomainError>;

    fn config_path(&self) -> PathBuf;

    /// Directory holding the config file and, by default, the catalog.
    fn data_dir(&self) -> PathBuf;

    fn logs_dir(&self) -> PathBuf;

    /// Catalog file named by `config`, with relative paths resolved against
    /// [`ConfigStore::data_dir`].
    fn catalog_path(&self, config: &AppConfig) -> Option<PathBuf> {
        config.catalog.path.as_ref().map(|path| {
            if path.is_absolute() {
                path.clone()
            } else {
                self.data_dir().join(path)
            }
        })
    }
}
