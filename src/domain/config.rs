use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::power::DEFAULT_HEADROOM_WATTS;

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Enable file logging with rotation.
    pub file_logging: bool,
    /// Maximum number of log files to keep.
    pub max_files: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: false,
            max_files: 7,
        }
    }
}

/// Where the component catalog lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON or TOML catalog file. Relative paths resolve against the data
    /// directory.
    pub path: Option<PathBuf>,
}

/// Resolver tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Above this total, two-module RAM kits are allowed.
    pub dual_module_budget: u64,
    /// Watts added to the running draw before PSU rounding.
    pub psu_headroom_watts: u32,
    /// Cooler dissipation must reach this multiple of the CPU's TDP.
    pub cooling_margin: f64,
    /// How many coolers stay on the short-list until the case is chosen.
    pub cooling_shortlist: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            dual_module_budget: 50_000,
            psu_headroom_watts: DEFAULT_HEADROOM_WATTS,
            cooling_margin: 1.2,
            cooling_shortlist: 3,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
    pub resolver: ResolverConfig,
}

impl AppConfig {
    /// Create a new AppConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [resolver]
            cooling_shortlist = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.resolver.cooling_shortlist, 5);
        assert_eq!(config.resolver.dual_module_budget, 50_000);
        assert_eq!(config.logging.level, "info");
        assert!(config.catalog.path.is_none());
    }
}
