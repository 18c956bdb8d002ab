//! Tree configuration.
//!
//! Loaded from YAML files and environment variables through the `config`
//! crate. Every field has a default, so an empty source set is valid.

use serde::Deserialize;

/// Default configuration file name (without extension).
pub const DEFAULT_CONFIG_FILE: &str = "rbmap";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "RBMAP_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "RBMAP";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "RBMAP_LOG";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// Construction-time settings for an [`RbTree`](crate::RbTree).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Nodes to pre-allocate in the arena.
    ///
    /// Default: 0 (grow on demand).
    pub initial_capacity: usize,

    /// Run the full invariant validator after every insert and remove,
    /// panicking on the first violation.
    ///
    /// Default: false. Meant for debugging rebalancing changes; it turns
    /// every mutation into an O(n) operation.
    pub check_invariants: bool,
}

impl TreeConfig {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `rbmap.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix, e.g.
    ///    `RBMAP__CHECK_INVARIANTS=true`
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
