use crate::error::ConfigResult;
use crate::loader::ConfigLoader;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Location of the configuration file relative to the repository root
pub const CONFIG_FILE: &str = ".gitlet/config.toml";

/// Repository configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Observability settings
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load config from repository root
    ///
    /// Returns the defaults when the repository has no configuration file.
    /// Environment overrides are applied on top of either.
    pub fn load(repo_root: impl AsRef<Path>) -> ConfigResult<Self> {
        let loader = ConfigLoader::new();
        let config_path = repo_root.as_ref().join(CONFIG_FILE);

        let mut config = if config_path.is_file() {
            loader.load_file(&config_path)?
        } else {
            debug!("No configuration file at {}, using defaults", config_path.display());
            Self::default()
        };

        loader.apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Save config to repository root
    pub fn save(&self, repo_root: impl AsRef<Path>) -> ConfigResult<()> {
        let config_path = repo_root.as_ref().join(CONFIG_FILE);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, toml_str)?;
        Ok(())
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (pretty, compact, json)
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        ObservabilityConfig {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_section_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());

        let config: Config = toml::from_str("[observability]\nlog_level = \"debug\"\n").unwrap();
        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.observability.log_format, "compact");
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.observability.log_format = "json".to_string();
        config.save(dir.path()).unwrap();

        let loaded = ConfigLoader::new()
            .load_file(dir.path().join(CONFIG_FILE))
            .unwrap();
        assert_eq!(loaded, config);
    }
}
