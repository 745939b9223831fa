//! Configuration handling
//!
//! Configuration is stored in an optional `registrant.toml` at the project
//! root. Every key has a default, so a missing file is the same as an empty
//! one.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::FileSystem;
use crate::plugin::DEFAULT_INDEX_FILE;

/// Config file name, relative to the project directory
pub const CONFIG_FILE: &str = "registrant.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// iOS-specific settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IosConfig {
    /// Let the CLI write a default Podfile and invalidate the pod lock
    pub manage_podfile: bool,
}

impl Default for IosConfig {
    fn default() -> Self {
        Self {
            manage_podfile: true,
        }
    }
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Platform projects are embeddable modules rather than standalone apps
    pub module: bool,

    /// Package index path, relative to the project directory
    pub package_index: PathBuf,

    /// Sort plugins by name instead of keeping index order
    pub sort_plugins: bool,

    /// iOS settings
    pub ios: IosConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            module: false,
            package_index: PathBuf::from(DEFAULT_INDEX_FILE),
            sort_plugins: false,
            ios: IosConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration for the project at `project_dir`
    pub fn for_project(fs: &dyn FileSystem, project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE);

        let content = match fs.read_to_string(&config_path)? {
            Some(content) => content,
            None => return Ok(Self::default()),
        };

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Parses configuration from TOML content
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.package_index.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "package_index must not be empty".to_string(),
            ));
        }

        if self.package_index.is_absolute() {
            return Err(ConfigError::Invalid(format!(
                "package_index must be relative to the project: {}",
                self.package_index.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalFs;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert!(!config.module);
        assert_eq!(config.package_index, PathBuf::from(".packages"));
        assert!(!config.sort_plugins);
        assert!(config.ios.manage_podfile);
    }

    #[test]
    fn parse_project_config() {
        let toml = r#"
module = true
package_index = "build/.packages"
sort_plugins = true

[ios]
manage_podfile = false
"#;

        let config = Config::parse(toml).unwrap();
        assert!(config.module);
        assert_eq!(config.package_index, PathBuf::from("build/.packages"));
        assert!(config.sort_plugins);
        assert!(!config.ios.manage_podfile);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = Config::parse("sort_plugins = true\n").unwrap();

        assert!(config.sort_plugins);
        assert_eq!(config.package_index, PathBuf::from(".packages"));
        assert!(config.ios.manage_podfile);
    }

    #[test]
    fn rejects_absolute_index_path() {
        let err = Config::parse("package_index = \"/etc/packages\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_bad_toml() {
        let err = Config::parse("module = maybe\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::for_project(&LocalFs, dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn loads_file_from_project() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "module = true\n").unwrap();

        let config = Config::for_project(&LocalFs, dir.path()).unwrap();
        assert!(config.module);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "[ios\n").unwrap();

        assert!(Config::for_project(&LocalFs, dir.path()).is_err());
    }
}
