// src/config/file.rs
// File-based configuration from ~/.calculator/config.toml

use crate::error::{CalcError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Top-level config structure
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CalculatorConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Catalog section: what to leave out of the registry
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default)]
    pub disabled_groups: Vec<String>,
    #[serde(default)]
    pub disabled_operations: Vec<String>,
}

/// Server section
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Replaces the default instructions sent at initialization
    pub instructions: Option<String>,
}

impl CalculatorConfig {
    /// Default location: ~/.calculator/config.toml
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".calculator")
            .join("config.toml")
    }

    /// Parse a config file, failing on read or parse errors
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
            .map_err(|e| CalcError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load a config file, falling back to defaults when absent or invalid
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Self::default();
        }
        match Self::from_path(path) {
            Ok(config) => {
                debug!(path = %path.display(), "Loaded config from file");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load config file");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[catalog]
disabled_groups = ["financial"]
disabled_operations = ["matrix_inverse"]

[server]
instructions = "Be precise"
"#;
        let config = CalculatorConfig::parse(toml).unwrap();
        assert_eq!(config.catalog.disabled_groups, vec!["financial"]);
        assert_eq!(config.catalog.disabled_operations, vec!["matrix_inverse"]);
        assert_eq!(config.server.instructions.as_deref(), Some("Be precise"));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = CalculatorConfig::parse("").unwrap();
        assert_eq!(config, CalculatorConfig::default());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(CalculatorConfig::parse("[catalog]\ndisabled = [\"x\"]").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[catalog]\ndisabled_groups = [\"geometry\"]").unwrap();
        let config = CalculatorConfig::load(file.path());
        assert_eq!(config.catalog.disabled_groups, vec!["geometry"]);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalculatorConfig::load(&dir.path().join("absent.toml"));
        assert_eq!(config, CalculatorConfig::default());
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is = = not toml").unwrap();
        assert!(CalculatorConfig::from_path(file.path()).is_err());
        assert_eq!(CalculatorConfig::load(file.path()), CalculatorConfig::default());
    }
}
