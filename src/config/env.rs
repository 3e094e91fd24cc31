// src/config/env.rs
// Environment-based configuration - every CALCULATOR_* variable in one place

use std::path::PathBuf;
use tracing::{Level, debug, warn};

pub const LOG_VAR: &str = "CALCULATOR_LOG";
pub const CONFIG_VAR: &str = "CALCULATOR_CONFIG";
pub const DISABLED_GROUPS_VAR: &str = "CALCULATOR_DISABLED_GROUPS";

/// Problems found while checking settings; only errors fail a check
#[derive(Debug, Default)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Errors first, then warnings, one `  - ` bullet per line
    pub fn report(&self) -> String {
        let sections = [("Errors:", &self.errors), ("Warnings:", &self.warnings)];
        let lines: Vec<String> = sections
            .into_iter()
            .filter(|(_, items)| !items.is_empty())
            .flat_map(|(title, items)| {
                std::iter::once(title.to_string()).chain(items.iter().map(|m| format!("  - {m}")))
            })
            .collect();
        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Environment configuration
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// Log level override (CALCULATOR_LOG)
    pub log_level: Option<String>,
    /// Config file path override (CALCULATOR_CONFIG)
    pub config_path: Option<PathBuf>,
    /// Extra groups to disable (CALCULATOR_DISABLED_GROUPS, comma separated)
    pub disabled_groups: Vec<String>,
}

impl EnvConfig {
    /// Load from the process environment (call once at startup)
    pub fn load() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let config = Self {
            log_level: read(LOG_VAR).map(|v| v.trim().to_string()),
            config_path: read(CONFIG_VAR).map(PathBuf::from),
            disabled_groups: read(DISABLED_GROUPS_VAR)
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
        };
        debug!(?config, "Environment configuration loaded");
        config
    }

    /// Parsed log level, if set and recognized
    pub fn level(&self) -> Option<Level> {
        let raw = self.log_level.as_deref()?;
        match parse_level(raw) {
            Some(level) => Some(level),
            None => {
                warn!(value = raw, "Unknown {}, using default", LOG_VAR);
                None
            }
        }
    }

    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::default();
        if let Some(raw) = &self.log_level
            && parse_level(raw).is_none()
        {
            validation.add_warning(format!(
                "Unknown {} '{}'. Valid options: error, warn, info, debug, trace",
                LOG_VAR, raw
            ));
        }
        validation
    }
}

fn parse_level(value: &str) -> Option<Level> {
    match value.to_lowercase().as_str() {
        "error" => Some(Level::ERROR),
        "warn" | "warning" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Split a comma list, trimming blanks
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_empty_environment() {
        let config = EnvConfig::from_lookup(lookup(&[]));
        assert!(config.log_level.is_none());
        assert!(config.config_path.is_none());
        assert!(config.disabled_groups.is_empty());
        assert!(config.validate().is_valid());
    }

    #[test]
    fn test_disabled_groups_list() {
        let config = EnvConfig::from_lookup(lookup(&[(
            DISABLED_GROUPS_VAR,
            " financial, ,geometry ",
        )]));
        assert_eq!(config.disabled_groups, vec!["financial", "geometry"]);
    }

    #[test]
    fn test_log_level_parsing() {
        let config = EnvConfig::from_lookup(lookup(&[(LOG_VAR, "DEBUG")]));
        assert_eq!(config.level(), Some(Level::DEBUG));

        let bad = EnvConfig::from_lookup(lookup(&[(LOG_VAR, "loud")]));
        assert_eq!(bad.level(), None);
        let validation = bad.validate();
        assert!(validation.is_valid()); // Warnings don't make it invalid
        assert_eq!(validation.warnings.len(), 1);
    }

    #[test]
    fn test_report_formatting() {
        let mut validation = ConfigValidation::default();
        assert_eq!(validation.report(), "Configuration OK");
        validation.add_error("broken");
        validation.add_warning("odd");
        let report = validation.report();
        assert!(report.starts_with("Errors:\n  - broken"));
        assert!(report.contains("Warnings:\n  - odd"));
        assert!(!validation.is_valid());
    }
}
