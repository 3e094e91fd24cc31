// src/config/mod.rs
// Configuration: environment, config file, and the catalog filter they produce

pub mod env;
pub mod file;

pub use env::{ConfigValidation, EnvConfig};
pub use file::CalculatorConfig;

use crate::mcp::DEFAULT_INSTRUCTIONS;
use crate::ops;
use crate::registry::CatalogFilter;
use std::path::PathBuf;

/// Environment and file configuration merged for startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub env: EnvConfig,
    pub file: CalculatorConfig,
    pub config_path: PathBuf,
}

impl Settings {
    /// The environment may relocate the config file
    pub fn from_env(env: EnvConfig) -> Self {
        let config_path = env
            .config_path
            .clone()
            .unwrap_or_else(CalculatorConfig::default_path);
        let file = CalculatorConfig::load(&config_path);
        Self {
            env,
            file,
            config_path,
        }
    }

    /// Groups from both sources plus operations from the file
    pub fn catalog_filter(&self) -> CatalogFilter {
        CatalogFilter {
            disabled_groups: self
                .file
                .catalog
                .disabled_groups
                .iter()
                .chain(&self.env.disabled_groups)
                .cloned()
                .collect(),
            disabled_operations: self
                .file
                .catalog
                .disabled_operations
                .iter()
                .cloned()
                .collect(),
        }
    }

    pub fn instructions(&self) -> &str {
        self.file
            .server
            .instructions
            .as_deref()
            .unwrap_or(DEFAULT_INSTRUCTIONS)
    }

    pub fn validate(&self) -> ConfigValidation {
        let mut validation = self.env.validate();

        if self.config_path.exists()
            && let Err(e) = CalculatorConfig::from_path(&self.config_path)
        {
            validation.add_error(e.to_string());
        }

        let filter = self.catalog_filter();
        for group in &filter.disabled_groups {
            if !ops::GROUPS.contains(&group.as_str()) {
                validation.add_warning(format!(
                    "Unknown group '{}'. Valid groups: {}",
                    group,
                    ops::GROUPS.join(", ")
                ));
            }
        }

        let names = ops::all_operation_names();
        for op in &filter.disabled_operations {
            if !names.contains(&op.as_str()) {
                validation.add_warning(format!("Unknown operation '{}'", op));
            }
        }

        let remaining = ops::all_groups()
            .into_iter()
            .flat_map(|(group, list)| list.into_iter().map(move |op| (group, op.name)))
            .filter(|(group, name)| {
                !filter.disabled_groups.contains(*group)
                    && !filter.disabled_operations.contains(*name)
            })
            .count();
        if remaining == 0 {
            validation.add_error("Every operation is disabled; the server would expose no tools");
        }

        validation
    }
}
