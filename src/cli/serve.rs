// src/cli/serve.rs
// MCP server startup

use anyhow::Result;
use calculator::config::Settings;
use calculator::mcp::{CalculatorServer, run_stdio};
use calculator::registry::Registry;
use std::sync::Arc;
use tracing::{info, warn};

/// Build the registry from settings
pub fn build_registry(settings: &Settings) -> Result<Registry> {
    let validation = settings.validate();
    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    let registry = Registry::filtered(settings.catalog_filter())?;
    info!(operations = registry.len(), "Catalog ready");
    Ok(registry)
}

pub async fn run_mcp_server(settings: Settings) -> Result<()> {
    let registry = build_registry(&settings)?;
    if registry.is_empty() {
        anyhow::bail!("No operations enabled; check {}", settings.config_path.display());
    }
    let server = CalculatorServer::new(Arc::new(registry)).with_instructions(settings.instructions());
    run_stdio(server).await
}
