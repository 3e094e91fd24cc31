// src/cli/call.rs
// Direct operation invocation from CLI

use super::serve::build_registry;
use anyhow::{Context, Result};
use calculator::config::Settings;
use serde_json::{Map, Value};

/// Execute an operation directly from the command line.
///
/// Domain errors print like any other response; unknown operations and
/// invalid arguments fail the command.
pub fn run_call(settings: &Settings, name: String, args: String) -> Result<()> {
    let registry = build_registry(settings)?;
    let raw: Map<String, Value> =
        serde_json::from_str(&args).context("arguments must be a JSON object")?;

    let response = registry.invoke(&name, &raw)?;
    println!("{}", response.text());
    Ok(())
}
