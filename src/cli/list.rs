// src/cli/list.rs
// Catalog listing

use super::serve::build_registry;
use anyhow::{Result, bail};
use calculator::config::Settings;
use calculator::ops::GROUPS;
use calculator::registry::OperationInfo;

pub fn run_list(settings: &Settings, group: Option<String>, json: bool) -> Result<()> {
    if let Some(g) = &group
        && !GROUPS.contains(&g.as_str())
    {
        bail!("Unknown group '{}'. Valid groups: {}", g, GROUPS.join(", "));
    }

    let registry = build_registry(settings)?;
    let entries: Vec<OperationInfo> = registry
        .list()
        .into_iter()
        .filter(|op| group.as_deref().is_none_or(|g| op.group == g))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let width = entries.iter().map(|op| op.name.len()).max().unwrap_or(0);
    let mut current = "";
    for op in &entries {
        if op.group != current {
            if !current.is_empty() {
                println!();
            }
            println!("[{}]", op.group);
            current = op.group;
        }
        println!("  {:width$}  {}", op.name, op.description, width = width);
    }
    println!("\n{} operations", entries.len());
    Ok(())
}
