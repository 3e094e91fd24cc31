// src/cli/check.rs
// Configuration report

use anyhow::{Result, bail};
use calculator::config::Settings;

pub fn run_check_config(settings: &Settings) -> Result<()> {
    println!("Config file: {}", settings.config_path.display());
    let validation = settings.validate();
    println!("{}", validation.report());
    if !validation.is_valid() {
        bail!("configuration has {} error(s)", validation.errors.len());
    }
    Ok(())
}
