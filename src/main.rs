// src/main.rs
// Calculator - math operations served over MCP

mod cli;

use anyhow::Result;
use calculator::config::{EnvConfig, Settings};
use clap::Parser;
use cli::{Cli, Commands};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files (global first, then project - project overrides)
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".calculator/.env"));
    }
    let _ = dotenvy::dotenv(); // Load .env from current directory

    let cli = Cli::parse();
    let env = EnvConfig::load();

    // Set up logging based on command
    let default_level = match &cli.command {
        Some(Commands::Serve) | None => Level::WARN, // Quiet for MCP stdio
        Some(Commands::List { .. } | Commands::Call { .. } | Commands::CheckConfig) => Level::INFO,
    };
    let log_level = env.level().unwrap_or(default_level);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = Settings::from_env(env);

    match cli.command {
        None | Some(Commands::Serve) => {
            cli::run_mcp_server(settings).await?;
        }
        Some(Commands::List { group, json }) => {
            cli::run_list(&settings, group, json)?;
        }
        Some(Commands::Call { name, args }) => {
            cli::run_call(&settings, name, args)?;
        }
        Some(Commands::CheckConfig) => {
            cli::run_check_config(&settings)?;
        }
    }

    Ok(())
}
