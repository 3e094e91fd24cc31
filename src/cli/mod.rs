// src/cli/mod.rs
// CLI module for calculator commands

use clap::{Parser, Subcommand};

pub mod call;
pub mod check;
pub mod list;
pub mod serve;

pub use call::run_call;
pub use check::run_check_config;
pub use list::run_list;
pub use serve::run_mcp_server;

#[derive(Parser)]
#[command(name = "calculator")]
#[command(about = "Calculator operations served over the Model Context Protocol")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server on stdio (default)
    Serve,

    /// Print the operation catalog
    List {
        /// Only show one group (e.g. statistics)
        #[arg(short, long)]
        group: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Invoke one operation directly
    Call {
        /// Operation name (e.g. add, matrix_inverse)
        #[arg(index = 1)]
        name: String,

        /// JSON arguments (e.g. '{"a": 2, "b": 3}')
        #[arg(index = 2, default_value = "{}")]
        args: String,
    },

    /// Validate environment and config file
    CheckConfig,
}
