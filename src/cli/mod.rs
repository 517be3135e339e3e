//! Command line interface.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "orderscan")]
#[command(about = "Patient order management with PDF identity extraction")]
#[command(version)]
pub struct Cli {
    /// Data directory holding the database (overrides config file)
    #[arg(long, global = true, env = "ORDERSCAN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and database
    Init,

    /// Start the HTTP API
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default: from config, else 127.0.0.1:3030)
        bind: Option<String>,
    },

    /// Extract patient identity from a PDF without storing anything
    Extract {
        /// PDF file to read
        file: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage stored orders
    Orders {
        #[command(subcommand)]
        command: OrderCommands,
    },

    /// Show the audit log
    Logs {
        /// Only show the most recent N entries (0 = all)
        #[arg(short, long, default_value = "0")]
        limit: usize,
    },

    /// Check that the external PDF and OCR tools are installed
    Check,
}

#[derive(Subcommand)]
enum OrderCommands {
    /// List all orders
    List,
    /// Show one order
    Show {
        /// Order ID
        id: i32,
    },
    /// Delete an order
    Delete {
        /// Order ID
        id: i32,
    },
}

/// Parse arguments, load settings and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        data_dir: cli.data_dir,
    };
    let (settings, config) = load_settings_with_options(options).await;

    match cli.command {
        Commands::Init => commands::init::cmd_init(&settings).await,
        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| settings.bind.clone());
            commands::serve::cmd_serve(&settings, &bind).await
        }
        Commands::Extract { file, json } => {
            commands::extract::cmd_extract(&settings, &file, json).await
        }
        Commands::Orders { command } => match command {
            OrderCommands::List => commands::orders::cmd_orders_list(&settings).await,
            OrderCommands::Show { id } => commands::orders::cmd_orders_show(&settings, id).await,
            OrderCommands::Delete { id } => {
                commands::orders::cmd_orders_delete(&settings, id).await
            }
        },
        Commands::Logs { limit } => commands::logs::cmd_logs(&settings, limit).await,
        Commands::Check => commands::check::cmd_check(&settings, &config),
    }
}
