use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

mod commands;
mod logging;
mod utils;

use commands::{config, health, serve};
use utils::settings::Settings;

/// Job Board - backend API server and operator tools
#[derive(Parser)]
#[command(name = "jobboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Port to listen on (overrides API_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check database connectivity and contents
    Health {
        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Output format (json, yaml, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let _guard = logging::init_logging(&settings.logs_path(), cli.verbose)?;

    match cli.command {
        Commands::Serve { port } => {
            serve::execute(settings, port).await?;
        }
        Commands::Health { format } => {
            health::execute(&settings, format).await?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                config::show(&settings, format)?;
            }
        },
    }

    Ok(())
}
