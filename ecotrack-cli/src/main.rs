//! Ecotrack CLI - product sustainability and emissions in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{config, emissions, favorites, login, logout, open, register, scan, status};

/// Environment variable holding the log filter, e.g. `ecotrack_core=debug`
const LOG_ENV: &str = "ECOTRACK_LOG";

/// Ecotrack - sustainability scores and emissions in your terminal
#[derive(Parser)]
#[command(name = "eco", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        #[arg(long, short)]
        username: Option<String>,
        #[arg(long, short)]
        email: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long, env = "ECOTRACK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in and remember the session
    Login {
        #[arg(long, short)]
        username: Option<String>,
        /// Password (prompted when omitted)
        #[arg(long, env = "ECOTRACK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forget the stored session
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the session and whether the server answers
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up a product by barcode
    Scan {
        barcode: Option<String>,
        /// Also save the product to favorites
        #[arg(long)]
        save: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage favorite products (lists them by default)
    Favorites {
        #[command(subcommand)]
        command: Option<favorites::FavoritesCommands>,
    },

    /// Query CO2 emissions for a region and year
    Emissions {
        #[arg(long, short)]
        year: Option<String>,
        #[arg(long, short)]
        region: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve an app path such as /favorites to its page
    Open {
        path: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change client settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so `--json` output stays parseable
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Register {
            username,
            email,
            password,
            json,
        } => register::run(username, email, password, json).await,
        Commands::Login {
            username,
            password,
            json,
        } => login::run(username, password, json).await,
        Commands::Logout { json } => logout::run(json),
        Commands::Status { json } => status::run(json).await,
        Commands::Scan {
            barcode,
            save,
            json,
        } => scan::run(barcode, save, json).await,
        Commands::Favorites { command } => favorites::run(command).await,
        Commands::Emissions { year, region, json } => emissions::run(year, region, json).await,
        Commands::Open { path, json } => open::run(&path, json),
        Commands::Config { command } => config::run(command),
    }
}
