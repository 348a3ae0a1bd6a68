//! Config command - show and change client settings

use std::time::Duration;

use anyhow::Result;
use clap::Subcommand;

use ecotrack_core::adapters::HttpResourceClient;
use ecotrack_core::config::{Config, API_URL_ENV};

use super::get_ecotrack_dir;
use crate::output;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the API base URL
    SetUrl { url: String },
    /// Set the request timeout in seconds (0 disables it)
    SetTimeout { seconds: u64 },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let ecotrack_dir = get_ecotrack_dir()?;
    let mut config = Config::load(&ecotrack_dir)?;

    match command {
        ConfigCommands::Show { json } => {
            let timeout = config.request_timeout.map(|d| d.as_secs());
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "apiBaseUrl": config.api_base_url,
                        "timeoutSecs": timeout,
                    }))?
                );
                return Ok(());
            }

            let mut table = output::create_table();
            table.add_row(vec!["Servidor", config.api_base_url.as_str()]);
            let timeout = timeout
                .map(|s| format!("{} s", s))
                .unwrap_or_else(|| "Sin límite".to_string());
            table.add_row(vec!["Tiempo de espera", timeout.as_str()]);
            println!("{}", table);
            if std::env::var(API_URL_ENV).is_ok() {
                output::warning(&format!("{} sobrescribe el servidor configurado.", API_URL_ENV));
            }
        }
        ConfigCommands::SetUrl { url } => {
            // Reject what the client would reject at startup
            HttpResourceClient::new(&url)?;
            config.api_base_url = url;
            config.save(&ecotrack_dir)?;
            output::success(&format!("Servidor: {}", config.api_base_url));
        }
        ConfigCommands::SetTimeout { seconds } => {
            config.request_timeout = (seconds > 0).then(|| Duration::from_secs(seconds));
            config.save(&ecotrack_dir)?;
            output::success("Tiempo de espera actualizado.");
        }
    }

    Ok(())
}
