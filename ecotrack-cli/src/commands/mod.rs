//! CLI command implementations

pub mod config;
pub mod emissions;
pub mod favorites;
pub mod login;
pub mod logout;
pub mod open;
pub mod register;
pub mod scan;
pub mod status;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use ecotrack_core::ports::Confirmer;
use ecotrack_core::EcotrackContext;

/// Get the Ecotrack directory from environment or default
pub fn get_ecotrack_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("ECOTRACK_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".ecotrack"))
}

/// Build the Ecotrack context
pub fn get_context() -> Result<EcotrackContext> {
    let ecotrack_dir = get_ecotrack_dir()?;
    EcotrackContext::new(&ecotrack_dir).context("Failed to initialize Ecotrack context")
}

/// Whether prompts can be shown
pub fn interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}

/// Use the flag value, else prompt when interactive, else leave empty
///
/// Empty fields reach the controller, which rejects them with its own message.
pub fn text_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if interactive() => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
        None => Ok(String::new()),
    }
}

/// Like `text_or_prompt`, with hidden input
pub fn password_or_prompt(value: Option<String>) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None if interactive() => Ok(Password::new()
            .with_prompt("Contraseña")
            .allow_empty_password(true)
            .interact()?),
        None => Ok(String::new()),
    }
}

/// Cancels a view's request on Ctrl-C or when the configured timeout elapses
pub struct Deadline {
    handle: JoinHandle<()>,
}

impl Deadline {
    pub fn arm(token: CancellationToken, timeout: Option<Duration>) -> Self {
        let handle = tokio::spawn(async move {
            let elapsed = async {
                match timeout {
                    Some(t) => tokio::time::sleep(t).await,
                    None => std::future::pending::<()>().await,
                }
            };
            tokio::select! {
                _ = tokio::signal::ctrl_c() => debug!("interrupted"),
                _ = elapsed => debug!(?timeout, "request deadline reached"),
            }
            token.cancel();
        });
        Self { handle }
    }
}

impl Drop for Deadline {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Confirmation through a terminal prompt
///
/// `--force` answers yes. Without a terminal the answer is no.
pub struct PromptConfirmer {
    pub force: bool,
}

impl Confirmer for PromptConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        if self.force {
            return true;
        }
        if !interactive() {
            return false;
        }
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}
