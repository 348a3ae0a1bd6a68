//! Configuration management
//!
//! Settings live in `settings.json` in the Ecotrack directory:
//! ```json
//! {
//!   "api": { "baseUrl": "http://localhost:5000", "timeoutSecs": 30 }
//! }
//! ```
//! Keys the client does not manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::DEFAULT_BASE_URL;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "ECOTRACK_API_URL";

const SETTINGS_FILENAME: &str = "settings.json";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Ecotrack configuration (simplified view of settings)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    /// Deadline the front end imposes on each request. The client itself has none.
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl Config {
    /// Load config from the Ecotrack directory
    ///
    /// The API URL can be overridden with `ECOTRACK_API_URL` (for CI/testing).
    pub fn load(ecotrack_dir: &Path) -> Result<Self> {
        let raw = read_settings(ecotrack_dir)?;

        let file_url = raw
            .api
            .base_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_base_url = match std::env::var(API_URL_ENV).ok() {
            Some(url) if !url.trim().is_empty() => url,
            _ => file_url,
        };

        Ok(Self {
            api_base_url,
            request_timeout: raw
                .api
                .timeout_secs
                .filter(|s| *s > 0)
                .map(Duration::from_secs),
        })
    }

    /// Save config to the Ecotrack directory
    /// Preserves other settings that the client doesn't manage
    ///
    /// A URL that only came from `ECOTRACK_API_URL` is not written back.
    pub fn save(&self, ecotrack_dir: &Path) -> Result<()> {
        let mut settings = read_settings(ecotrack_dir)?;

        let from_env =
            std::env::var(API_URL_ENV).ok().as_deref() == Some(self.api_base_url.as_str());
        if !from_env {
            settings.api.base_url = Some(self.api_base_url.clone());
        }
        settings.api.timeout_secs = self.request_timeout.map(|d| d.as_secs());

        std::fs::create_dir_all(ecotrack_dir)
            .with_context(|| format!("Failed to create {}", ecotrack_dir.display()))?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(ecotrack_dir.join(SETTINGS_FILENAME), content)?;
        Ok(())
    }
}

fn read_settings(ecotrack_dir: &Path) -> Result<SettingsFile> {
    let settings_path = ecotrack_dir.join(SETTINGS_FILENAME);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}
