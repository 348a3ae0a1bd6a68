//! Ecotrack Core - client logic for the Ecotrack sustainability tracker
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Session, products, favorites, emission records, errors
//! - **ports**: Traits for the outside world (ResourceClient, SessionStore, Confirmer)
//! - **services**: One controller per page, driving the view state machine
//! - **adapters**: Concrete implementations (reqwest client, session file)
//! - **routes**: Path to page mapping used for navigation

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod routes;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::{FileSessionStore, HttpResourceClient};
use config::Config;
use ports::{ResourceClient, SessionStore};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, ErrorKind, OperationResult};
pub use domain::{
    EmissionRecord, EmissionsQuery, FavoriteEntry, LoginForm, Product, RegistrationForm, Session,
};
pub use routes::Route;

/// Main context for Ecotrack operations
///
/// Holds the configuration and the two shared collaborators, and hands out
/// page controllers wired to them.
pub struct EcotrackContext {
    pub config: Config,
    pub sessions: Arc<dyn SessionStore>,
    pub client: Arc<dyn ResourceClient>,
}

impl EcotrackContext {
    /// Create a context backed by `<ecotrack_dir>/settings.json` and
    /// `<ecotrack_dir>/session.json`
    pub fn new(ecotrack_dir: &Path) -> Result<Self> {
        let config = Config::load(ecotrack_dir)?;
        let client = HttpResourceClient::new(&config.api_base_url)?;
        let sessions = FileSessionStore::new(ecotrack_dir);

        Ok(Self::with_parts(config, Arc::new(sessions), Arc::new(client)))
    }

    /// Assemble a context from already-built parts (tests, embedders)
    pub fn with_parts(
        config: Config,
        sessions: Arc<dyn SessionStore>,
        client: Arc<dyn ResourceClient>,
    ) -> Self {
        Self {
            config,
            sessions,
            client,
        }
    }

    pub fn session(&self) -> Session {
        self.sessions.get()
    }

    pub fn home(&self) -> HomeController {
        HomeController::new(Arc::clone(&self.client), Arc::clone(&self.sessions))
    }

    pub fn register(&self) -> RegisterController {
        RegisterController::new(Arc::clone(&self.client))
    }

    pub fn login(&self) -> LoginController {
        LoginController::new(Arc::clone(&self.client), Arc::clone(&self.sessions))
    }

    pub fn product_scanner(&self) -> ProductScannerController {
        ProductScannerController::new(Arc::clone(&self.client), Arc::clone(&self.sessions))
    }

    pub fn favorites(&self) -> FavoritesController {
        FavoritesController::new(Arc::clone(&self.client), Arc::clone(&self.sessions))
    }

    pub fn emissions(&self) -> EmissionsController {
        EmissionsController::new(Arc::clone(&self.client))
    }
}
