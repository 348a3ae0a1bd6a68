//! Landing page controller

use std::sync::Arc;

use serde::Serialize;

use super::view::{View, ViewState};
use crate::domain::result::Result;
use crate::domain::Session;
use crate::ports::{ApiRequest, ResourceClient, SessionStore};

/// What the landing page shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Home {
    pub session: Session,
    /// Welcome message of the API root, proving it is reachable
    pub api_message: Option<String>,
}

pub struct HomeController {
    client: Arc<dyn ResourceClient>,
    sessions: Arc<dyn SessionStore>,
    view: View<Home>,
}

impl HomeController {
    pub fn new(client: Arc<dyn ResourceClient>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            sessions,
            view: View::new("home"),
        }
    }

    pub fn view(&self) -> &View<Home> {
        &self.view
    }

    pub fn state(&self) -> &ViewState<Home> {
        self.view.state()
    }

    /// Session as stored right now. Never fails.
    pub fn session(&self) -> Session {
        self.sessions.get()
    }

    /// Read the session and probe the API root
    pub async fn load(&mut self) -> Result<Home> {
        let session = self.sessions.get();
        let request = ApiRequest::get(std::iter::empty::<&str>())
            .fallback("El servidor de Ecotrack no responde");

        let payload = self.view.run(self.client.request(request)).await?;
        let home = Home {
            session,
            api_message: payload
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
        };

        self.view.succeed(home.clone());
        Ok(home)
    }
}
