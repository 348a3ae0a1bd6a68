//! Login page controller, plus logout

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::view::{require_fields, View, ViewState};
use crate::domain::result::{Error, Result};
use crate::domain::{id_from_value, LoginForm, Session};
use crate::ports::{ApiRequest, ResourceClient, SessionStore};
use crate::routes::Route;

/// Outcome of a successful login
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedIn {
    pub session: Session,
    pub next: Route,
}

pub struct LoginController {
    client: Arc<dyn ResourceClient>,
    sessions: Arc<dyn SessionStore>,
    view: View<LoggedIn>,
}

impl LoginController {
    pub fn new(client: Arc<dyn ResourceClient>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            sessions,
            view: View::new("login"),
        }
    }

    pub fn view(&self) -> &View<LoggedIn> {
        &self.view
    }

    pub fn state(&self) -> &ViewState<LoggedIn> {
        self.view.state()
    }

    pub fn reset(&mut self) {
        self.view.reset();
    }

    /// Log in and remember the user id with the submitted username
    pub async fn submit(&mut self, form: &LoginForm) -> Result<LoggedIn> {
        if let Err(e) = require_fields(
            &[form.username.as_str(), form.password.as_str()],
            "Por favor, introduce tu nombre de usuario y tu contraseña.",
        ) {
            return Err(self.view.fail(e));
        }

        let body = serde_json::to_value(form)?;
        let request = ApiRequest::post(["api", "users", "login"])
            .json(body)
            .fallback("Error en el inicio de sesión");

        let payload = self.view.run(self.client.request(request)).await?;

        let user_id = match payload.get("user_id").and_then(id_from_value) {
            Some(id) => id,
            None => {
                return Err(self.view.fail(Error::parse(
                    "La respuesta del servidor no incluye el identificador de usuario.",
                )))
            }
        };
        if let Err(e) = self.sessions.set(&user_id, &form.username) {
            return Err(self.view.fail(e));
        }

        info!(user_id = %user_id, "logged in");
        let logged_in = LoggedIn {
            session: Session::authenticated(user_id, form.username.clone()),
            next: Route::Home,
        };
        self.view.succeed(logged_in.clone());
        Ok(logged_in)
    }

    /// Forget the current user and go back to the landing page
    pub fn logout(&mut self) -> Result<Route> {
        self.sessions.clear()?;
        self.view.reset();
        info!("logged out");
        Ok(Route::Home)
    }
}
