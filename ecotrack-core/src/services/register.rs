//! Register page controller

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::info;

use super::view::{require_fields, View, ViewState};
use crate::domain::result::Result;
use crate::domain::RegistrationForm;
use crate::ports::{ApiRequest, ResourceClient};
use crate::routes::Route;

/// Outcome of a successful registration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registered {
    /// Confirmation from the server, when it sent one
    pub message: Option<String>,
    /// Registration never logs in; the user is sent to the login page
    pub next: Route,
}

pub struct RegisterController {
    client: Arc<dyn ResourceClient>,
    view: View<Registered>,
}

impl RegisterController {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self {
            client,
            view: View::new("register"),
        }
    }

    pub fn view(&self) -> &View<Registered> {
        &self.view
    }

    pub fn state(&self) -> &ViewState<Registered> {
        self.view.state()
    }

    pub fn reset(&mut self) {
        self.view.reset();
    }

    pub async fn submit(&mut self, form: &RegistrationForm) -> Result<Registered> {
        if let Err(e) = require_fields(
            &[form.username.as_str(), form.email.as_str(), form.password.as_str()],
            "Por favor, completa el nombre de usuario, el email y la contraseña.",
        ) {
            return Err(self.view.fail(e));
        }

        let request = ApiRequest::post(["api", "users", "register"])
            .json(json!({
                "username": form.username,
                "email": form.email,
                "password": form.password,
            }))
            .fallback("Error en el registro");

        let payload = self.view.run(self.client.request(request)).await?;

        let registered = Registered {
            message: payload
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            next: Route::Login,
        };
        info!(username = %form.username, "user registered");

        self.view.succeed(registered.clone());
        Ok(registered)
    }
}
