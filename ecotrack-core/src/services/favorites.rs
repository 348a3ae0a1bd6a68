//! Favorites page controller
//!
//! The list is fetched fresh on every `load`. Additions are not merged into
//! the local list; removals are, by filtering on the barcode.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use tracing::info;

use super::view::{require_fields, View, ViewState};
use crate::domain::result::{Error, Result};
use crate::domain::{FavoriteEntry, Session};
use crate::ports::{ApiRequest, Confirmer, ResourceClient, SessionStore};

/// Prompt shown before a favorite is deleted
pub const REMOVE_PROMPT: &str =
    "¿Estás seguro de que quieres eliminar este producto de tus favoritos?";

/// Result of a remove request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RemoveOutcome {
    /// Deleted on the server and dropped from the local list
    Removed { message: String },
    /// The user said no; nothing was sent
    Declined,
}

pub struct FavoritesController {
    client: Arc<dyn ResourceClient>,
    sessions: Arc<dyn SessionStore>,
    list: View<Vec<FavoriteEntry>>,
    action: View<String>,
}

impl FavoritesController {
    pub fn new(client: Arc<dyn ResourceClient>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            sessions,
            list: View::new("favorites"),
            action: View::new("favorites-action"),
        }
    }

    /// The favorites list
    pub fn list(&self) -> &View<Vec<FavoriteEntry>> {
        &self.list
    }

    /// Last add/remove outcome (confirmation message or error)
    pub fn action(&self) -> &View<String> {
        &self.action
    }

    pub fn state(&self) -> &ViewState<Vec<FavoriteEntry>> {
        self.list.state()
    }

    /// Entries currently displayed
    pub fn entries(&self) -> &[FavoriteEntry] {
        self.list.value().map(Vec::as_slice).unwrap_or(&[])
    }

    fn session_user_id(&self) -> Option<String> {
        self.sessions.get().user_id().map(str::to_string)
    }

    /// Fetch the logged-in user's favorites
    pub async fn load(&mut self) -> Result<Vec<FavoriteEntry>> {
        let Some(user_id) = self.session_user_id() else {
            return Err(self.list.fail(Error::not_logged_in(
                "Debes iniciar sesión para ver tus favoritos.",
            )));
        };

        let request = ApiRequest::get(["api", "users", user_id.as_str(), "favorites"])
            .fallback("Error al cargar los favoritos");

        let payload = self.list.run(self.client.request(request)).await?;
        let entries: Vec<FavoriteEntry> = match serde_json::from_value(payload) {
            Ok(entries) => entries,
            Err(e) => {
                return Err(self.list.fail(Error::parse(format!(
                    "Respuesta inesperada al cargar los favoritos: {}",
                    e
                ))))
            }
        };

        info!(count = entries.len(), "favorites loaded");
        self.list.succeed(entries.clone());
        Ok(entries)
    }

    /// Save a product to the logged-in user's favorites
    pub async fn add(&mut self, barcode: &str) -> Result<String> {
        let Some(user_id) = self.session_user_id() else {
            return Err(self.action.fail(Error::not_logged_in(
                "Debes iniciar sesión para añadir favoritos.",
            )));
        };
        if let Err(e) = require_fields(&[barcode], "Por favor, introduce un código de barras.") {
            return Err(self.action.fail(e));
        }

        let request = ApiRequest::post(["api", "users", user_id.as_str(), "favorites"])
            .json(json!({ "barcode": barcode.trim() }))
            .fallback("Error al añadir el producto a favoritos");

        let payload = self.action.run(self.client.request(request)).await?;
        let message = server_message(&payload).unwrap_or_else(|| {
            "Producto añadido a favoritos.".to_string()
        });

        info!(barcode = %barcode.trim(), "favorite added");
        self.action.succeed(message.clone());
        Ok(message)
    }

    /// Delete a favorite after the user confirms
    ///
    /// On success exactly the entries with `barcode` leave the local list;
    /// the list is not refetched.
    pub async fn remove(
        &mut self,
        barcode: &str,
        confirmer: &dyn Confirmer,
    ) -> Result<RemoveOutcome> {
        let Some(user_id) = self.session_user_id() else {
            return Err(self.action.fail(Error::not_logged_in(
                "Debes iniciar sesión para eliminar favoritos.",
            )));
        };
        if let Err(e) = require_fields(&[barcode], "Por favor, indica el código de barras.") {
            return Err(self.action.fail(e));
        }
        let barcode = barcode.trim();

        if !confirmer.confirm(REMOVE_PROMPT) {
            return Ok(RemoveOutcome::Declined);
        }

        let request = ApiRequest::delete(["api", "users", user_id.as_str(), "favorites", barcode])
            .fallback("Error al eliminar el producto de favoritos");

        let payload = self.action.run(self.client.request(request)).await?;

        if let Some(entries) = self.list.value_mut() {
            entries.retain(|entry| entry.barcode != barcode);
        }
        let message = server_message(&payload)
            .unwrap_or_else(|| "Producto eliminado de favoritos.".to_string());

        info!(barcode = %barcode, "favorite removed");
        self.action.succeed(message.clone());
        Ok(RemoveOutcome::Removed { message })
    }

    /// Session as read at mount time, for rendering hints
    pub fn session(&self) -> Session {
        self.sessions.get()
    }
}

fn server_message(payload: &serde_json::Value) -> Option<String> {
    payload
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
