//! Product scanner page controller

use std::sync::Arc;

use tracing::debug;

use super::view::{require_fields, View, ViewState};
use crate::domain::result::{Error, Result};
use crate::domain::Product;
use crate::ports::{ApiRequest, ResourceClient, SessionStore};

pub struct ProductScannerController {
    client: Arc<dyn ResourceClient>,
    sessions: Arc<dyn SessionStore>,
    view: View<Product>,
}

impl ProductScannerController {
    pub fn new(client: Arc<dyn ResourceClient>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            client,
            sessions,
            view: View::new("scan-product"),
        }
    }

    pub fn view(&self) -> &View<Product> {
        &self.view
    }

    pub fn state(&self) -> &ViewState<Product> {
        self.view.state()
    }

    pub fn reset(&mut self) {
        self.view.reset();
    }

    /// Look a product up by barcode. Needs a logged-in user.
    pub async fn lookup(&mut self, barcode: &str) -> Result<Product> {
        if !self.sessions.get().is_authenticated() {
            return Err(self.view.fail(Error::not_logged_in(
                "Debes iniciar sesión para buscar productos.",
            )));
        }
        if let Err(e) = require_fields(&[barcode], "Por favor, introduce un código de barras.") {
            return Err(self.view.fail(e));
        }

        let request = ApiRequest::get(["api", "products", "search"])
            .query("barcode", barcode.trim())
            .fallback("Error al buscar el producto");

        let payload = self.view.run(self.client.request(request)).await?;
        let product: Product = match serde_json::from_value(payload) {
            Ok(p) => p,
            Err(e) => {
                return Err(self.view.fail(Error::parse(format!(
                    "Respuesta inesperada al buscar el producto: {}",
                    e
                ))))
            }
        };

        debug!(barcode = %product.barcode, "product found");
        self.view.succeed(product.clone());
        Ok(product)
    }
}
