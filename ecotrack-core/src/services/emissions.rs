//! Emissions page controller

use std::sync::Arc;

use super::view::{require_fields, View, ViewState};
use crate::domain::result::{Error, Result};
use crate::domain::{EmissionRecord, EmissionsQuery};
use crate::ports::{ApiRequest, ResourceClient};

/// Years offered by the emissions form
pub const AVAILABLE_YEARS: [&str; 4] = ["2020", "2021", "2022", "2023"];

pub struct EmissionsController {
    client: Arc<dyn ResourceClient>,
    view: View<EmissionRecord>,
}

impl EmissionsController {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self {
            client,
            view: View::new("emissions"),
        }
    }

    pub fn view(&self) -> &View<EmissionRecord> {
        &self.view
    }

    pub fn state(&self) -> &ViewState<EmissionRecord> {
        self.view.state()
    }

    pub fn reset(&mut self) {
        self.view.reset();
    }

    /// Query the CO2 total for a region and year. No login needed.
    pub async fn query(&mut self, query: &EmissionsQuery) -> Result<EmissionRecord> {
        if let Err(e) = require_fields(
            &[query.year.as_str(), query.region.as_str()],
            "Por favor, selecciona un año y una región.",
        ) {
            return Err(self.view.fail(e));
        }

        let request = ApiRequest::get(["api", "emissions"])
            .query("year", query.year.trim())
            .query("region", query.region.trim())
            .fallback("Error al obtener datos de emisiones");

        let payload = self.view.run(self.client.request(request)).await?;
        let record: EmissionRecord = match serde_json::from_value(payload) {
            Ok(r) => r,
            Err(e) => {
                return Err(self.view.fail(Error::parse(format!(
                    "Respuesta inesperada al buscar emisiones: {}",
                    e
                ))))
            }
        };

        self.view.succeed(record.clone());
        Ok(record)
    }
}
