//! Regional CO2 emission query results

use serde::{Deserialize, Serialize};

use super::ids::deserialize_id;

/// One emission figure for a region and year. Query result only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub year: String,
    /// The original API calls this `region_name`
    #[serde(alias = "region_name")]
    pub region: String,
    #[serde(default)]
    pub total_co2_tonnes: Option<f64>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Shown instead of a total when the server has none (missing or zero)
pub const NO_EMISSIONS_DATA: &str =
    "No se encontraron datos de emisiones para el año y la región seleccionados.";

impl EmissionRecord {
    /// Total rendered for display, e.g. `123.46 toneladas`
    ///
    /// A zero total counts as no data.
    pub fn formatted_total(&self) -> Option<String> {
        self.total_co2_tonnes
            .filter(|t| *t != 0.0)
            .map(format_tonnes)
    }

    /// Total, or the no-data sentence
    pub fn total_or_no_data(&self) -> String {
        self.formatted_total()
            .unwrap_or_else(|| NO_EMISSIONS_DATA.to_string())
    }
}

/// Input of the emissions view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmissionsQuery {
    pub year: String,
    pub region: String,
}

impl EmissionsQuery {
    pub fn new(year: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            region: region.into(),
        }
    }
}

pub fn format_tonnes(tonnes: f64) -> String {
    format!("{:.2} toneladas", tonnes)
}
