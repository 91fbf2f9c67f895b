//! Single-prediction requests.

use af_catalog::{ActuatorDef, Catalog, FluidDef};
use af_engine::{Actuator, Fluid, PredictionEngine, PredictionResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::catalog_service::{resolve_actuator, resolve_fluid};
use crate::error::{AppError, AppResult};

/// A prediction request as received from a caller.
///
/// Actuator and fluid are each given either by catalog id or inline as a full
/// record, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actuator_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actuator: Option<ActuatorDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fluid_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fluid: Option<FluidDef>,
    #[serde(rename = "pressure_bar")]
    pub pressure_bar: f64,
}

impl PredictionRequest {
    pub fn by_id(actuator_id: &str, fluid_id: &str, pressure_bar: f64) -> Self {
        Self {
            actuator_id: Some(actuator_id.to_string()),
            actuator: None,
            fluid_id: Some(fluid_id.to_string()),
            fluid: None,
            pressure_bar,
        }
    }

    pub fn resolve_actuator(&self, catalog: &Catalog) -> AppResult<Actuator> {
        match (&self.actuator_id, &self.actuator) {
            (Some(id), None) => resolve_actuator(catalog, id),
            (None, Some(def)) => Ok(Actuator::try_from(def)?),
            (Some(_), Some(_)) => Err(AppError::InvalidInput(
                "give either actuatorId or actuator, not both".to_string(),
            )),
            (None, None) => Err(AppError::InvalidInput(
                "request names no actuator".to_string(),
            )),
        }
    }

    pub fn resolve_fluid(&self, catalog: &Catalog) -> AppResult<Fluid> {
        match (&self.fluid_id, &self.fluid) {
            (Some(id), None) => resolve_fluid(catalog, id),
            (None, Some(def)) => Ok(Fluid::try_from(def)?),
            (Some(_), Some(_)) => Err(AppError::InvalidInput(
                "give either fluidId or fluid, not both".to_string(),
            )),
            (None, None) => Err(AppError::InvalidInput("request names no fluid".to_string())),
        }
    }
}

/// Read a JSON request file.
pub fn load_request(path: &Path) -> AppResult<PredictionRequest> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| AppError::InvalidInput(format!("Failed to parse request JSON: {e}")))
}

/// Resolve a request against the catalog and run one prediction.
pub fn predict_request(
    catalog: &Catalog,
    request: &PredictionRequest,
    engine: &PredictionEngine,
) -> AppResult<PredictionResult> {
    let actuator = request.resolve_actuator(catalog)?;
    let fluid = request.resolve_fluid(catalog)?;
    let result = engine.predict(&actuator, &fluid, request.pressure_bar)?;

    tracing::info!(
        actuator = %actuator.id,
        fluid = %fluid.id,
        pressure_bar = request.pressure_bar,
        score = result.compatibility_score,
        "prediction complete"
    );
    Ok(result)
}
