//! Catalog loading, validation and record resolution.

use af_catalog::Catalog;
use af_engine::{Actuator, Fluid};
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Summary of a loaded catalog for listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub name: String,
    pub version: u32,
    pub actuator_count: usize,
    pub fluid_count: usize,
}

/// Load a YAML or JSON catalog; format follows the file extension.
pub fn load_catalog(path: &Path) -> AppResult<Catalog> {
    let catalog = af_catalog::load(path)?;
    tracing::info!(
        path = %path.display(),
        actuators = catalog.actuators.len(),
        fluids = catalog.fluids.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

/// Structural checks, then check that every record converts into a usable
/// engine value.
///
/// All failing records are reported together, one per `; `-separated entry.
pub fn validate_catalog(catalog: &Catalog) -> AppResult<CatalogSummary> {
    af_catalog::validate_catalog(catalog).map_err(|e| AppError::Validation(e.to_string()))?;

    let mut problems = Vec::new();

    if catalog.actuators.is_empty() {
        problems.push("catalog must define at least one actuator".to_string());
    }
    for def in &catalog.actuators {
        if let Err(e) = Actuator::try_from(def) {
            problems.push(e.to_string());
        }
    }
    for def in &catalog.fluids {
        if let Err(e) = Fluid::try_from(def) {
            problems.push(e.to_string());
        }
    }

    if !problems.is_empty() {
        return Err(AppError::Validation(problems.join("; ")));
    }

    Ok(summarize(catalog))
}

pub fn summarize(catalog: &Catalog) -> CatalogSummary {
    CatalogSummary {
        name: catalog.name.clone(),
        version: catalog.version,
        actuator_count: catalog.actuators.len(),
        fluid_count: catalog.fluids.len(),
    }
}

pub fn resolve_actuator(catalog: &Catalog, actuator_id: &str) -> AppResult<Actuator> {
    let def = catalog
        .actuator(actuator_id)
        .ok_or_else(|| AppError::ActuatorNotFound(actuator_id.to_string()))?;
    Ok(Actuator::try_from(def)?)
}

pub fn resolve_fluid(catalog: &Catalog, fluid_id: &str) -> AppResult<Fluid> {
    let def = catalog
        .fluid(fluid_id)
        .ok_or_else(|| AppError::FluidNotFound(fluid_id.to_string()))?;
    Ok(Fluid::try_from(def)?)
}
