//! Shared application service layer for atomflow.
//!
//! Wraps the catalog and the prediction engine behind the operations the CLI
//! (and any other frontend) needs: catalog loading and validation, single
//! predictions, catalog ranking, comparison and pressure sweeps.

pub mod calibration;
pub mod catalog_service;
pub mod error;
pub mod ranking;
pub mod request;
pub mod sweep;

// Re-export key types for convenience
pub use calibration::{build_engine, load_calibration};
pub use catalog_service::{
    CatalogSummary, load_catalog, resolve_actuator, resolve_fluid, summarize, validate_catalog,
};
pub use error::{AppError, AppResult};
pub use ranking::{RankedActuator, Ranking, SkippedActuator, compare_actuators, rank_actuators};
pub use request::{PredictionRequest, load_request, predict_request};
pub use sweep::{linear_pressures, sweep_pressure};
