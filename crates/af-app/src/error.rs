//! Error types for the af-app service layer.

use af_engine::EngineError;
use std::path::PathBuf;

/// Application error shared by every frontend.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Catalog validation failed: {0}")]
    Validation(String),

    #[error("Actuator not found: {0}")]
    ActuatorNotFound(String),

    #[error("Fluid not found: {0}")]
    FluidNotFound(String),

    #[error("Failed to read calibration file: {path}")]
    CalibrationFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Calibration error: {0}")]
    Calibration(String),

    #[error("Invalid request: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for af-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<af_catalog::CatalogError> for AppError {
    fn from(err: af_catalog::CatalogError) -> Self {
        AppError::Catalog(err.to_string())
    }
}
