//! Prediction engine errors.

use af_core::AfError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while predicting spray behaviour.
///
/// Every variant is raised before any physics is reported; the engine never
/// hands back a partially filled result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Missing rheology parameters, or a physical property that is not
    /// strictly positive and finite.
    #[error("Invalid fluid parameters for '{fluid}': {reason}")]
    InvalidFluidParameters { fluid: String, reason: String },

    /// Orifice, rated pressure or swirl geometry out of range.
    #[error("Invalid actuator geometry for '{actuator}': {reason}")]
    InvalidActuatorGeometry { actuator: String, reason: String },

    #[error("Invalid operating pressure: {value} bar")]
    InvalidOperatingPressure { value: f64 },

    #[error("Invalid calibration: {what}")]
    InvalidCalibration { what: String },

    /// Internal guard; a finite input set should never trip it.
    #[error("Non-finite value for {what}")]
    NonFinite { what: &'static str },
}

impl EngineError {
    pub(crate) fn fluid(id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidFluidParameters {
            fluid: id.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn actuator(id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidActuatorGeometry {
            actuator: id.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<AfError> for EngineError {
    fn from(err: AfError) -> Self {
        match err {
            AfError::NonFinite { what, .. } | AfError::NonPositive { what, .. } => {
                EngineError::NonFinite { what }
            }
        }
    }
}
