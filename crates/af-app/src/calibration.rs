//! Calibration file loading.

use af_engine::{Calibration, PredictionEngine};
use std::path::Path;

use crate::error::{AppError, AppResult};

enum Format {
    Yaml,
    Json,
}

/// Load a calibration override file (`.yaml`/`.yml` or `.json`).
///
/// Sections and fields absent from the file keep their compiled-in values.
pub fn load_calibration(path: &Path) -> AppResult<Calibration> {
    let format = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Format::Yaml,
        Some("json") => Format::Json,
        _ => {
            return Err(AppError::Calibration(format!(
                "Unsupported calibration format: {}",
                path.display()
            )));
        }
    };

    let content = std::fs::read_to_string(path).map_err(|e| AppError::CalibrationFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let calibration: Calibration = match format {
        Format::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| AppError::Calibration(format!("Failed to parse calibration YAML: {e}")))?,
        Format::Json => serde_json::from_str(&content)
            .map_err(|e| AppError::Calibration(format!("Failed to parse calibration JSON: {e}")))?,
    };

    calibration.validate()?;
    tracing::info!(path = %path.display(), "calibration loaded");
    Ok(calibration)
}

/// Engine from an optional calibration file, falling back to the defaults.
pub fn build_engine(calibration_path: Option<&Path>) -> AppResult<PredictionEngine> {
    let calibration = match calibration_path {
        Some(path) => load_calibration(path)?,
        None => Calibration::default(),
    };
    Ok(PredictionEngine::new(calibration)?)
}
