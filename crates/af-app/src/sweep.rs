//! Linear operating-pressure sweeps.

use af_core::{Tolerances, ensure_positive, nearly_equal};
use af_engine::{Actuator, Fluid, PredictionEngine, PredictionResult};

use crate::error::{AppError, AppResult};

/// Evenly spaced pressures from `start_bar` to `end_bar`, both included.
pub fn linear_pressures(start_bar: f64, end_bar: f64, points: usize) -> AppResult<Vec<f64>> {
    if points < 2 {
        return Err(AppError::InvalidInput(
            "Sweep must have at least 2 points".to_string(),
        ));
    }
    for (what, p) in [("sweep start pressure", start_bar), ("sweep end pressure", end_bar)] {
        ensure_positive(p, what).map_err(|e| AppError::InvalidInput(e.to_string()))?;
    }
    if nearly_equal(start_bar, end_bar, Tolerances::default()) {
        return Err(AppError::InvalidInput(
            "Start and end pressures must be different".to_string(),
        ));
    }

    let step = (end_bar - start_bar) / (points - 1) as f64;
    Ok((0..points)
        .map(|i| {
            if i == points - 1 {
                end_bar
            } else {
                start_bar + step * i as f64
            }
        })
        .collect())
}

/// One prediction per pressure of a linear sweep.
pub fn sweep_pressure(
    actuator: &Actuator,
    fluid: &Fluid,
    start_bar: f64,
    end_bar: f64,
    points: usize,
    engine: &PredictionEngine,
) -> AppResult<Vec<PredictionResult>> {
    let pressures = linear_pressures(start_bar, end_bar, points)?;
    let results = pressures
        .into_iter()
        .map(|p| engine.predict(actuator, fluid, p))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(
        actuator = %actuator.id,
        fluid = %fluid.id,
        start_bar,
        end_bar,
        points,
        "pressure sweep complete"
    );
    Ok(results)
}
