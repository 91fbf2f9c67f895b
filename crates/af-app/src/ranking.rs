//! Full-catalog ranking and side-by-side comparison.

use af_catalog::Catalog;
use af_engine::{Actuator, EngineError, Fluid, PredictionEngine, PredictionResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::catalog_service::resolve_actuator;
use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedActuator {
    /// 1-based position after sorting
    pub rank: usize,
    pub actuator_name: String,
    pub result: PredictionResult,
}

/// An actuator the engine refused for this fluid, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedActuator {
    pub actuator_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub fluid_id: String,
    #[serde(rename = "pressure_bar")]
    pub pressure_bar: f64,
    pub entries: Vec<RankedActuator>,
    pub skipped: Vec<SkippedActuator>,
}

impl Ranking {
    pub fn top(&self, n: usize) -> &[RankedActuator] {
        &self.entries[..n.min(self.entries.len())]
    }
}

/// Predict `fluid` against every catalog actuator and order by score.
///
/// Predictions run in parallel; output order is fixed afterwards by score
/// (descending) then actuator id (ascending). Actuators that fail to convert
/// or predict are reported in `skipped`, sorted by id.
pub fn rank_actuators(
    catalog: &Catalog,
    fluid: &Fluid,
    pressure_bar: f64,
    engine: &PredictionEngine,
) -> AppResult<Ranking> {
    if !pressure_bar.is_finite() || pressure_bar <= 0.0 {
        return Err(EngineError::InvalidOperatingPressure {
            value: pressure_bar,
        }
        .into());
    }
    fluid.validate()?;

    let outcomes: Vec<(String, String, Result<PredictionResult, EngineError>)> = catalog
        .actuators
        .par_iter()
        .map(|def| {
            let outcome = Actuator::try_from(def)
                .and_then(|actuator| engine.predict(&actuator, fluid, pressure_bar));
            (def.id.clone(), def.name.clone(), outcome)
        })
        .collect();

    let mut ranked = Vec::new();
    let mut skipped = Vec::new();
    for (actuator_id, actuator_name, outcome) in outcomes {
        match outcome {
            Ok(result) => ranked.push((actuator_name, result)),
            Err(err) => {
                tracing::warn!(actuator = %actuator_id, error = %err, "actuator skipped");
                skipped.push(SkippedActuator {
                    actuator_id,
                    reason: err.to_string(),
                });
            }
        }
    }

    ranked.sort_by(|(_, a), (_, b)| {
        b.compatibility_score
            .cmp(&a.compatibility_score)
            .then_with(|| a.actuator_id.cmp(&b.actuator_id))
    });
    skipped.sort_by(|a, b| a.actuator_id.cmp(&b.actuator_id));

    let entries: Vec<RankedActuator> = ranked
        .into_iter()
        .enumerate()
        .map(|(i, (actuator_name, result))| RankedActuator {
            rank: i + 1,
            actuator_name,
            result,
        })
        .collect();

    tracing::info!(
        fluid = %fluid.id,
        pressure_bar,
        ranked = entries.len(),
        skipped = skipped.len(),
        "ranking complete"
    );

    Ok(Ranking {
        fluid_id: fluid.id.clone(),
        pressure_bar,
        entries,
        skipped,
    })
}

/// Predict `fluid` against the named actuators, in the order given.
///
/// Unknown ids and engine errors fail the whole comparison.
pub fn compare_actuators(
    catalog: &Catalog,
    actuator_ids: &[String],
    fluid: &Fluid,
    pressure_bar: f64,
    engine: &PredictionEngine,
) -> AppResult<Vec<PredictionResult>> {
    let results = actuator_ids
        .iter()
        .map(|id| {
            let actuator = resolve_actuator(catalog, id)?;
            Ok(engine.predict(&actuator, fluid, pressure_bar)?)
        })
        .collect::<AppResult<Vec<_>>>()?;

    tracing::info!(
        fluid = %fluid.id,
        pressure_bar,
        actuators = results.len(),
        "comparison complete"
    );
    Ok(results)
}
