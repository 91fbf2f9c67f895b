//! af-engine: fluid–actuator atomization prediction.
//!
//! A closed-form surrogate in three forward stages:
//! - rheology: apparent viscosity at the orifice shear rate
//! - spray physics: velocity, flow, Re/We/Oh, cone and droplet sizes
//! - risk and scoring: regime, clogging, material stress, warnings, score
//!
//! The engine is pure. It takes resolved [`Actuator`] and [`Fluid`] values and
//! never touches catalog storage; id lookup belongs to the caller.
//!
//! ```no_run
//! use af_catalog::SolventClass;
//! use af_engine::{Fluid, predict};
//! # fn actuator() -> af_engine::Actuator { unimplemented!() }
//!
//! let water = Fluid::newtonian("water", 1.0, 998.0, 72.8, SolventClass::Aqueous);
//! let result = predict(&actuator(), &water, 5.0).unwrap();
//! println!("{} -> {}", result.atomization_regime.label(), result.compatibility_score);
//! ```

pub mod calibration;
pub mod error;
pub mod model;
pub mod predict;
pub mod regime;
pub mod rheology;
pub mod risk;
pub mod score;
pub mod spray;
pub mod warnings;

pub use calibration::{
    Calibration, CloggingThresholds, ConeCalibration, DischargeCalibration, DropletCalibration,
    KindProfile, KindProfiles, RegimeThresholds, SafetyCalibration, ScoreWeights,
};
pub use error::{EngineError, EngineResult};
pub use model::{Actuator, Fluid, MAX_FLOW_INDEX, Rheology, TechnicalDesign};
pub use predict::{PredictionEngine, PredictionResult, predict};
pub use regime::{AtomizationRegime, classify_regime};
pub use rheology::{ShearEstimate, resolve_apparent_viscosity};
pub use risk::{CloggingRisk, MaterialStress, assess_clogging, assess_material_stress};
pub use score::{ScoreBand, compatibility_score};
pub use spray::{
    DropletDistribution, FlowEstimate, SprayPhysics, compute_spray_physics, estimate_flow,
    exit_velocity,
};
pub use warnings::build_warnings;
