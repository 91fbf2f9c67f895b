//! End-to-end prediction: rheology, spray physics, then risk and scoring.

use crate::calibration::Calibration;
use crate::error::{EngineError, EngineResult};
use crate::model::{Actuator, Fluid, Rheology};
use crate::regime::{AtomizationRegime, classify_regime};
use crate::risk::{
    CloggingRisk, MaterialStress, assess_clogging, assess_material_stress, is_solvent_compatible,
};
use crate::score::{ScoreBand, ScoreInputs, compatibility_score};
use crate::spray::{DropletDistribution, compute_spray_physics, estimate_flow, precision};
use crate::warnings::build_warnings;
use af_core::numeric::{ensure_finite, ensure_positive, round_sig};
use af_core::units::{bar, to_cp, to_um};
use serde::{Deserialize, Serialize};

/// Outcome of one (actuator, fluid, pressure) evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub actuator_id: String,
    pub fluid_id: String,
    #[serde(rename = "pressure_bar")]
    pub pressure_bar: f64,
    #[serde(rename = "exitVelocity_m_s")]
    pub exit_velocity_m_s: f64,
    #[serde(rename = "flowRate_mL_min")]
    pub flow_rate_ml_min: f64,
    #[serde(rename = "deliveryRate_g_s")]
    pub delivery_rate_g_s: f64,
    #[serde(rename = "coneAngle_deg")]
    pub cone_angle_deg: f64,
    #[serde(rename = "sprayWidth_mm_at_100mm")]
    pub spray_width_mm: f64,
    pub droplet_distribution: DropletDistribution,
    pub reynolds_number: f64,
    pub weber_number: f64,
    pub ohnesorge_number: f64,
    #[serde(rename = "apparentViscosity_cP")]
    pub apparent_viscosity_cp: f64,
    pub atomization_regime: AtomizationRegime,
    pub clogging_risk: CloggingRisk,
    pub material_stress: MaterialStress,
    pub safety_warnings: Vec<String>,
    pub compatibility_score: u8,
    pub compatibility_band: ScoreBand,
    pub required_ppe: Vec<String>,
}

impl PredictionResult {
    fn ensure_finite(&self) -> EngineResult<()> {
        let checks = [
            (self.exit_velocity_m_s, "exit velocity"),
            (self.flow_rate_ml_min, "flow rate"),
            (self.delivery_rate_g_s, "delivery rate"),
            (self.cone_angle_deg, "cone angle"),
            (self.spray_width_mm, "spray width"),
            (self.droplet_distribution.dv10_um, "Dv10"),
            (self.droplet_distribution.dv50_um, "Dv50"),
            (self.droplet_distribution.dv90_um, "Dv90"),
            (self.droplet_distribution.span, "span"),
            (self.reynolds_number, "Reynolds number"),
            (self.weber_number, "Weber number"),
            (self.ohnesorge_number, "Ohnesorge number"),
            (self.apparent_viscosity_cp, "apparent viscosity"),
        ];
        for (value, what) in checks {
            ensure_finite(value, what)?;
        }
        Ok(())
    }
}

/// Stateless predictor bound to one calibration table.
#[derive(Debug, Clone, Default)]
pub struct PredictionEngine {
    calibration: Calibration,
}

impl PredictionEngine {
    /// Engine with a validated calibration.
    pub fn new(calibration: Calibration) -> EngineResult<Self> {
        calibration.validate()?;
        Ok(Self { calibration })
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    /// Predict spray behaviour of `fluid` through `actuator` at `pressure_bar`.
    pub fn predict(
        &self,
        actuator: &Actuator,
        fluid: &Fluid,
        pressure_bar: f64,
    ) -> EngineResult<PredictionResult> {
        ensure_positive(pressure_bar, "operating pressure").map_err(|_| {
            EngineError::InvalidOperatingPressure {
                value: pressure_bar,
            }
        })?;
        actuator.validate()?;
        fluid.validate()?;

        let cal = &self.calibration;
        let pressure = bar(pressure_bar);

        let flow = estimate_flow(actuator, fluid, pressure, cal)?;
        let physics =
            compute_spray_physics(actuator, fluid, flow.apparent_viscosity, pressure, cal)?;

        let regime = classify_regime(
            physics.reynolds_number,
            physics.weber_number,
            physics.ohnesorge_number,
            &cal.regime,
        );
        let clogging = assess_clogging(
            fluid.max_particle_size.map(to_um),
            to_um(actuator.orifice_diameter),
            &cal.clogging,
        );
        let stress = assess_material_stress(actuator, fluid, &cal.safety);
        let solvent_compatible = is_solvent_compatible(actuator, fluid);
        let over_pressure = pressure > actuator.max_pressure;

        // Nominal viscosity is reported as given; shear-dependent values keep
        // relative precision so small viscosities stay positive.
        let apparent_viscosity_cp = match fluid.rheology {
            Rheology::Newtonian => to_cp(fluid.viscosity),
            _ => round_sig(to_cp(flow.apparent_viscosity), precision::VISCOSITY_SIG),
        };

        let safety_warnings = build_warnings(
            actuator,
            fluid,
            pressure,
            solvent_compatible,
            clogging,
            &cal.safety,
        );

        let score = compatibility_score(
            &ScoreInputs {
                over_pressure,
                solvent_compatible,
                clogging,
                regime,
                profile: cal.kinds.profile(actuator.kind),
                stress,
            },
            &cal.score,
        );

        let result = PredictionResult {
            actuator_id: actuator.id.clone(),
            fluid_id: fluid.id.clone(),
            pressure_bar,
            exit_velocity_m_s: physics.exit_velocity_m_s,
            flow_rate_ml_min: physics.flow_rate_ml_min,
            delivery_rate_g_s: physics.delivery_rate_g_s,
            cone_angle_deg: physics.cone_angle_deg,
            spray_width_mm: physics.spray_width_mm,
            droplet_distribution: physics.droplets,
            reynolds_number: physics.reynolds_number,
            weber_number: physics.weber_number,
            ohnesorge_number: physics.ohnesorge_number,
            apparent_viscosity_cp,
            atomization_regime: regime,
            clogging_risk: clogging,
            material_stress: stress,
            safety_warnings,
            compatibility_score: score,
            compatibility_band: ScoreBand::from_score(score),
            required_ppe: fluid.ppe.clone(),
        };
        result.ensure_finite()?;

        tracing::debug!(
            actuator = %actuator.id,
            fluid = %fluid.id,
            pressure_bar,
            regime = regime.label(),
            score,
            warnings = result.safety_warnings.len(),
            "prediction"
        );
        Ok(result)
    }
}

/// Prediction with the compiled-in calibration.
pub fn predict(actuator: &Actuator, fluid: &Fluid, pressure_bar: f64) -> EngineResult<PredictionResult> {
    PredictionEngine::default().predict(actuator, fluid, pressure_bar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TechnicalDesign;
    use af_catalog::{ActuatorKind, Material, SolventClass};
    use af_core::units::mm;

    fn actuator() -> Actuator {
        Actuator {
            id: "sp-050".to_string(),
            name: "Spray 0.5".to_string(),
            kind: ActuatorKind::Spray,
            orifice_diameter: mm(0.5),
            swirl_chamber_angle_deg: 30.0,
            swirl_channels: 2,
            max_pressure: bar(20.0),
            compatible_solvents: [SolventClass::Aqueous, SolventClass::Alcohol]
                .into_iter()
                .collect(),
            technical_design: TechnicalDesign {
                body_material: Material::Pp,
                seal_material: Material::Epdm,
                orifice_length: None,
            },
        }
    }

    fn water() -> Fluid {
        Fluid::newtonian("water", 1.0, 998.0, 72.8, SolventClass::Aqueous)
    }

    #[test]
    fn non_positive_pressure_is_rejected() {
        for p in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let err = predict(&actuator(), &water(), p).unwrap_err();
            assert!(matches!(err, EngineError::InvalidOperatingPressure { .. }));
        }
    }

    #[test]
    fn invalid_calibration_is_rejected() {
        let mut cal = Calibration::default();
        cal.discharge.cd_min = 0.95;
        assert!(matches!(
            PredictionEngine::new(cal),
            Err(EngineError::InvalidCalibration { .. })
        ));
    }

    #[test]
    fn invalid_inputs_are_rejected_before_physics() {
        let mut a = actuator();
        a.orifice_diameter = mm(0.0);
        assert!(matches!(
            predict(&a, &water(), 5.0),
            Err(EngineError::InvalidActuatorGeometry { .. })
        ));

        let mut f = water();
        f.surface_tension = 0.0;
        assert!(matches!(
            predict(&actuator(), &f, 5.0),
            Err(EngineError::InvalidFluidParameters { .. })
        ));
    }

    #[test]
    fn result_carries_ppe_and_band() {
        let mut f = water();
        f.ppe = vec!["gloves".to_string()];
        let r = predict(&actuator(), &f, 5.0).unwrap();
        assert_eq!(r.required_ppe, vec!["gloves".to_string()]);
        assert_eq!(r.compatibility_band, ScoreBand::from_score(r.compatibility_score));
        assert_eq!(r.apparent_viscosity_cp, to_cp(water().viscosity));
    }

    #[test]
    fn newtonian_viscosity_is_reported_unrounded() {
        for nominal in [1.2345, 0.0004, 987.654_321] {
            let f = Fluid::newtonian("n", nominal, 998.0, 72.8, SolventClass::Aqueous);
            let r = predict(&actuator(), &f, 5.0).unwrap();
            assert_eq!(r.apparent_viscosity_cp, to_cp(f.viscosity));
            assert!(r.apparent_viscosity_cp > 0.0);
        }
    }

    #[test]
    fn shear_dependent_viscosity_keeps_significant_figures() {
        let f = water().with_rheology(Rheology::PowerLaw {
            flow_index: 0.5,
            consistency_pa_s_n: 1.0e-5,
        });
        let r = predict(&actuator(), &f, 5.0).unwrap();
        assert!(r.apparent_viscosity_cp > 0.0);
        assert!(r.apparent_viscosity_cp < 0.001);
    }

    #[test]
    fn json_field_names() {
        let r = predict(&actuator(), &water(), 5.0).unwrap();
        let json = serde_json::to_value(&r).unwrap();
        for key in [
            "actuatorId",
            "fluidId",
            "pressure_bar",
            "exitVelocity_m_s",
            "flowRate_mL_min",
            "deliveryRate_g_s",
            "coneAngle_deg",
            "sprayWidth_mm_at_100mm",
            "dropletDistribution",
            "reynoldsNumber",
            "weberNumber",
            "ohnesorgeNumber",
            "apparentViscosity_cP",
            "atomizationRegime",
            "cloggingRisk",
            "materialStress",
            "safetyWarnings",
            "compatibilityScore",
            "compatibilityBand",
            "requiredPpe",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json["dropletDistribution"].get("Dv50_um").is_some());
        assert!(json["materialStress"].get("stressCrackingRisk").is_some());
        assert_eq!(json["cloggingRisk"], "none");
    }
}
