//! Tunable coefficients for the surrogate model.
//!
//! Every curve constant the engine uses lives in [`Calibration`]. The defaults
//! are compiled in; a deployment may override any subset from YAML or JSON
//! because every section is `#[serde(default)]`.

use crate::error::{EngineError, EngineResult};
use crate::regime::AtomizationRegime;
use af_catalog::ActuatorKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Calibration {
    pub discharge: DischargeCalibration,
    pub cone: ConeCalibration,
    pub droplets: DropletCalibration,
    pub regime: RegimeThresholds,
    pub clogging: CloggingThresholds,
    pub safety: SafetyCalibration,
    pub score: ScoreWeights,
    pub kinds: KindProfiles,
}

/// Orifice discharge: `C = max(cd_min, cd_plain - cd_loss_per_channel * channels)`
/// scaled by the viscous factor `sqrt(Re) / (sqrt(Re) + viscous_k)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DischargeCalibration {
    pub cd_plain: f64,
    pub cd_loss_per_channel: f64,
    pub cd_min: f64,
    pub viscous_k: f64,
    /// Wall shear rate is `shear_rate_factor * v / d`.
    pub shear_rate_factor: f64,
}

impl Default for DischargeCalibration {
    fn default() -> Self {
        Self {
            cd_plain: 0.85,
            cd_loss_per_channel: 0.08,
            cd_min: 0.45,
            viscous_k: 2.0,
            shear_rate_factor: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConeCalibration {
    pub jet_base_deg: f64,
    pub swirl_angle_gain: f64,
    pub channel_gain_deg: f64,
    /// Weber number at which the cone reaches ~63% of its saturation angle.
    pub we_reference: f64,
    /// Distance at which spray width is reported.
    pub width_distance_mm: f64,
}

impl Default for ConeCalibration {
    fn default() -> Self {
        Self {
            jet_base_deg: 8.0,
            swirl_angle_gain: 0.6,
            channel_gain_deg: 6.0,
            we_reference: 150.0,
            width_distance_mm: 100.0,
        }
    }
}

/// `Dv50 = dv50_coefficient * d * We^-1/2 * (1 + oh_coarsening * Oh)^1/3`,
/// geometric spread `1 + spread_min + spread_range / (1 + Re / re_reference)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropletCalibration {
    pub dv50_coefficient: f64,
    pub oh_coarsening: f64,
    pub spread_min: f64,
    pub spread_range: f64,
    pub re_reference: f64,
    pub min_droplet_um: f64,
}

impl Default for DropletCalibration {
    fn default() -> Self {
        Self {
            dv50_coefficient: 8.0,
            oh_coarsening: 50.0,
            spread_min: 0.35,
            spread_range: 0.9,
            re_reference: 2000.0,
            min_droplet_um: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeThresholds {
    /// Below this Reynolds number the jet stays laminar enough that the
    /// regime is capped at wind-induced.
    pub re_min_breakup: f64,
    pub we_wind_induced: f64,
    pub we_wind_stressed: f64,
    pub we_atomization: f64,
    pub oh_atomization_max: f64,
}

impl Default for RegimeThresholds {
    fn default() -> Self {
        Self {
            re_min_breakup: 100.0,
            we_wind_induced: 25.0,
            we_wind_stressed: 250.0,
            we_atomization: 1500.0,
            oh_atomization_max: 0.1,
        }
    }
}

/// Particle-size to orifice-diameter ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloggingThresholds {
    pub low_ratio: f64,
    pub moderate_ratio: f64,
    pub high_ratio: f64,
}

impl Default for CloggingThresholds {
    fn default() -> Self {
        Self {
            low_ratio: 0.03,
            moderate_ratio: 0.10,
            high_ratio: 0.20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyCalibration {
    pub flash_point_threshold_c: f64,
    /// Hazard tags (lowercase) that mobilise additives from polymer bodies.
    pub aggressive_hazard_tags: Vec<String>,
}

impl Default for SafetyCalibration {
    fn default() -> Self {
        Self {
            flash_point_threshold_c: 60.0,
            aggressive_hazard_tags: ["flammable", "corrosive", "oxidizer", "solvent"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

/// Deductions from 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub over_pressure: f64,
    pub material_incompatibility: f64,
    pub clogging_high: f64,
    pub clogging_moderate: f64,
    pub regime_step: f64,
    pub regime_cap: f64,
    pub stress_flag: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            over_pressure: 60.0,
            material_incompatibility: 55.0,
            clogging_high: 25.0,
            clogging_moderate: 8.0,
            regime_step: 8.0,
            regime_cap: 20.0,
            stress_flag: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindProfile {
    pub cone_saturation_deg: f64,
    pub regime_min: AtomizationRegime,
    pub regime_max: AtomizationRegime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindProfiles {
    pub fine_mist: KindProfile,
    pub spray: KindProfile,
    pub stream: KindProfile,
    pub foam: KindProfile,
}

impl KindProfiles {
    pub fn profile(&self, kind: ActuatorKind) -> &KindProfile {
        match kind {
            ActuatorKind::FineMist => &self.fine_mist,
            ActuatorKind::Spray => &self.spray,
            ActuatorKind::Stream => &self.stream,
            ActuatorKind::Foam => &self.foam,
        }
    }
}

impl Default for KindProfiles {
    fn default() -> Self {
        use AtomizationRegime::*;
        Self {
            fine_mist: KindProfile {
                cone_saturation_deg: 90.0,
                regime_min: Atomization,
                regime_max: Atomization,
            },
            spray: KindProfile {
                cone_saturation_deg: 70.0,
                regime_min: WindStressed,
                regime_max: Atomization,
            },
            stream: KindProfile {
                cone_saturation_deg: 25.0,
                regime_min: Rayleigh,
                regime_max: WindInduced,
            },
            foam: KindProfile {
                cone_saturation_deg: 50.0,
                regime_min: WindInduced,
                regime_max: WindStressed,
            },
        }
    }
}

impl Calibration {
    /// Reject tables that would break finiteness, ordering or score banding.
    pub fn validate(&self) -> EngineResult<()> {
        let d = &self.discharge;
        positive("discharge.cd_plain", d.cd_plain)?;
        non_negative("discharge.cd_loss_per_channel", d.cd_loss_per_channel)?;
        positive("discharge.cd_min", d.cd_min)?;
        non_negative("discharge.viscous_k", d.viscous_k)?;
        positive("discharge.shear_rate_factor", d.shear_rate_factor)?;
        if d.cd_plain > 1.0 || d.cd_min > d.cd_plain {
            return Err(invalid("discharge coefficients must satisfy cd_min <= cd_plain <= 1"));
        }

        let c = &self.cone;
        non_negative("cone.jet_base_deg", c.jet_base_deg)?;
        non_negative("cone.swirl_angle_gain", c.swirl_angle_gain)?;
        non_negative("cone.channel_gain_deg", c.channel_gain_deg)?;
        positive("cone.we_reference", c.we_reference)?;
        positive("cone.width_distance_mm", c.width_distance_mm)?;

        let dr = &self.droplets;
        positive("droplets.dv50_coefficient", dr.dv50_coefficient)?;
        non_negative("droplets.oh_coarsening", dr.oh_coarsening)?;
        non_negative("droplets.spread_min", dr.spread_min)?;
        non_negative("droplets.spread_range", dr.spread_range)?;
        positive("droplets.re_reference", dr.re_reference)?;
        positive("droplets.min_droplet_um", dr.min_droplet_um)?;

        let r = &self.regime;
        non_negative("regime.re_min_breakup", r.re_min_breakup)?;
        positive("regime.oh_atomization_max", r.oh_atomization_max)?;
        ascending(
            "regime Weber thresholds",
            &[r.we_wind_induced, r.we_wind_stressed, r.we_atomization],
        )?;

        let cl = &self.clogging;
        ascending(
            "clogging ratios",
            &[cl.low_ratio, cl.moderate_ratio, cl.high_ratio],
        )?;
        positive("clogging.low_ratio", cl.low_ratio)?;

        let s = &self.score;
        for (name, w) in [
            ("score.over_pressure", s.over_pressure),
            ("score.material_incompatibility", s.material_incompatibility),
            ("score.clogging_high", s.clogging_high),
            ("score.clogging_moderate", s.clogging_moderate),
            ("score.regime_step", s.regime_step),
            ("score.regime_cap", s.regime_cap),
            ("score.stress_flag", s.stress_flag),
        ] {
            non_negative(name, w)?;
        }
        // Either dominant fault alone must land in the poor band.
        if s.over_pressure <= 50.0 || s.material_incompatibility <= 50.0 {
            return Err(invalid(
                "over_pressure and material_incompatibility deductions must exceed 50",
            ));
        }

        for (name, p) in [
            ("fine_mist", &self.kinds.fine_mist),
            ("spray", &self.kinds.spray),
            ("stream", &self.kinds.stream),
            ("foam", &self.kinds.foam),
        ] {
            if !p.cone_saturation_deg.is_finite()
                || p.cone_saturation_deg <= 0.0
                || p.cone_saturation_deg >= 180.0
            {
                return Err(invalid(format!(
                    "kinds.{name}.cone_saturation_deg must be in (0, 180)"
                )));
            }
            if p.regime_min > p.regime_max {
                return Err(invalid(format!(
                    "kinds.{name}: regime_min is above regime_max"
                )));
            }
        }

        Ok(())
    }
}

fn invalid(what: impl Into<String>) -> EngineError {
    EngineError::InvalidCalibration { what: what.into() }
}

fn positive(name: &str, v: f64) -> EngineResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive and finite (got {v})")))
    }
}

fn non_negative(name: &str, v: f64) -> EngineResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be non-negative and finite (got {v})")))
    }
}

fn ascending(name: &str, values: &[f64]) -> EngineResult<()> {
    let finite = values.iter().all(|v| v.is_finite());
    let ordered = values.windows(2).all(|w| w[0] < w[1]);
    if finite && ordered {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite and strictly ascending")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Calibration::default().validate().unwrap();
    }

    #[test]
    fn weak_over_pressure_penalty_is_rejected() {
        let mut cal = Calibration::default();
        cal.score.over_pressure = 30.0;
        assert!(matches!(
            cal.validate(),
            Err(EngineError::InvalidCalibration { .. })
        ));
    }

    #[test]
    fn unordered_weber_thresholds_are_rejected() {
        let mut cal = Calibration::default();
        cal.regime.we_wind_stressed = 10.0;
        assert!(cal.validate().is_err());
    }

    #[test]
    fn inverted_kind_window_is_rejected() {
        let mut cal = Calibration::default();
        cal.kinds.stream.regime_min = AtomizationRegime::Atomization;
        assert!(cal.validate().is_err());
    }

    #[test]
    fn partial_yaml_overrides_keep_other_defaults() {
        let yaml = r#"
discharge:
  cd_plain: 0.8
score:
  stress_flag: 3.0
"#;
        let cal: Calibration = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cal.discharge.cd_plain, 0.8);
        assert_eq!(cal.discharge.cd_min, 0.45);
        assert_eq!(cal.score.stress_flag, 3.0);
        assert_eq!(cal.score.over_pressure, 60.0);
        assert_eq!(cal.kinds, KindProfiles::default());
        cal.validate().unwrap();
    }
}
