//! Clogging and material-stress assessment.

use crate::calibration::{CloggingThresholds, SafetyCalibration};
use crate::model::{Actuator, Fluid};
use af_catalog::{Material, SolventClass};
use serde::{Deserialize, Serialize};

/// Obstruction risk, totally ordered `None < Low < Moderate < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloggingRisk {
    None,
    Low,
    Moderate,
    High,
}

impl CloggingRisk {
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// Risk from the ratio of the largest suspended particle to the orifice.
pub fn assess_clogging(
    max_particle_um: Option<f64>,
    orifice_um: f64,
    t: &CloggingThresholds,
) -> CloggingRisk {
    let Some(particle) = max_particle_um else {
        return CloggingRisk::None;
    };
    let ratio = particle / orifice_um;
    if ratio >= t.high_ratio {
        CloggingRisk::High
    } else if ratio >= t.moderate_ratio {
        CloggingRisk::Moderate
    } else if ratio >= t.low_ratio {
        CloggingRisk::Low
    } else {
        CloggingRisk::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialStress {
    pub swelling_risk: bool,
    pub stress_cracking_risk: bool,
    pub leaching_risk: bool,
}

impl MaterialStress {
    pub fn count(&self) -> u32 {
        [self.swelling_risk, self.stress_cracking_risk, self.leaching_risk]
            .iter()
            .filter(|f| **f)
            .count() as u32
    }
}

/// Whether the actuator's catalog entry lists the fluid's solvent class.
pub fn is_solvent_compatible(actuator: &Actuator, fluid: &Fluid) -> bool {
    actuator.accepts(fluid.solvent_class)
}

/// Independent swelling, stress-cracking and leaching evaluations.
pub fn assess_material_stress(
    actuator: &Actuator,
    fluid: &Fluid,
    safety: &SafetyCalibration,
) -> MaterialStress {
    let design = &actuator.technical_design;
    let solvent = fluid.solvent_class;

    let low_flash = fluid
        .flash_point_c
        .is_some_and(|fp| fp < safety.flash_point_threshold_c);
    let aggressive = has_any_tag(fluid, &safety.aggressive_hazard_tags);
    let corrosive = has_any_tag(fluid, &["corrosive"]);

    let leaching_risk = match design.body_material {
        Material::Brass => solvent == SolventClass::Acidic || corrosive,
        body if is_additive_bearing(body) => low_flash || aggressive,
        _ => false,
    };

    MaterialStress {
        swelling_risk: seal_swells(design.seal_material, solvent),
        stress_cracking_risk: body_stress_cracks(design.body_material, solvent),
        leaching_risk,
    }
}

fn has_any_tag<S: AsRef<str>>(fluid: &Fluid, tags: &[S]) -> bool {
    fluid
        .hazard_tags
        .iter()
        .any(|t| tags.iter().any(|a| a.as_ref().eq_ignore_ascii_case(t.trim())))
}

fn seal_swells(seal: Material, solvent: SolventClass) -> bool {
    use Material as M;
    use SolventClass as S;
    match seal {
        M::Epdm => matches!(solvent, S::Hydrocarbon | S::Aromatic | S::Chlorinated | S::Oil),
        M::Nbr => matches!(solvent, S::Aromatic | S::Ketone | S::Ester | S::Chlorinated),
        M::Fkm => matches!(solvent, S::Ketone | S::Ester | S::Alkaline),
        M::Silicone => matches!(
            solvent,
            S::Hydrocarbon | S::Aromatic | S::Chlorinated | S::Silicone
        ),
        M::Ldpe => matches!(solvent, S::Hydrocarbon | S::Aromatic | S::Chlorinated),
        M::Pp | M::Hdpe => matches!(solvent, S::Aromatic | S::Chlorinated),
        M::Pc => matches!(solvent, S::Aromatic | S::Ketone | S::Ester | S::Chlorinated),
        M::Pet | M::Pom | M::Pa | M::Ptfe | M::StainlessSteel | M::Brass => false,
    }
}

fn body_stress_cracks(body: Material, solvent: SolventClass) -> bool {
    use Material as M;
    use SolventClass as S;
    match body {
        M::Pc => matches!(
            solvent,
            S::Alcohol | S::Ketone | S::Ester | S::Aromatic | S::Chlorinated | S::Alkaline
        ),
        M::Ldpe => matches!(solvent, S::Hydrocarbon | S::Oil | S::Aromatic),
        M::Hdpe | M::Pp => matches!(solvent, S::Aromatic | S::Chlorinated),
        M::Pet => matches!(solvent, S::Alkaline | S::Ketone | S::Chlorinated),
        M::Pom | M::Pa => solvent == S::Acidic,
        M::StainlessSteel => solvent == S::Chlorinated,
        M::Brass => solvent == S::Alkaline,
        M::Ptfe | M::Epdm | M::Nbr | M::Fkm | M::Silicone => false,
    }
}

/// Polymers compounded with plasticisers, stabilisers or slip agents.
fn is_additive_bearing(material: Material) -> bool {
    use Material as M;
    matches!(
        material,
        M::Pp | M::Hdpe | M::Ldpe | M::Pom | M::Pa | M::Pc | M::Epdm | M::Nbr | M::Silicone
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TechnicalDesign;
    use af_catalog::ActuatorKind;
    use af_core::units::{bar, mm};

    fn actuator(body: Material, seal: Material) -> Actuator {
        Actuator {
            id: "a".to_string(),
            name: "a".to_string(),
            kind: ActuatorKind::Spray,
            orifice_diameter: mm(0.5),
            swirl_chamber_angle_deg: 0.0,
            swirl_channels: 0,
            max_pressure: bar(10.0),
            compatible_solvents: [SolventClass::Aqueous].into_iter().collect(),
            technical_design: TechnicalDesign {
                body_material: body,
                seal_material: seal,
                orifice_length: None,
            },
        }
    }

    fn fluid(solvent: SolventClass) -> Fluid {
        Fluid::newtonian("f", 1.0, 800.0, 25.0, solvent)
    }

    #[test]
    fn clogging_ladder() {
        let t = CloggingThresholds::default();
        assert_eq!(assess_clogging(None, 500.0, &t), CloggingRisk::None);
        assert_eq!(assess_clogging(Some(5.0), 500.0, &t), CloggingRisk::None);
        assert_eq!(assess_clogging(Some(20.0), 500.0, &t), CloggingRisk::Low);
        assert_eq!(assess_clogging(Some(60.0), 500.0, &t), CloggingRisk::Moderate);
        assert_eq!(assess_clogging(Some(100.0), 500.0, &t), CloggingRisk::High);
        assert_eq!(assess_clogging(Some(900.0), 500.0, &t), CloggingRisk::High);
    }

    #[test]
    fn clogging_serializes_lowercase() {
        let json = serde_json::to_string(&CloggingRisk::Moderate).unwrap();
        assert_eq!(json, "\"moderate\"");
    }

    #[test]
    fn aqueous_in_pp_epdm_is_clean() {
        let stress = assess_material_stress(
            &actuator(Material::Pp, Material::Epdm),
            &fluid(SolventClass::Aqueous),
            &SafetyCalibration::default(),
        );
        assert_eq!(stress, MaterialStress::default());
        assert_eq!(stress.count(), 0);
    }

    #[test]
    fn hydrocarbon_swells_epdm_seal() {
        let stress = assess_material_stress(
            &actuator(Material::Pp, Material::Epdm),
            &fluid(SolventClass::Hydrocarbon),
            &SafetyCalibration::default(),
        );
        assert!(stress.swelling_risk);
        assert!(!stress.stress_cracking_risk);
    }

    #[test]
    fn alcohol_cracks_polycarbonate() {
        let stress = assess_material_stress(
            &actuator(Material::Pc, Material::Fkm),
            &fluid(SolventClass::Alcohol),
            &SafetyCalibration::default(),
        );
        assert!(stress.stress_cracking_risk);
        assert!(!stress.swelling_risk);
    }

    #[test]
    fn low_flash_point_leaches_polymer_body_only() {
        let mut f = fluid(SolventClass::Alcohol);
        f.flash_point_c = Some(13.0);
        let safety = SafetyCalibration::default();

        let pp = assess_material_stress(&actuator(Material::Pp, Material::Fkm), &f, &safety);
        assert!(pp.leaching_risk);

        let steel =
            assess_material_stress(&actuator(Material::StainlessSteel, Material::Ptfe), &f, &safety);
        assert!(!steel.leaching_risk);
    }

    #[test]
    fn hazard_tag_match_is_case_insensitive() {
        let mut f = fluid(SolventClass::Aqueous);
        f.hazard_tags = vec!["Corrosive".to_string()];
        let safety = SafetyCalibration::default();
        assert!(assess_material_stress(&actuator(Material::Hdpe, Material::Epdm), &f, &safety).leaching_risk);
        assert!(assess_material_stress(&actuator(Material::Brass, Material::Epdm), &f, &safety).leaching_risk);
    }

    #[test]
    fn brass_leaches_on_corrosive_tag_alone() {
        let safety = SafetyCalibration {
            aggressive_hazard_tags: Vec::new(),
            ..SafetyCalibration::default()
        };
        let brass = actuator(Material::Brass, Material::Epdm);

        let mut f = fluid(SolventClass::Aqueous);
        f.hazard_tags = vec![" corrosive ".to_string()];
        assert!(assess_material_stress(&brass, &f, &safety).leaching_risk);

        f.hazard_tags = vec!["flammable".to_string()];
        assert!(!assess_material_stress(&brass, &f, &safety).leaching_risk);
    }

    #[test]
    fn solvent_compatibility_follows_catalog_list() {
        let a = actuator(Material::Pp, Material::Epdm);
        assert!(is_solvent_compatible(&a, &fluid(SolventClass::Aqueous)));
        assert!(!is_solvent_compatible(&a, &fluid(SolventClass::Ketone)));
    }
}
