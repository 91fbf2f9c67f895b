//! Reference configurations run through the full engine.

use af_catalog::{ActuatorKind, Material, SolventClass};
use af_core::units::{bar, mm};
use af_engine::{
    Actuator, AtomizationRegime, CloggingRisk, Fluid, Rheology, ScoreBand, TechnicalDesign,
    predict,
};

fn spray_050() -> Actuator {
    Actuator {
        id: "sp-050".to_string(),
        name: "Swirl spray 0.5 mm".to_string(),
        kind: ActuatorKind::Spray,
        orifice_diameter: mm(0.5),
        swirl_chamber_angle_deg: 30.0,
        swirl_channels: 2,
        max_pressure: bar(20.0),
        compatible_solvents: [SolventClass::Aqueous].into_iter().collect(),
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
fn water_at_five_bar_is_excellent() {
    let r = predict(&spray_050(), &water(), 5.0).unwrap();

    println!(
        "v = {} m/s, Re = {}, We = {}, Oh = {}, Dv50 = {} um, cone = {} deg",
        r.exit_velocity_m_s,
        r.reynolds_number,
        r.weber_number,
        r.ohnesorge_number,
        r.droplet_distribution.dv50_um,
        r.cone_angle_deg
    );

    assert!(matches!(
        r.atomization_regime,
        AtomizationRegime::Atomization | AtomizationRegime::WindStressed
    ));
    assert!(r.safety_warnings.is_empty(), "{:?}", r.safety_warnings);
    assert!(r.compatibility_score >= 80);
    assert_eq!(r.compatibility_band, ScoreBand::Excellent);
    assert_eq!(r.clogging_risk, CloggingRisk::None);
}

#[test]
fn water_over_rated_pressure_is_poor() {
    let r = predict(&spray_050(), &water(), 25.0).unwrap();
    assert!(r.compatibility_score < 50);
    assert_eq!(r.compatibility_band, ScoreBand::Poor);
    assert_eq!(r.safety_warnings.len(), 1);
    assert!(r.safety_warnings[0].starts_with("Over-pressure"));
}

#[test]
fn incompatible_solvent_is_poor() {
    let acetone = Fluid::newtonian("acetone", 0.32, 784.0, 23.7, SolventClass::Ketone);
    let r = predict(&spray_050(), &acetone, 5.0).unwrap();
    assert!(r.compatibility_score < 50);
    assert!(
        r.safety_warnings
            .iter()
            .any(|w| w.starts_with("Solvent incompatibility"))
    );
}

#[test]
fn shear_thinning_gel_sprays_with_reduced_viscosity() {
    let mut actuator = spray_050();
    actuator.orifice_diameter = mm(0.8);
    let gel = Fluid::newtonian("gel", 800.0, 1010.0, 45.0, SolventClass::Aqueous).with_rheology(
        Rheology::PowerLaw {
            flow_index: 0.45,
            consistency_pa_s_n: 6.0,
        },
    );
    let r = predict(&actuator, &gel, 8.0).unwrap();
    assert!(r.apparent_viscosity_cp < 800.0);
    assert!(r.exit_velocity_m_s > 0.0);
    assert!(r.compatibility_score <= 100);
}

#[test]
fn paste_below_yield_is_rejected() {
    let mut actuator = spray_050();
    actuator.technical_design.orifice_length = Some(mm(5.0));
    let paste = Fluid::newtonian("paste", 2000.0, 1300.0, 40.0, SolventClass::Aqueous)
        .with_rheology(Rheology::Bingham {
            yield_stress_pa: 50_000.0,
        });
    // wall stress = 1e5 Pa * 0.5 / (4 * 5) = 2500 Pa
    let err = predict(&actuator, &paste, 1.0).unwrap_err();
    assert!(matches!(
        err,
        af_engine::EngineError::InvalidFluidParameters { .. }
    ));
}

#[test]
fn suspension_clogs_fine_orifice() {
    let mut actuator = spray_050();
    actuator.orifice_diameter = mm(0.2);
    let slurry = water().with_max_particle_um(80.0);
    let r = predict(&actuator, &slurry, 5.0).unwrap();
    assert_eq!(r.clogging_risk, CloggingRisk::High);
    assert!(
        r.safety_warnings
            .last()
            .is_some_and(|w| w.starts_with("High clogging risk"))
    );
}

#[test]
fn result_round_trips_through_json() {
    let r = predict(&spray_050(), &water(), 5.0).unwrap();
    let json = serde_json::to_string_pretty(&r).unwrap();
    assert!(json.contains("\"atomizationRegime\""));
    let back: af_engine::PredictionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.compatibility_score, r.compatibility_score);
    assert_eq!(back.atomization_regime, r.atomization_regime);
    assert_eq!(back.material_stress, r.material_stress);
    assert_eq!(back.safety_warnings, r.safety_warnings);
    assert!((back.exit_velocity_m_s - r.exit_velocity_m_s).abs() < 1e-9);
    assert!((back.droplet_distribution.dv50_um - r.droplet_distribution.dv50_um).abs() < 1e-9);
}
