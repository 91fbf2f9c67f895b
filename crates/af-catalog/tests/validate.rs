use af_catalog::schema::*;
use af_catalog::{ValidationError, validate_catalog};

fn fluid(id: &str) -> FluidDef {
    FluidDef {
        id: id.to_string(),
        name: format!("Fluid {id}"),
        viscosity_cp: 1.0,
        density_kg_m3: 998.0,
        surface_tension_mn_m: 72.8,
        solvent_class: SolventClass::Aqueous,
        rheology: RheologyKind::Newtonian,
        flow_index: None,
        consistency_pa_s_n: None,
        yield_stress_pa: None,
        max_particle_size_um: None,
        flash_point_c: None,
        hazard_tags: vec![],
        ppe: vec![],
    }
}

fn catalog(fluids: Vec<FluidDef>) -> Catalog {
    Catalog {
        version: 1,
        name: "Validation".to_string(),
        actuators: vec![],
        fluids,
    }
}

#[test]
fn empty_catalog_is_valid() {
    validate_catalog(&catalog(vec![])).unwrap();
}

#[test]
fn duplicate_fluid_ids_are_rejected() {
    let err = validate_catalog(&catalog(vec![fluid("water"), fluid("water")])).unwrap_err();
    match err {
        ValidationError::DuplicateId { id, context } => {
            assert_eq!(id, "water");
            assert_eq!(context, "fluids");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn blank_id_is_rejected() {
    let err = validate_catalog(&catalog(vec![fluid("  ")])).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidValue { .. }));
}

#[test]
fn future_version_is_rejected() {
    let mut c = catalog(vec![]);
    c.version = 7;
    assert!(matches!(
        validate_catalog(&c),
        Err(ValidationError::UnsupportedVersion { version: 7 })
    ));
}
