//! Resolved actuator and fluid value objects.
//!
//! Catalog records (`ActuatorDef`, `FluidDef`) are converted with `TryFrom`;
//! conversion runs the same checks as [`Actuator::validate`] and
//! [`Fluid::validate`], so a converted value is always usable.

use crate::error::{EngineError, EngineResult};
use af_catalog::{ActuatorDef, ActuatorKind, FluidDef, Material, RheologyKind, SolventClass};
use af_core::units::{Density, DynVisc, Length, Pressure, bar, cp, kg_per_m3, mm, um};
use af_core::units::constants::N_PER_M_PER_MN_PER_M;
use std::collections::BTreeSet;

/// Flow behaviour of a fluid, with the parameters each model needs.
///
/// Bingham plastics use the fluid's nominal viscosity as plastic viscosity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rheology {
    Newtonian,
    PowerLaw {
        flow_index: f64,
        consistency_pa_s_n: f64,
    },
    Bingham {
        yield_stress_pa: f64,
    },
    HerschelBulkley {
        yield_stress_pa: f64,
        flow_index: f64,
        consistency_pa_s_n: f64,
    },
}

impl Rheology {
    pub fn kind(&self) -> RheologyKind {
        match self {
            Self::Newtonian => RheologyKind::Newtonian,
            Self::PowerLaw { .. } => RheologyKind::PowerLaw,
            Self::Bingham { .. } => RheologyKind::Bingham,
            Self::HerschelBulkley { .. } => RheologyKind::HerschelBulkley,
        }
    }

    pub fn yield_stress_pa(&self) -> Option<f64> {
        match self {
            Self::Bingham { yield_stress_pa } | Self::HerschelBulkley { yield_stress_pa, .. } => {
                Some(*yield_stress_pa)
            }
            _ => None,
        }
    }
}

/// Flow index above this makes velocity non-monotonic in pressure.
pub const MAX_FLOW_INDEX: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Fluid {
    pub id: String,
    pub name: String,
    /// Zero/low-shear viscosity
    pub viscosity: DynVisc,
    pub density: Density,
    /// Surface tension [N/m]
    pub surface_tension: f64,
    pub solvent_class: SolventClass,
    pub rheology: Rheology,
    pub max_particle_size: Option<Length>,
    pub flash_point_c: Option<f64>,
    pub hazard_tags: Vec<String>,
    pub ppe: Vec<String>,
}

impl Fluid {
    /// Plain Newtonian liquid with no hazards; mostly useful in tests.
    pub fn newtonian(
        id: impl Into<String>,
        viscosity_cp: f64,
        density_kg_m3: f64,
        surface_tension_mn_m: f64,
        solvent_class: SolventClass,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            viscosity: cp(viscosity_cp),
            density: kg_per_m3(density_kg_m3),
            surface_tension: surface_tension_mn_m * N_PER_M_PER_MN_PER_M,
            solvent_class,
            rheology: Rheology::Newtonian,
            max_particle_size: None,
            flash_point_c: None,
            hazard_tags: Vec::new(),
            ppe: Vec::new(),
        }
    }

    pub fn with_rheology(mut self, rheology: Rheology) -> Self {
        self.rheology = rheology;
        self
    }

    pub fn with_max_particle_um(mut self, size_um: f64) -> Self {
        self.max_particle_size = Some(um(size_um));
        self
    }

    pub fn validate(&self) -> EngineResult<()> {
        let fail = |reason: String| EngineError::fluid(&self.id, reason);

        check_positive(self.viscosity.value, "viscosity").map_err(fail)?;
        check_positive(self.density.value, "density").map_err(fail)?;
        check_positive(self.surface_tension, "surface tension").map_err(fail)?;

        match self.rheology {
            Rheology::Newtonian => {}
            Rheology::PowerLaw {
                flow_index,
                consistency_pa_s_n,
            } => {
                check_flow_index(flow_index).map_err(fail)?;
                check_positive(consistency_pa_s_n, "consistency index").map_err(fail)?;
            }
            Rheology::Bingham { yield_stress_pa } => {
                check_non_negative(yield_stress_pa, "yield stress").map_err(fail)?;
            }
            Rheology::HerschelBulkley {
                yield_stress_pa,
                flow_index,
                consistency_pa_s_n,
            } => {
                check_non_negative(yield_stress_pa, "yield stress").map_err(fail)?;
                check_flow_index(flow_index).map_err(fail)?;
                check_positive(consistency_pa_s_n, "consistency index").map_err(fail)?;
            }
        }

        if let Some(size) = self.max_particle_size {
            check_non_negative(size.value, "max particle size").map_err(fail)?;
        }
        if let Some(fp) = self.flash_point_c {
            if !fp.is_finite() {
                return Err(fail("flash point must be finite".to_string()));
            }
        }
        Ok(())
    }
}

impl TryFrom<&FluidDef> for Fluid {
    type Error = EngineError;

    fn try_from(def: &FluidDef) -> Result<Self, Self::Error> {
        let require = |value: Option<f64>, param: &str| {
            value.ok_or_else(|| {
                EngineError::fluid(
                    &def.id,
                    format!("{} rheology requires {}", def.rheology.label(), param),
                )
            })
        };

        let rheology = match def.rheology {
            RheologyKind::Newtonian => Rheology::Newtonian,
            RheologyKind::PowerLaw => Rheology::PowerLaw {
                flow_index: require(def.flow_index, "flow_index")?,
                consistency_pa_s_n: require(def.consistency_pa_s_n, "consistency_pa_s_n")?,
            },
            RheologyKind::Bingham => Rheology::Bingham {
                yield_stress_pa: require(def.yield_stress_pa, "yield_stress_pa")?,
            },
            RheologyKind::HerschelBulkley => Rheology::HerschelBulkley {
                yield_stress_pa: require(def.yield_stress_pa, "yield_stress_pa")?,
                flow_index: require(def.flow_index, "flow_index")?,
                consistency_pa_s_n: require(def.consistency_pa_s_n, "consistency_pa_s_n")?,
            },
        };

        let fluid = Fluid {
            id: def.id.clone(),
            name: def.name.clone(),
            viscosity: cp(def.viscosity_cp),
            density: kg_per_m3(def.density_kg_m3),
            surface_tension: def.surface_tension_mn_m * N_PER_M_PER_MN_PER_M,
            solvent_class: def.solvent_class,
            rheology,
            max_particle_size: def.max_particle_size_um.map(um),
            flash_point_c: def.flash_point_c,
            hazard_tags: def.hazard_tags.clone(),
            ppe: def.ppe.clone(),
        };
        fluid.validate()?;
        Ok(fluid)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TechnicalDesign {
    pub body_material: Material,
    pub seal_material: Material,
    pub orifice_length: Option<Length>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Actuator {
    pub id: String,
    pub name: String,
    pub kind: ActuatorKind,
    pub orifice_diameter: Length,
    pub swirl_chamber_angle_deg: f64,
    pub swirl_channels: u32,
    pub max_pressure: Pressure,
    pub compatible_solvents: BTreeSet<SolventClass>,
    pub technical_design: TechnicalDesign,
}

impl Actuator {
    /// Land length of the orifice, one diameter when the catalog is silent.
    pub fn orifice_length(&self) -> Length {
        self.technical_design
            .orifice_length
            .unwrap_or(self.orifice_diameter)
    }

    pub fn accepts(&self, solvent: SolventClass) -> bool {
        self.compatible_solvents.contains(&solvent)
    }

    pub fn validate(&self) -> EngineResult<()> {
        let fail = |reason: String| EngineError::actuator(&self.id, reason);

        check_positive(self.orifice_diameter.value, "orifice diameter").map_err(fail)?;
        check_positive(self.max_pressure.value, "max pressure").map_err(fail)?;
        if !self.swirl_chamber_angle_deg.is_finite()
            || !(0.0..=90.0).contains(&self.swirl_chamber_angle_deg)
        {
            return Err(fail(format!(
                "swirl chamber angle must be within 0..=90 deg (got {})",
                self.swirl_chamber_angle_deg
            )));
        }
        if let Some(len) = self.technical_design.orifice_length {
            check_positive(len.value, "orifice length").map_err(fail)?;
        }
        Ok(())
    }
}

impl TryFrom<&ActuatorDef> for Actuator {
    type Error = EngineError;

    fn try_from(def: &ActuatorDef) -> Result<Self, Self::Error> {
        let actuator = Actuator {
            id: def.id.clone(),
            name: def.name.clone(),
            kind: def.kind,
            orifice_diameter: mm(def.orifice_diameter_mm),
            swirl_chamber_angle_deg: def.swirl_chamber_angle_deg,
            swirl_channels: def.swirl_channels,
            max_pressure: bar(def.max_pressure_bar),
            compatible_solvents: def.compatible_solvents.iter().copied().collect(),
            technical_design: TechnicalDesign {
                body_material: def.technical_design.body_material,
                seal_material: def.technical_design.seal_material,
                orifice_length: def.technical_design.orifice_length_mm.map(mm),
            },
        };
        actuator.validate()?;
        Ok(actuator)
    }
}

fn check_positive(v: f64, what: &str) -> Result<(), String> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(format!("{what} must be positive and finite (got {v})"))
    }
}

fn check_non_negative(v: f64, what: &str) -> Result<(), String> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(format!("{what} must be non-negative and finite (got {v})"))
    }
}

fn check_flow_index(n: f64) -> Result<(), String> {
    if n.is_finite() && n > 0.0 && n <= MAX_FLOW_INDEX {
        Ok(())
    } else {
        Err(format!(
            "flow index must be within (0, {MAX_FLOW_INDEX}] (got {n})"
        ))
    }
}
