//! Catalog schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub actuators: Vec<ActuatorDef>,
    #[serde(default)]
    pub fluids: Vec<FluidDef>,
}

impl Catalog {
    pub fn actuator(&self, id: &str) -> Option<&ActuatorDef> {
        self.actuators.iter().find(|a| a.id == id)
    }

    pub fn fluid(&self, id: &str) -> Option<&FluidDef> {
        self.fluids.iter().find(|f| f.id == id)
    }
}

/// A nozzle, valve or pump as it is stored in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActuatorDef {
    pub id: String,
    pub name: String,
    pub kind: ActuatorKind,
    pub orifice_diameter_mm: f64,
    #[serde(default)]
    pub swirl_chamber_angle_deg: f64,
    #[serde(default)]
    pub swirl_channels: u32,
    pub max_pressure_bar: f64,
    #[serde(default)]
    pub compatible_solvents: Vec<SolventClass>,
    pub technical_design: TechnicalDesignDef,
}

impl ActuatorDef {
    /// One-line description for listings, e.g. `Spray 0.5 (spray, HDPE body, EPDM seal)`.
    pub fn describe(&self) -> String {
        format!(
            "{} ({}, {} body, {} seal)",
            self.name,
            self.kind.label(),
            self.technical_design.body_material.label(),
            self.technical_design.seal_material.label()
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TechnicalDesignDef {
    pub body_material: Material,
    pub seal_material: Material,
    /// Straight land downstream of the swirl chamber. Defaults to one diameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orifice_length_mm: Option<f64>,
}

/// A liquid as it is stored in the catalog.
///
/// Rheology parameters are flat optional fields on disk; which of them are
/// required depends on `rheology`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FluidDef {
    pub id: String,
    pub name: String,
    pub viscosity_cp: f64,
    pub density_kg_m3: f64,
    pub surface_tension_mn_m: f64,
    pub solvent_class: SolventClass,
    #[serde(default)]
    pub rheology: RheologyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistency_pa_s_n: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_stress_pa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_particle_size_um: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flash_point_c: Option<f64>,
    #[serde(default)]
    pub hazard_tags: Vec<String>,
    #[serde(default)]
    pub ppe: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RheologyKind {
    #[default]
    Newtonian,
    PowerLaw,
    Bingham,
    HerschelBulkley,
}

impl RheologyKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Newtonian => "newtonian",
            Self::PowerLaw => "power_law",
            Self::Bingham => "bingham",
            Self::HerschelBulkley => "herschel_bulkley",
        }
    }
}

/// Designed use of an actuator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActuatorKind {
    FineMist,
    Spray,
    Stream,
    Foam,
}

impl ActuatorKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::FineMist => "fine mist",
            Self::Spray => "spray",
            Self::Stream => "stream",
            Self::Foam => "foam",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SolventClass {
    Aqueous,
    Alcohol,
    Glycol,
    Hydrocarbon,
    Aromatic,
    Ketone,
    Ester,
    Chlorinated,
    Acidic,
    Alkaline,
    Oil,
    Silicone,
}

impl SolventClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::Aqueous => "aqueous",
            Self::Alcohol => "alcohol",
            Self::Glycol => "glycol",
            Self::Hydrocarbon => "hydrocarbon",
            Self::Aromatic => "aromatic",
            Self::Ketone => "ketone",
            Self::Ester => "ester",
            Self::Chlorinated => "chlorinated",
            Self::Acidic => "acidic",
            Self::Alkaline => "alkaline",
            Self::Oil => "oil",
            Self::Silicone => "silicone",
        }
    }
}

/// Body and seal materials.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Pp,
    Hdpe,
    Ldpe,
    Pet,
    Pom,
    Pa,
    Pc,
    Ptfe,
    StainlessSteel,
    Brass,
    Epdm,
    Nbr,
    Fkm,
    Silicone,
}

impl Material {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pp => "PP",
            Self::Hdpe => "HDPE",
            Self::Ldpe => "LDPE",
            Self::Pet => "PET",
            Self::Pom => "POM",
            Self::Pa => "PA",
            Self::Pc => "PC",
            Self::Ptfe => "PTFE",
            Self::StainlessSteel => "stainless steel",
            Self::Brass => "brass",
            Self::Epdm => "EPDM",
            Self::Nbr => "NBR",
            Self::Fkm => "FKM",
            Self::Silicone => "silicone",
        }
    }
}
