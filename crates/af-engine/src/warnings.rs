//! Human-readable safety warnings.

use crate::calibration::SafetyCalibration;
use crate::model::{Actuator, Fluid};
use crate::risk::CloggingRisk;
use af_core::units::{Pressure, to_bar};

/// Warnings, always evaluated in the same order:
/// over-pressure, solvent incompatibility, flash point, hazard tags, clogging.
pub fn build_warnings(
    actuator: &Actuator,
    fluid: &Fluid,
    pressure: Pressure,
    solvent_compatible: bool,
    clogging: CloggingRisk,
    safety: &SafetyCalibration,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if pressure > actuator.max_pressure {
        warnings.push(format!(
            "Over-pressure: {:.1} bar exceeds the {:.1} bar rating of {}",
            to_bar(pressure),
            to_bar(actuator.max_pressure),
            actuator.id
        ));
    }

    if !solvent_compatible {
        warnings.push(format!(
            "Solvent incompatibility: {} fluids are not rated for {}",
            fluid.solvent_class.label(),
            actuator.id
        ));
    }

    if let Some(fp) = fluid.flash_point_c {
        if fp < safety.flash_point_threshold_c {
            warnings.push(format!(
                "Flammable: flash point {fp:.1} °C is below {:.1} °C",
                safety.flash_point_threshold_c
            ));
        }
    }

    let tags: Vec<&str> = fluid
        .hazard_tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if !tags.is_empty() {
        warnings.push(format!("Hazardous fluid: {}", tags.join(", ")));
    }

    if clogging == CloggingRisk::High {
        warnings.push(format!(
            "High clogging risk: suspended particles are large relative to the {} orifice",
            actuator.id
        ));
    }

    warnings
}
