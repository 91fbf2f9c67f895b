//! Apparent viscosity at the orifice.
//!
//! Shear and viscosity depend on each other through the exit velocity. The
//! engine resolves this with exactly one correction pass (see
//! [`crate::spray::estimate_flow`]): velocity from the nominal viscosity,
//! shear from that velocity, apparent viscosity from that shear, velocity
//! once more. There is no convergence loop.

use crate::error::{EngineError, EngineResult};
use crate::model::{Actuator, Fluid, Rheology};
use af_core::units::{DynVisc, Pressure, Velocity, pa_s};

/// Shear conditions at the orifice wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShearEstimate {
    /// Wall shear rate [1/s]
    pub rate_per_s: f64,
    /// Pressure-driven wall shear stress [Pa]
    pub wall_stress_pa: f64,
}

impl ShearEstimate {
    /// `rate = factor * v / d`, `stress = dP * d / (4 L)`.
    pub fn at_orifice(
        actuator: &Actuator,
        velocity: Velocity,
        pressure: Pressure,
        shear_rate_factor: f64,
    ) -> Self {
        let d = actuator.orifice_diameter.value;
        let l = actuator.orifice_length().value;
        Self {
            rate_per_s: shear_rate_factor * velocity.value / d,
            wall_stress_pa: pressure.value * d / (4.0 * l),
        }
    }
}

/// Effective viscosity of `fluid` under `shear`.
///
/// Newtonian fluids return their nominal viscosity untouched. A yield-stress
/// fluid whose yield stress is not exceeded at the wall has no finite
/// apparent viscosity and is rejected as `InvalidFluidParameters`.
pub fn resolve_apparent_viscosity(fluid: &Fluid, shear: ShearEstimate) -> EngineResult<DynVisc> {
    if let Rheology::Newtonian = fluid.rheology {
        return Ok(fluid.viscosity);
    }

    let rate = shear.rate_per_s;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(EngineError::NonFinite {
            what: "orifice shear rate",
        });
    }

    if let Some(tau_y) = fluid.rheology.yield_stress_pa() {
        if shear.wall_stress_pa <= tau_y {
            return Err(EngineError::fluid(
                &fluid.id,
                format!(
                    "yield stress {tau_y} Pa is not exceeded by wall stress {:.1} Pa; \
                     apparent viscosity is unbounded",
                    shear.wall_stress_pa
                ),
            ));
        }
    }

    let mu_pa_s = match fluid.rheology {
        Rheology::Newtonian => fluid.viscosity.value,
        Rheology::PowerLaw {
            flow_index,
            consistency_pa_s_n,
        } => consistency_pa_s_n * rate.powf(flow_index - 1.0),
        Rheology::Bingham { yield_stress_pa } => fluid.viscosity.value + yield_stress_pa / rate,
        Rheology::HerschelBulkley {
            yield_stress_pa,
            flow_index,
            consistency_pa_s_n,
        } => yield_stress_pa / rate + consistency_pa_s_n * rate.powf(flow_index - 1.0),
    };

    if !mu_pa_s.is_finite() || mu_pa_s <= 0.0 {
        return Err(EngineError::fluid(
            &fluid.id,
            format!("apparent viscosity {mu_pa_s} Pa·s is not positive and finite"),
        ));
    }
    Ok(pa_s(mu_pa_s))
}
