//! Spray physics: discharge, dimensionless groups, cone and droplets.

use crate::calibration::Calibration;
use crate::error::{EngineError, EngineResult};
use crate::model::{Actuator, Fluid};
use crate::rheology::{ShearEstimate, resolve_apparent_viscosity};
use af_core::numeric::{ensure_finite, round_to};
use af_core::units::constants::ML_MIN_PER_M3_S;
use af_core::units::{Density, DynVisc, Pressure, Velocity, circle_area, mps, to_um};
use serde::{Deserialize, Serialize};

/// Decimal places of reported figures (viscosity excepted).
pub mod precision {
    pub const VELOCITY: u32 = 3;
    pub const FLOW_RATE: u32 = 1;
    pub const DELIVERY_RATE: u32 = 3;
    pub const ANGLE: u32 = 1;
    pub const WIDTH: u32 = 1;
    pub const REYNOLDS: u32 = 1;
    pub const WEBER: u32 = 2;
    pub const OHNESORGE: u32 = 6;
    pub const DROPLET: u32 = 0;
    pub const SPAN: u32 = 3;
    /// Significant figures of a shear-dependent apparent viscosity.
    pub const VISCOSITY_SIG: u32 = 6;
}

/// z-score of the 90th percentile; Dv10/Dv90 sit this many log-sigmas from Dv50.
const Z90: f64 = 1.2816;

/// Geometric discharge coefficient. Each swirl channel diverts momentum into
/// rotation and lowers the axial coefficient.
pub fn discharge_coefficient(actuator: &Actuator, cal: &Calibration) -> f64 {
    let d = &cal.discharge;
    (d.cd_plain - d.cd_loss_per_channel * actuator.swirl_channels as f64).max(d.cd_min)
}

/// Orifice exit velocity `C * sqrt(2 dP / rho)`.
///
/// `C` combines the geometric coefficient with a viscous factor evaluated at
/// the Reynolds number of the ideal Bernoulli jet, so thicker fluids leave
/// the orifice more slowly at the same pressure.
pub fn exit_velocity(
    actuator: &Actuator,
    density: Density,
    viscosity: DynVisc,
    pressure: Pressure,
    cal: &Calibration,
) -> Velocity {
    let rho = density.value;
    let v_ideal = (2.0 * pressure.value / rho).sqrt();
    let re_ideal = rho * v_ideal * actuator.orifice_diameter.value / viscosity.value;
    let root = re_ideal.sqrt();
    let viscous = root / (root + cal.discharge.viscous_k);
    mps(discharge_coefficient(actuator, cal) * viscous * v_ideal)
}

/// Intermediate values of the single-pass shear/viscosity correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowEstimate {
    /// Exit velocity with the nominal (low-shear) viscosity
    pub newtonian_velocity: Velocity,
    /// Shear at the orifice implied by `newtonian_velocity`
    pub shear: ShearEstimate,
    pub apparent_viscosity: DynVisc,
    /// Exit velocity recomputed once with `apparent_viscosity`
    pub exit_velocity: Velocity,
}

/// Newtonian estimate, then exactly one apparent-viscosity correction.
pub fn estimate_flow(
    actuator: &Actuator,
    fluid: &Fluid,
    pressure: Pressure,
    cal: &Calibration,
) -> EngineResult<FlowEstimate> {
    let newtonian_velocity = exit_velocity(actuator, fluid.density, fluid.viscosity, pressure, cal);
    let shear = ShearEstimate::at_orifice(
        actuator,
        newtonian_velocity,
        pressure,
        cal.discharge.shear_rate_factor,
    );
    let apparent_viscosity = resolve_apparent_viscosity(fluid, shear)?;
    let exit_velocity = exit_velocity(actuator, fluid.density, apparent_viscosity, pressure, cal);

    tracing::debug!(
        actuator = %actuator.id,
        fluid = %fluid.id,
        v_newtonian = newtonian_velocity.value,
        shear_rate = shear.rate_per_s,
        mu_apparent_pa_s = apparent_viscosity.value,
        v_exit = exit_velocity.value,
        "flow estimate"
    );

    Ok(FlowEstimate {
        newtonian_velocity,
        shear,
        apparent_viscosity,
        exit_velocity,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropletDistribution {
    #[serde(rename = "Dv10_um")]
    pub dv10_um: f64,
    #[serde(rename = "Dv50_um")]
    pub dv50_um: f64,
    #[serde(rename = "Dv90_um")]
    pub dv90_um: f64,
    pub span: f64,
}

/// Reported spray figures, already rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SprayPhysics {
    pub exit_velocity_m_s: f64,
    pub flow_rate_ml_min: f64,
    pub delivery_rate_g_s: f64,
    pub cone_angle_deg: f64,
    pub spray_width_mm: f64,
    pub droplets: DropletDistribution,
    pub reynolds_number: f64,
    pub weber_number: f64,
    pub ohnesorge_number: f64,
}

/// Spray physics for a resolved apparent viscosity.
pub fn compute_spray_physics(
    actuator: &Actuator,
    fluid: &Fluid,
    apparent_viscosity: DynVisc,
    pressure: Pressure,
    cal: &Calibration,
) -> EngineResult<SprayPhysics> {
    let rho = fluid.density.value;
    let sigma = fluid.surface_tension;
    let mu = apparent_viscosity.value;
    let d = actuator.orifice_diameter.value;

    let v = exit_velocity(actuator, fluid.density, apparent_viscosity, pressure, cal).value;
    let q_m3_s = v * circle_area(actuator.orifice_diameter).value;

    let re = rho * v * d / mu;
    let we = rho * v * v * d / sigma;
    let oh = mu / (rho * sigma * d).sqrt();

    let cone = cone_angle_deg(actuator, we, cal);
    let half_angle = (cone / 2.0).to_radians();
    let width = 2.0 * cal.cone.width_distance_mm * half_angle.tan();

    let droplets = droplet_distribution(to_um(actuator.orifice_diameter), re, we, oh, cal)?;

    let physics = SprayPhysics {
        exit_velocity_m_s: round_to(v, precision::VELOCITY),
        flow_rate_ml_min: round_to(q_m3_s * ML_MIN_PER_M3_S, precision::FLOW_RATE),
        delivery_rate_g_s: round_to(q_m3_s * rho * 1000.0, precision::DELIVERY_RATE),
        cone_angle_deg: round_to(cone, precision::ANGLE),
        spray_width_mm: round_to(width, precision::WIDTH),
        droplets,
        reynolds_number: round_to(re, precision::REYNOLDS),
        weber_number: round_to(we, precision::WEBER),
        ohnesorge_number: round_to(oh, precision::OHNESORGE),
    };
    physics.ensure_finite()?;
    Ok(physics)
}

impl SprayPhysics {
    pub fn ensure_finite(&self) -> EngineResult<()> {
        let checks = [
            (self.exit_velocity_m_s, "exit velocity"),
            (self.flow_rate_ml_min, "flow rate"),
            (self.delivery_rate_g_s, "delivery rate"),
            (self.cone_angle_deg, "cone angle"),
            (self.spray_width_mm, "spray width"),
            (self.droplets.dv10_um, "Dv10"),
            (self.droplets.dv50_um, "Dv50"),
            (self.droplets.dv90_um, "Dv90"),
            (self.droplets.span, "span"),
            (self.reynolds_number, "Reynolds number"),
            (self.weber_number, "Weber number"),
            (self.ohnesorge_number, "Ohnesorge number"),
        ];
        for (value, what) in checks {
            ensure_finite(value, what)?;
        }
        Ok(())
    }
}

/// Cone widens with Weber number toward a saturation set by swirl geometry,
/// capped per actuator kind.
fn cone_angle_deg(actuator: &Actuator, we: f64, cal: &Calibration) -> f64 {
    let c = &cal.cone;
    let geometric = c.jet_base_deg
        + c.swirl_angle_gain * actuator.swirl_chamber_angle_deg
        + c.channel_gain_deg * actuator.swirl_channels as f64;
    let saturation = geometric.min(cal.kinds.profile(actuator.kind).cone_saturation_deg);
    saturation * (1.0 - (-we / c.we_reference).exp())
}

fn droplet_distribution(
    orifice_um: f64,
    re: f64,
    we: f64,
    oh: f64,
    cal: &Calibration,
) -> EngineResult<DropletDistribution> {
    let dc = &cal.droplets;
    let dv50 = dc.dv50_coefficient
        * orifice_um
        * we.powf(-0.5)
        * (1.0 + dc.oh_coarsening * oh).cbrt();
    if !dv50.is_finite() {
        return Err(EngineError::NonFinite { what: "Dv50" });
    }

    let sigma_g = 1.0 + dc.spread_min + dc.spread_range / (1.0 + re / dc.re_reference);
    let spread = sigma_g.powf(Z90);

    let whole = |x: f64| round_to(x, precision::DROPLET).max(dc.min_droplet_um);
    let dv10_um = whole(dv50 / spread);
    let dv50_um = whole(dv50);
    let dv90_um = whole(dv50 * spread);

    Ok(DropletDistribution {
        dv10_um,
        dv50_um,
        dv90_um,
        span: round_to((dv90_um - dv10_um) / dv50_um, precision::SPAN),
    })
}
