// af-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, DynamicViscosity as UomDynamicViscosity, Length as UomLength,
    MassDensity as UomMassDensity, Pressure as UomPressure, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type DynVisc = UomDynamicViscosity;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Velocity = UomVelocity;

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn um(v: f64) -> Length {
    use uom::si::length::micrometer;
    Length::new::<micrometer>(v)
}

#[inline]
pub fn mps(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

/// Dynamic viscosity from centipoise (1 cP = 1 mPa·s).
#[inline]
pub fn cp(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::centipoise;
    DynVisc::new::<centipoise>(v)
}

#[inline]
pub fn pa_s(v: f64) -> DynVisc {
    use uom::si::dynamic_viscosity::pascal_second;
    DynVisc::new::<pascal_second>(v)
}

#[inline]
pub fn to_bar(p: Pressure) -> f64 {
    p.get::<uom::si::pressure::bar>()
}

#[inline]
pub fn to_um(l: Length) -> f64 {
    l.get::<uom::si::length::micrometer>()
}

#[inline]
pub fn to_cp(mu: DynVisc) -> f64 {
    mu.get::<uom::si::dynamic_viscosity::centipoise>()
}

/// Circular cross-section from a diameter.
#[inline]
pub fn circle_area(diameter: Length) -> Area {
    use uom::si::area::square_meter;
    let r = diameter.value / 2.0;
    Area::new::<square_meter>(std::f64::consts::PI * r * r)
}

pub mod constants {
    /// Surface tension is carried as a bare number: N/m per mN/m.
    pub const N_PER_M_PER_MN_PER_M: f64 = 1.0e-3;

    /// m³/s to mL/min.
    pub const ML_MIN_PER_M3_S: f64 = 6.0e7;
}
