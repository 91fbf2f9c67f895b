use crate::AfError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, AfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(AfError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, AfError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(AfError::NonPositive { what, value: v })
    }
}

/// Round half away from zero to a fixed number of decimals.
///
/// Reported figures go through this so that repeated calls and exported
/// tables compare equal digit for digit.
pub fn round_to(v: Real, decimals: u32) -> Real {
    let scale = 10_f64.powi(decimals as i32);
    let rounded = (v * scale).round() / scale;
    // normalise -0.0
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Round `v` to `digits` significant figures. Zero and non-finite values pass
/// through; a non-zero value never rounds to zero.
pub fn round_sig(v: Real, digits: u32) -> Real {
    if v == 0.0 || !v.is_finite() {
        return v;
    }
    let magnitude = v.abs().log10().floor() as i32;
    let shift = digits as i32 - 1 - magnitude;
    if shift >= 0 {
        let scale = 10_f64.powi(shift);
        (v * scale).round() / scale
    } else {
        let scale = 10_f64.powi(-shift);
        (v / scale).round() * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(1.5, "x").is_ok());
        assert!(matches!(
            ensure_positive(0.0, "x"),
            Err(AfError::NonPositive { .. })
        ));
        assert!(matches!(
            ensure_positive(-2.0, "x"),
            Err(AfError::NonPositive { .. })
        ));
        assert!(matches!(
            ensure_positive(Real::INFINITY, "x"),
            Err(AfError::NonFinite { .. })
        ));
    }

    #[test]
    fn round_to_fixed_decimals() {
        assert_eq!(round_to(12.345_6, 1), 12.3);
        assert_eq!(round_to(12.35, 0), 12.0);
        assert_eq!(round_to(0.000_123_4, 6), 0.000_123);
        assert_eq!(round_to(-0.000_01, 2), 0.0);
        assert!(round_to(-0.000_01, 2).is_sign_positive());
    }

    #[test]
    fn round_sig_keeps_relative_precision() {
        assert_eq!(round_sig(1.234_567_8, 4), 1.235);
        assert_eq!(round_sig(12_345.6, 3), 12_300.0);
        assert_eq!(round_sig(0.000_412_34, 2), 0.000_41);
        assert_eq!(round_sig(0.0, 3), 0.0);
        assert!(round_sig(4.0e-9, 6) > 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn rounding_preserves_order(a in 0.0_f64..1.0e6, b in 0.0_f64..1.0e6, d in 0_u32..6) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(round_to(lo, d) <= round_to(hi, d));
        }
    }
}
