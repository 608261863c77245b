use crate::CfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Offset between the Celsius and Kelvin scales.
pub const ZERO_CELSIUS_K: Real = 273.15;

pub const SECONDS_PER_HOUR: Real = 3600.0;

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

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CfError::NonFinite { what, value: v })
    }
}

#[inline]
pub fn c_to_k(t_c: Real) -> Real {
    t_c + ZERO_CELSIUS_K
}

/// Linear interpolation between `a` and `b` at `progress` (not clamped).
#[inline]
pub fn lerp(a: Real, b: Real, progress: Real) -> Real {
    a + progress * (b - a)
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
    fn celsius_to_kelvin() {
        assert_eq!(c_to_k(0.0), 273.15);
        assert!(nearly_equal(c_to_k(-162.0), 111.15, Tolerances::default()));
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(1000.0, 3000.0, 0.0), 1000.0);
        assert_eq!(lerp(1000.0, 3000.0, 1.0), 3000.0);
        assert_eq!(lerp(1000.0, 3000.0, 0.5), 2000.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn nearly_equal_is_symmetric(a in -1.0e6f64..1.0e6, b in -1.0e6f64..1.0e6) {
            let tol = Tolerances::default();
            prop_assert_eq!(nearly_equal(a, b, tol), nearly_equal(b, a, tol));
        }

        #[test]
        fn lerp_stays_between_endpoints(a in -500.0f64..500.0, b in -500.0f64..500.0, p in 0.0f64..=1.0) {
            let v = lerp(a, b, p);
            let slack = 1e-9 * a.abs().max(b.abs()).max(1.0);
            prop_assert!(v >= a.min(b) - slack && v <= a.max(b) + slack);
        }

        #[test]
        fn kelvin_preserves_order(a in -273.15f64..1000.0, b in -273.15f64..1000.0) {
            prop_assume!(a < b);
            prop_assert!(c_to_k(a) <= c_to_k(b));
        }
    }
}
