//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use cf_core::numeric::ensure_finite;

/// Flows at or below this [Nm³/h] are treated as no flow.
pub const EPSILON_FLOW: f64 = 1e-6;

/// Mass rates at or below this [kg/s] are treated as no flow.
pub const EPSILON_MDOT: f64 = 1e-6;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<f64> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> ComponentResult<f64> {
    let value = check_finite(value, what)?;
    if value <= 0.0 {
        return Err(ComponentError::NonPhysical { what });
    }
    Ok(value)
}
