//! Stainless steel pipe material properties.

use cf_core::c_to_k;

/// Approximate specific heat of SS304 [J/(kg·K)].
///
/// Two linear fits joined at 100 K: a steep cryogenic branch and a shallow
/// branch above it.
pub fn cp_ss304(t_c: f64) -> f64 {
    let t_k = c_to_k(t_c);
    if t_k < 100.0 {
        150.0 + 2.5 * t_k
    } else {
        440.0 + 0.15 * (t_k - 273.0)
    }
}
