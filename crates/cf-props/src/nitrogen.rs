//! Nitrogen gas properties at low pressure.

use crate::constants::{
    ATMOSPHERIC_PRESSURE_BAR, MOLAR_MASS_N2, NORMAL_TEMP_K, PA_PER_BAR, R_UNIVERSAL, RHO_N2_NORMAL,
};
use cf_core::{SECONDS_PER_HOUR, c_to_k};

/// Sutherland reference temperature (20 °C) [K]
const SUTHERLAND_T_REF: f64 = 293.15;
/// Viscosity at the Sutherland reference temperature [Pa·s]
const SUTHERLAND_MU_REF: f64 = 1.76e-5;
/// Sutherland constant for N₂ [K]
const SUTHERLAND_S: f64 = 111.0;

/// Specific heat of N₂ gas [J/(kg·K)]. Held constant over the cooldown range.
pub fn cp(_t_c: f64) -> f64 {
    1040.0
}

/// Thermal conductivity of N₂ gas [W/(m·K)] (linear fit).
pub fn conductivity(t_c: f64) -> f64 {
    0.000078 * c_to_k(t_c) + 0.0034
}

/// Dynamic viscosity of N₂ gas [Pa·s] from Sutherland's law.
///
/// Requires an absolute temperature above zero; callers guarantee it.
pub fn viscosity(t_c: f64) -> f64 {
    let t = c_to_k(t_c);
    SUTHERLAND_MU_REF * (t / SUTHERLAND_T_REF).powf(1.5) * (SUTHERLAND_T_REF + SUTHERLAND_S)
        / (t + SUTHERLAND_S)
}

/// Ideal-gas density of N₂ [kg/m³] at `t_c` and absolute pressure `p_bar`.
pub fn density(t_c: f64, p_bar: f64) -> f64 {
    (p_bar * PA_PER_BAR * MOLAR_MASS_N2) / (R_UNIVERSAL * c_to_k(t_c))
}

/// Mass rate [kg/s] of a normal volumetric flow [Nm³/h].
pub fn mass_rate_from_normal(nm3_per_h: f64) -> f64 {
    nm3_per_h * RHO_N2_NORMAL / SECONDS_PER_HOUR
}

/// Normal volumetric flow [Nm³/h] of a mass rate [kg/s].
pub fn normal_from_mass_rate(kg_per_s: f64) -> f64 {
    kg_per_s * SECONDS_PER_HOUR / RHO_N2_NORMAL
}

/// Express `volume_m3` of gas held at (`p_bar`, `t_c`) in normal cubic metres.
pub fn normal_volume(p_bar: f64, volume_m3: f64, t_c: f64) -> f64 {
    let moles = (p_bar * PA_PER_BAR * volume_m3) / (R_UNIVERSAL * c_to_k(t_c));
    moles * R_UNIVERSAL * NORMAL_TEMP_K / (ATMOSPHERIC_PRESSURE_BAR * PA_PER_BAR)
}

/// Bundle of N₂ transport and thermodynamic properties at one state.
///
/// Heat-transfer correlations need all four at the same film temperature;
/// evaluating them together keeps call sites short.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GasProperties {
    /// Density [kg/m³]
    pub density: f64,
    /// Dynamic viscosity [Pa·s]
    pub viscosity: f64,
    /// Specific heat [J/(kg·K)]
    pub cp: f64,
    /// Thermal conductivity [W/(m·K)]
    pub conductivity: f64,
}

impl GasProperties {
    pub fn nitrogen(t_c: f64, p_bar: f64) -> Self {
        Self {
            density: density(t_c, p_bar),
            viscosity: viscosity(t_c),
            cp: cp(t_c),
            conductivity: conductivity(t_c),
        }
    }

    /// Prandtl number cp·μ/k.
    pub fn prandtl(&self) -> f64 {
        self.cp * self.viscosity / self.conductivity
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn viscosity_rises_with_temperature(t in -190.0_f64..100.0, dt in 0.1_f64..50.0) {
            prop_assert!(viscosity(t + dt) > viscosity(t));
        }

        #[test]
        fn density_falls_with_temperature(t in -190.0_f64..100.0, dt in 0.1_f64..50.0) {
            let p = ATMOSPHERIC_PRESSURE_BAR;
            prop_assert!(density(t + dt, p) < density(t, p));
        }
    }
}
