//! Frictional pressure drop along the pipe using Darcy-Weisbach.

use crate::common::{EPSILON_FLOW, EPSILON_MDOT};
use crate::geometry::PipeGeometry;
use cf_core::units::{Pressure, pa};
use cf_props::constants::PA_PER_BAR;
use cf_props::{darcy_friction_factor, nitrogen};

/// Bore seen by the gas when computing friction losses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionLine {
    pub inner_diameter_m: f64,
    pub flow_area_m2: f64,
    /// ε/D
    pub relative_roughness: f64,
}

impl From<&PipeGeometry> for FrictionLine {
    fn from(geo: &PipeGeometry) -> Self {
        Self {
            inner_diameter_m: geo.inner_diameter().value,
            flow_area_m2: geo.flow_area.value,
            relative_roughness: geo.relative_roughness(),
        }
    }
}

impl FrictionLine {
    /// Darcy-Weisbach loss [Pa] over `length_m` of gas at `t_c` and local
    /// absolute pressure `p_pa` carrying `mdot` kg/s.
    pub fn pressure_drop(&self, mdot: f64, t_c: f64, p_pa: f64, length_m: f64) -> f64 {
        if mdot <= EPSILON_MDOT || length_m <= 0.0 {
            return 0.0;
        }
        let rho = nitrogen::density(t_c, p_pa / PA_PER_BAR);
        let mu = nitrogen::viscosity(t_c);
        let velocity = mdot / (rho * self.flow_area_m2);
        let reynolds = rho * velocity * self.inner_diameter_m / mu;
        let f = darcy_friction_factor(reynolds, self.relative_roughness);

        // ΔP = f * (L/D) * 0.5 * rho * v^2
        f * (length_m / self.inner_diameter_m) * 0.5 * rho * velocity.powi(2)
    }

    /// Inlet pressure for a mass rate, marching from the outlet (at
    /// `back_pressure`) back to the inlet over slices of `slice_length_m`.
    ///
    /// `slice_temps_c` is ordered inlet first. Each slice's density uses the
    /// pressure accumulated so far.
    pub fn inlet_pressure_for_mass_rate(
        &self,
        mdot: f64,
        slice_temps_c: &[f64],
        slice_length_m: f64,
        back_pressure: Pressure,
    ) -> Pressure {
        if mdot <= EPSILON_MDOT {
            return back_pressure;
        }
        let p_pa = slice_temps_c
            .iter()
            .rev()
            .fold(back_pressure.value, |p, &t_c| {
                p + self.pressure_drop(mdot, t_c, p, slice_length_m)
            });
        pa(p_pa)
    }

    /// Inlet pressure for a normal volumetric flow [Nm³/h].
    pub fn inlet_pressure(
        &self,
        flow_nm3h: f64,
        slice_temps_c: &[f64],
        slice_length_m: f64,
        back_pressure: Pressure,
    ) -> Pressure {
        if flow_nm3h <= EPSILON_FLOW {
            return back_pressure;
        }
        self.inlet_pressure_for_mass_rate(
            nitrogen::mass_rate_from_normal(flow_nm3h),
            slice_temps_c,
            slice_length_m,
            back_pressure,
        )
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use cf_core::units::bar;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn inlet_never_below_back_pressure(
            flow in 0.0_f64..20_000.0,
            t in -190.0_f64..60.0,
            back in 0.5_f64..5.0,
        ) {
            let d = 0.28;
            let line = FrictionLine {
                inner_diameter_m: d,
                flow_area_m2: std::f64::consts::PI * (d / 2.0).powi(2),
                relative_roughness: 1e-4,
            };
            let p = line.inlet_pressure(flow, &[t; 50], 12.0, bar(back));
            prop_assert!(p.value >= bar(back).value);
        }
    }
}
