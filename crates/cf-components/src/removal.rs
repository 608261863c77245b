//! Heat removal by nitrogen flowing through the pipe bore.

use crate::common::{EPSILON_FLOW, EPSILON_MDOT};
use crate::geometry::PipeGeometry;
use cf_props::constants::ATMOSPHERIC_PRESSURE_BAR;
use cf_props::{FlowRegime, GasProperties, nitrogen};
use std::f64::consts::PI;

/// Fully developed laminar Nusselt number (constant wall temperature).
pub const NUSSELT_LAMINAR: f64 = 3.66;

/// Heat taken from one segment and the gas temperature leaving it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatRemoval {
    pub removed_w: f64,
    pub gas_outlet_c: f64,
}

/// Gas temperatures along the pipe for one flow and wall state.
#[derive(Debug, Clone, PartialEq)]
pub struct GasProfile {
    /// Heat each segment gives to the gas [W]
    pub removed_w: Vec<f64>,
    /// Gas temperature at the N + 1 segment faces, inlet first [°C]
    pub gas_temps_c: Vec<f64>,
}

impl GasProfile {
    pub fn outlet_removal_w(&self) -> f64 {
        self.removed_w.last().copied().unwrap_or(0.0)
    }
}

/// Internal forced convection for a bore of fixed diameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InternalConvection {
    pub inner_diameter_m: f64,
    /// Wetted area of one segment [m²]
    pub segment_inner_area_m2: f64,
}

impl From<&PipeGeometry> for InternalConvection {
    fn from(geo: &PipeGeometry) -> Self {
        Self {
            inner_diameter_m: geo.inner_diameter().value,
            segment_inner_area_m2: geo.segment_inner_area.value,
        }
    }
}

/// Nusselt number: constant when laminar, Dittus–Boelter (heating) when turbulent.
pub fn nusselt(reynolds: f64, prandtl: f64) -> f64 {
    match FlowRegime::from_reynolds(reynolds) {
        FlowRegime::Laminar => NUSSELT_LAMINAR,
        FlowRegime::Turbulent => 0.023 * reynolds.powf(0.8) * prandtl.powf(0.4),
    }
}

impl InternalConvection {
    fn bore_area(&self) -> f64 {
        PI * (self.inner_diameter_m / 2.0).powi(2)
    }

    /// Heat removed from a segment at `segment_c` by gas entering at
    /// `gas_in_c` with normal volumetric flow `flow_nm3h`.
    ///
    /// Properties are taken at the film temperature (mean of wall and gas
    /// inlet) at atmospheric pressure.
    pub fn heat_removal(&self, flow_nm3h: f64, segment_c: f64, gas_in_c: f64) -> HeatRemoval {
        if flow_nm3h <= EPSILON_FLOW || segment_c <= gas_in_c {
            return HeatRemoval {
                removed_w: 0.0,
                gas_outlet_c: gas_in_c,
            };
        }

        let mdot = nitrogen::mass_rate_from_normal(flow_nm3h);
        let film = GasProperties::nitrogen((segment_c + gas_in_c) / 2.0, ATMOSPHERIC_PRESSURE_BAR);
        let velocity = mdot / (film.density * self.bore_area());
        let reynolds = film.density * velocity * self.inner_diameter_m / film.viscosity;

        let h = nusselt(reynolds, film.prandtl()) * film.conductivity / self.inner_diameter_m;
        let removed_w = h * self.segment_inner_area_m2 * (segment_c - gas_in_c);

        HeatRemoval {
            removed_w,
            gas_outlet_c: gas_in_c + removed_w / (mdot * film.cp),
        }
    }

    /// March the gas from inlet to outlet over `segments_c`, feeding each
    /// segment's outlet temperature into the next.
    pub fn gas_temperature_profile(
        &self,
        segments_c: &[f64],
        inlet_c: f64,
        flow_nm3h: f64,
    ) -> GasProfile {
        let n = segments_c.len();
        if nitrogen::mass_rate_from_normal(flow_nm3h) <= EPSILON_MDOT {
            return GasProfile {
                removed_w: vec![0.0; n],
                gas_temps_c: vec![inlet_c; n + 1],
            };
        }

        let mut removed_w = Vec::with_capacity(n);
        let mut gas_temps_c = Vec::with_capacity(n + 1);
        gas_temps_c.push(inlet_c);
        let mut gas_c = inlet_c;
        for &wall_c in segments_c {
            let step = self.heat_removal(flow_nm3h, wall_c, gas_c);
            removed_w.push(step.removed_w);
            gas_c = step.gas_outlet_c;
            gas_temps_c.push(gas_c);
        }
        GasProfile {
            removed_w,
            gas_temps_c,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn removal_nonnegative(
            flow in 0.0_f64..10_000.0,
            wall in -190.0_f64..60.0,
            gas in -190.0_f64..60.0,
        ) {
            let d = 0.28;
            let bore = InternalConvection { inner_diameter_m: d, segment_inner_area_m2: 10.0 };
            let r = bore.heat_removal(flow, wall, gas);
            prop_assert!(r.removed_w >= 0.0);
            prop_assert!(r.gas_outlet_c >= gas);
        }
    }
}
