//! Environmental heat ingress through insulation into one pipe segment.
//!
//! The outer insulation surface loses heat to ambient by convection and
//! radiation in parallel; the steel wall and insulation conduct in series.
//! Radiation is linearized around the current surface temperature estimate
//! and the surface temperature is found by fixed-point iteration.

use cf_core::c_to_k;
use cf_props::constants::SIGMA;

/// Fixed-point passes before the last estimate is accepted.
pub const MAX_SURFACE_PASSES: usize = 10;

/// Surface temperature change [°C] below which the solve stops.
pub const SURFACE_TOLERANCE_C: f64 = 0.1;

/// Fraction of the segment-to-ambient difference used as the first guess.
const INITIAL_GUESS_FRACTION: f64 = 0.75;

/// External boundary of one segment. Constant for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exposure {
    pub ambient_c: f64,
    /// Insulation outer surface area of the segment [m²]
    pub surface_area_m2: f64,
    pub emissivity: f64,
    /// External convection coefficient [W/(m²·K)]
    pub h_conv: f64,
    /// Series steel + insulation resistance [K/W]
    pub r_conductive: f64,
}

/// Heat flowing into a segment from outside [W].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatIngress {
    pub convection_w: f64,
    pub radiation_w: f64,
    pub total_w: f64,
    pub surface_temp_c: f64,
}

impl HeatIngress {
    fn none(surface_temp_c: f64) -> Self {
        Self {
            convection_w: 0.0,
            radiation_w: 0.0,
            total_w: 0.0,
            surface_temp_c,
        }
    }
}

/// Linearized radiative coefficient σε(Ta+Ts)(Ta²+Ts²) [W/(m²·K)].
pub fn radiative_coefficient(emissivity: f64, ambient_c: f64, surface_c: f64) -> f64 {
    let ta = c_to_k(ambient_c);
    let ts = c_to_k(surface_c);
    SIGMA * emissivity * (ta + ts) * (ta.powi(2) + ts.powi(2))
}

impl Exposure {
    /// Ingress into a segment at `segment_c`.
    ///
    /// Zero when ambient is not warmer than the segment. A solve that does
    /// not settle within [`MAX_SURFACE_PASSES`] keeps its last estimate.
    pub fn heat_ingress(&self, segment_c: f64) -> HeatIngress {
        if self.ambient_c <= segment_c {
            return HeatIngress::none(segment_c);
        }

        let mut surface_c = segment_c + INITIAL_GUESS_FRACTION * (self.ambient_c - segment_c);
        let mut h_rad = 0.0;
        let mut h_ext = 0.0;
        let mut r_ext = 0.0;

        for _ in 0..MAX_SURFACE_PASSES {
            h_rad = radiative_coefficient(self.emissivity, self.ambient_c, surface_c);
            h_ext = self.h_conv + h_rad;
            r_ext = 1.0 / (h_ext * self.surface_area_m2);
            let next = (self.ambient_c * self.r_conductive + segment_c * r_ext)
                / (self.r_conductive + r_ext);
            let settled = (next - surface_c).abs() < SURFACE_TOLERANCE_C;
            surface_c = next;
            if settled {
                break;
            }
        }

        let total_w = (self.ambient_c - segment_c) / (self.r_conductive + r_ext);
        if total_w.is_nan() || total_w <= 0.0 {
            return HeatIngress::none(surface_c);
        }

        HeatIngress {
            convection_w: self.h_conv / h_ext * total_w,
            radiation_w: h_rad / h_ext * total_w,
            total_w,
            surface_temp_c: surface_c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::{Tolerances, nearly_equal};

    fn exposure() -> Exposure {
        // one of 50 segments of the default 622 m line
        Exposure {
            ambient_c: 40.0,
            surface_area_m2: 2.0 * std::f64::consts::PI * 0.2619 * 622.0 / 50.0,
            emissivity: 0.9,
            h_conv: 10.0,
            r_conductive: 0.62,
        }
    }

    #[test]
    fn no_ingress_when_ambient_not_warmer() {
        let exp = exposure();
        let q = exp.heat_ingress(40.0);
        assert_eq!(q.total_w, 0.0);
        assert_eq!(q.surface_temp_c, 40.0);

        let q = exp.heat_ingress(55.0);
        assert_eq!(q, HeatIngress::none(55.0));
    }

    #[test]
    fn split_sums_to_total() {
        let q = exposure().heat_ingress(-110.0);
        assert!(q.total_w > 0.0);
        assert!(nearly_equal(
            q.convection_w + q.radiation_w,
            q.total_w,
            Tolerances::default()
        ));
    }

    #[test]
    fn surface_sits_between_segment_and_ambient() {
        let q = exposure().heat_ingress(-110.0);
        assert!(q.surface_temp_c > -110.0 && q.surface_temp_c < 40.0);
        // good insulation: surface close to ambient
        assert!(q.surface_temp_c > 35.0, "Ts = {}", q.surface_temp_c);
    }

    #[test]
    fn insulation_limited_ingress_close_to_conduction_only() {
        let exp = exposure();
        let q = exp.heat_ingress(-110.0);
        let conduction_only = 150.0 / exp.r_conductive;
        assert!(q.total_w < conduction_only);
        assert!(q.total_w > 0.95 * conduction_only);
    }

    #[test]
    fn radiation_zero_without_emissivity() {
        let mut exp = exposure();
        exp.emissivity = 0.0;
        let q = exp.heat_ingress(-50.0);
        assert_eq!(q.radiation_w, 0.0);
        assert!(nearly_equal(q.convection_w, q.total_w, Tolerances::default()));
    }

    #[test]
    fn radiative_coefficient_near_textbook_value() {
        // ε = 1 at ~300 K: 4σT³ ≈ 6.1 W/(m²·K)
        let h = radiative_coefficient(1.0, 26.85, 26.85);
        assert!((h - 6.12).abs() < 0.05, "h_rad = {h}");
    }
}
