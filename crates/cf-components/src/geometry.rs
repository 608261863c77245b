//! Pipeline geometry derived once at simulation start.

use crate::common::{check_finite, check_positive};
use crate::error::ComponentResult;
use cf_core::units::{Area, Length, Mass, Volume, kg, m, m2, m3, mm};
use cf_props::constants::{ATMOSPHERIC_PRESSURE_BAR, K_SS304, RHO_SS304};
use cf_props::nitrogen;
use std::f64::consts::PI;

/// Pipe dimensions as entered by the user (millimetres for wall-scale sizes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeSpec {
    pub length_m: f64,
    pub outer_diameter_mm: f64,
    pub wall_thickness_mm: f64,
    pub roughness_mm: f64,
    pub insulation_thickness_mm: f64,
    /// Insulation thermal conductivity [W/(m·K)]
    pub insulation_k: f64,
}

/// Immutable pipe geometry, split into `segments` equal slices.
///
/// Segment 0 is the inlet, `segments - 1` the outlet.
#[derive(Debug, Clone, PartialEq)]
pub struct PipeGeometry {
    pub segments: usize,
    pub length: Length,
    pub outer_radius: Length,
    pub inner_radius: Length,
    pub insulation_outer_radius: Length,
    pub roughness: Length,
    /// Steel annulus cross-section
    pub steel_area: Area,
    /// Internal flow cross-section
    pub flow_area: Area,
    /// Bare steel outer surface over the whole length
    pub outer_surface_area: Area,
    /// Gas-filled internal volume
    pub internal_volume: Volume,
    /// Internal volume expressed in Nm³ of gas at the initial temperature
    pub internal_volume_nm3: f64,
    pub mass: Mass,
    pub segment_length: Length,
    pub segment_mass: Mass,
    pub segment_inner_area: Area,
    pub segment_insulation_area: Area,
    /// Conductive resistance of one segment's steel wall [K/W]
    pub r_pipe_segment: f64,
    /// Conductive resistance of one segment's insulation [K/W]
    pub r_insulation_segment: f64,
}

impl PipeGeometry {
    /// Derive the geometry. `initial_temp_c` sets the gas inventory used for
    /// the thermal-front model.
    pub fn new(spec: &PipeSpec, segments: usize, initial_temp_c: f64) -> ComponentResult<Self> {
        if segments == 0 {
            return Err(crate::ComponentError::InvalidArg {
                what: "segment count must be positive",
            });
        }
        let length_m = check_positive(spec.length_m, "pipe length")?;
        let outer_radius = mm(spec.outer_diameter_mm) / 2.0;
        let inner_radius = outer_radius - mm(spec.wall_thickness_mm);
        check_positive(inner_radius.value, "pipe inner radius")?;
        let insulation_outer_radius = outer_radius + mm(spec.insulation_thickness_mm);

        let r_o = outer_radius.value;
        let r_i = inner_radius.value;
        let r_ins = insulation_outer_radius.value;
        let n = segments as f64;
        let segment_length_m = length_m / n;

        let steel_area_m2 = PI * (r_o.powi(2) - r_i.powi(2));
        let flow_area_m2 = PI * r_i.powi(2);
        let internal_volume_m3 = flow_area_m2 * length_m;
        let mass_kg = check_finite(steel_area_m2 * length_m * RHO_SS304, "pipe mass")?;

        let r_pipe_segment = (r_o / r_i).ln() / (2.0 * PI * K_SS304 * segment_length_m);
        let r_insulation_segment =
            (r_ins / r_o).ln() / (2.0 * PI * spec.insulation_k * segment_length_m);

        Ok(Self {
            segments,
            length: m(length_m),
            outer_radius,
            inner_radius,
            insulation_outer_radius,
            roughness: mm(spec.roughness_mm),
            steel_area: m2(steel_area_m2),
            flow_area: m2(flow_area_m2),
            outer_surface_area: m2(2.0 * PI * r_o * length_m),
            internal_volume: m3(internal_volume_m3),
            internal_volume_nm3: nitrogen::normal_volume(
                ATMOSPHERIC_PRESSURE_BAR,
                internal_volume_m3,
                initial_temp_c,
            ),
            mass: kg(mass_kg),
            segment_length: m(segment_length_m),
            segment_mass: kg(mass_kg / n),
            segment_inner_area: m2(2.0 * PI * r_i * segment_length_m),
            segment_insulation_area: m2(2.0 * PI * r_ins * length_m / n),
            r_pipe_segment,
            r_insulation_segment,
        })
    }

    pub fn inner_diameter(&self) -> Length {
        self.inner_radius * 2.0
    }

    /// ε/D
    pub fn relative_roughness(&self) -> f64 {
        self.roughness.value / self.inner_diameter().value
    }

    /// Series steel + insulation resistance of one segment [K/W].
    pub fn r_conductive_segment(&self) -> f64 {
        self.r_pipe_segment + self.r_insulation_segment
    }

    /// Distance from the inlet to the downstream face of segment `index` [m].
    pub fn segment_end(&self, index: usize) -> f64 {
        (index + 1) as f64 * self.segment_length.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_core::{Tolerances, nearly_equal};

    fn spec() -> PipeSpec {
        PipeSpec {
            length_m: 622.0,
            outer_diameter_mm: 323.8,
            wall_thickness_mm: 21.44,
            roughness_mm: 0.045,
            insulation_thickness_mm: 100.0,
            insulation_k: 0.01,
        }
    }

    #[test]
    fn derived_dimensions() {
        let geo = PipeGeometry::new(&spec(), 50, 40.0).unwrap();
        let tol = Tolerances {
            abs: 1e-9,
            rel: 1e-9,
        };
        assert!(nearly_equal(geo.outer_radius.value, 0.1619, tol));
        assert!(nearly_equal(geo.inner_radius.value, 0.1619 - 0.02144, tol));
        assert!(nearly_equal(geo.segment_length.value, 12.44, tol));
        assert!(nearly_equal(
            geo.segment_mass.value * 50.0,
            geo.mass.value,
            tol
        ));
        // ~38.5 m³ of gas in the line
        assert!(geo.internal_volume.value > 38.0 && geo.internal_volume.value < 39.0);
        // warm gas: fewer Nm³ than physical m³
        assert!(geo.internal_volume_nm3 < geo.internal_volume.value);
    }

    #[test]
    fn insulation_dominates_resistance() {
        let geo = PipeGeometry::new(&spec(), 50, 40.0).unwrap();
        assert!(geo.r_insulation_segment > 100.0 * geo.r_pipe_segment);
        assert!(nearly_equal(
            geo.r_conductive_segment(),
            geo.r_pipe_segment + geo.r_insulation_segment,
            Tolerances::default()
        ));
    }

    #[test]
    fn rejects_wall_thicker_than_radius() {
        let mut bad = spec();
        bad.wall_thickness_mm = 161.9;
        assert!(PipeGeometry::new(&bad, 50, 40.0).is_err());
    }

    #[test]
    fn rejects_zero_length() {
        let mut bad = spec();
        bad.length_m = 0.0;
        assert!(PipeGeometry::new(&bad, 50, 40.0).is_err());
    }

    #[test]
    fn segment_positions() {
        let geo = PipeGeometry::new(&spec(), 50, 40.0).unwrap();
        let tol = Tolerances::default();
        assert!(nearly_equal(geo.segment_end(49), 622.0, tol));
        assert!(nearly_equal(geo.segment_end(0), 12.44, tol));
    }
}
