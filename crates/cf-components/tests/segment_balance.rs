//! Segment models working together on the default 622 m line.

use cf_components::{Exposure, FrictionLine, InternalConvection, PipeGeometry, PipeSpec, ThermalFront};
use cf_core::units::bar;
use cf_props::constants::ATMOSPHERIC_PRESSURE_BAR;

fn geometry() -> PipeGeometry {
    let spec = PipeSpec {
        length_m: 622.0,
        outer_diameter_mm: 323.8,
        wall_thickness_mm: 21.44,
        roughness_mm: 0.045,
        insulation_thickness_mm: 100.0,
        insulation_k: 0.01,
    };
    PipeGeometry::new(&spec, 50, 40.0).unwrap()
}

fn exposure(geo: &PipeGeometry) -> Exposure {
    Exposure {
        ambient_c: 40.0,
        surface_area_m2: geo.segment_insulation_area.value,
        emissivity: 0.9,
        h_conv: 10.0,
        r_conductive: geo.r_conductive_segment(),
    }
}

#[test]
fn max_flow_outruns_line_ingress_at_target() {
    let geo = geometry();
    let walls = vec![-110.0; 50];
    let bore = InternalConvection::from(&geo);
    let profile = bore.gas_temperature_profile(&walls, -150.0, 5000.0);
    let removed: f64 = profile.removed_w.iter().sum();
    let ingress = exposure(&geo).heat_ingress(-110.0).total_w * 50.0;
    assert!(removed > ingress, "removed {removed} W, ingress {ingress} W");
    // gas leaves close to wall temperature
    assert!(profile.gas_temps_c[50] > -111.0);
}

#[test]
fn poor_insulation_lets_ingress_win_at_outlet() {
    let geo_spec = PipeSpec {
        length_m: 622.0,
        outer_diameter_mm: 323.8,
        wall_thickness_mm: 21.44,
        roughness_mm: 0.045,
        insulation_thickness_mm: 100.0,
        insulation_k: 1.0,
    };
    let geo = PipeGeometry::new(&geo_spec, 50, 40.0).unwrap();
    let mut exp = exposure(&geo);
    exp.h_conv = 1000.0;

    // upstream already cold: gas reaches the outlet nearly spent
    let mut walls = vec![-140.0; 50];
    walls[49] = -120.0;
    let profile = InternalConvection::from(&geo).gas_temperature_profile(&walls, -150.0, 5000.0);
    let ingress = exp.heat_ingress(walls[49]);
    assert!(profile.gas_temps_c[49] > -141.0);
    assert!(ingress.total_w > profile.outlet_removal_w());
}

#[test]
fn front_gates_removal_near_inlet_first() {
    let geo = geometry();
    let front = ThermalFront::locate(geo.internal_volume_nm3 * 0.31, geo.internal_volume_nm3, 50, 5);
    assert_eq!(front.leader(), 15);
    assert_eq!(front.mixing_factor(0), 1.0);
    assert_eq!(front.mixing_factor(40), 0.0);
}

#[test]
fn pressure_drop_over_whole_line() {
    let geo = geometry();
    let line = FrictionLine::from(&geo);
    let back = bar(ATMOSPHERIC_PRESSURE_BAR);
    let p = line.inlet_pressure(1000.0, &[40.0; 50], geo.segment_length.value, back);
    assert!(p > back);
}
