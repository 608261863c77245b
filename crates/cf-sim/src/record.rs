//! Time-series records produced by the engines.

use serde::{Deserialize, Serialize};

/// One cooldown step. Heat rates in kW, accumulated heat in MJ.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartPoint {
    pub time_h: f64,
    pub outlet_temp_c: f64,
    pub n2_flow_nm3h: f64,
    pub n2_inlet_temp_c: f64,
    pub cooldown_rate_c_per_h: f64,
    pub n2_accumulated_nm3: f64,
    pub inlet_pressure_bar: f64,
    pub q_ingress_kw: f64,
    pub q_convection_kw: f64,
    pub q_radiation_kw: f64,
    pub q_removed_kw: f64,
    /// Net heat leaving the steel (negative while the pipe cools) [kW]
    pub q_accumulation_kw: f64,
    pub heat_added_mj: f64,
    pub heat_added_convection_mj: f64,
    pub heat_added_radiation_mj: f64,
    pub heat_removed_mj: f64,
    pub net_heat_removed_mj: f64,
}

/// Temperature at a position along the pipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub length_m: f64,
    pub temperature_c: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub time_h: f64,
    pub profile: Vec<ProfilePoint>,
}

/// One LNG fill step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LngChartPoint {
    pub time_h: f64,
    pub fill_rate_m3h: f64,
    pub velocity_m_s: f64,
    pub filled_volume_m3: f64,
    pub n2_vent_rate_nm3h: f64,
    pub inlet_pressure_bar: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressurePoint {
    pub length_m: f64,
    pub pressure_bar: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureSnapshot {
    pub time_h: f64,
    pub profile: Vec<PressurePoint>,
}

/// Pair segment temperatures with positions from `position(index)`.
pub(crate) fn temperature_profile(
    temps_c: &[f64],
    position: impl Fn(usize) -> f64,
) -> Vec<ProfilePoint> {
    temps_c
        .iter()
        .enumerate()
        .map(|(i, &t)| ProfilePoint {
            length_m: position(i),
            temperature_c: t,
        })
        .collect()
}
