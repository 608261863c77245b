//! Engine input records.
//!
//! Field units are in the names. Missing fields deserialize to the default
//! scenario so hand-written project files can stay short.

use cf_components::PipeSpec;
use cf_controls::{FlowRamp, InletTemperatureRamp};
use serde::{Deserialize, Serialize};

/// Everything the cooldown engine needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownInputs {
    // pipeline
    pub pipe_length_m: f64,
    pub pipe_od_mm: f64,
    pub pipe_wt_mm: f64,
    pub pipe_roughness_mm: f64,

    // process
    pub initial_temp_c: f64,
    pub target_temp_c: f64,
    pub ambient_temp_c: f64,

    // vaporizer temperature schedule
    pub initial_n2_inlet_temp_c: f64,
    pub final_n2_inlet_temp_c: f64,
    pub n2_temp_step_c: f64,
    pub n2_temp_hold_hours: f64,

    // flow schedule
    pub initial_n2_flow_nm3h: f64,
    pub intermediate_n2_flow_nm3h: f64,
    pub max_n2_flow_nm3h: f64,
    pub flow_ramp_intermediate_hours: f64,
    pub flow_ramp_total_hours: f64,

    // heat transfer and constraints
    pub insulation_thickness_mm: f64,
    /// Insulation conductivity [W/(m·K)]
    pub insulation_k: f64,
    /// External convection coefficient [W/(m²·K)]
    pub ext_convection_coeff: f64,
    pub emissivity: f64,
    pub cooldown_rate_limit_c_per_h: f64,
    pub number_of_holds: u32,
    pub hold_duration_hours: f64,

    // purge, preservation, margin
    /// Pipe volumes of nitrogen used for the initial purge
    pub purge_volumes: f64,
    pub preservation_days: f64,
    pub preservation_leak_pct_per_day: f64,
    pub operational_margin_pct: f64,

    pub time_step_s: f64,
}

impl Default for CooldownInputs {
    /// 622 m of 12" line, aerogel insulation, cooled to -110 °C.
    fn default() -> Self {
        Self {
            pipe_length_m: 622.0,
            pipe_od_mm: 323.8,
            pipe_wt_mm: 21.44,
            pipe_roughness_mm: 0.045,
            initial_temp_c: 40.0,
            target_temp_c: -110.0,
            ambient_temp_c: 40.0,
            initial_n2_inlet_temp_c: 15.0,
            final_n2_inlet_temp_c: -150.0,
            n2_temp_step_c: 30.0,
            n2_temp_hold_hours: 1.0,
            initial_n2_flow_nm3h: 1000.0,
            intermediate_n2_flow_nm3h: 3000.0,
            max_n2_flow_nm3h: 5000.0,
            flow_ramp_intermediate_hours: 4.0,
            flow_ramp_total_hours: 8.0,
            insulation_thickness_mm: 100.0,
            insulation_k: 0.01,
            ext_convection_coeff: 10.0,
            emissivity: 0.9,
            cooldown_rate_limit_c_per_h: 10.0,
            number_of_holds: 1,
            hold_duration_hours: 2.0,
            purge_volumes: 3.0,
            preservation_days: 0.0,
            preservation_leak_pct_per_day: 1.0,
            operational_margin_pct: 20.0,
            time_step_s: 60.0,
        }
    }
}

impl CooldownInputs {
    pub fn pipe_spec(&self) -> PipeSpec {
        PipeSpec {
            length_m: self.pipe_length_m,
            outer_diameter_mm: self.pipe_od_mm,
            wall_thickness_mm: self.pipe_wt_mm,
            roughness_mm: self.pipe_roughness_mm,
            insulation_thickness_mm: self.insulation_thickness_mm,
            insulation_k: self.insulation_k,
        }
    }

    pub fn inlet_temperature_ramp(&self) -> InletTemperatureRamp {
        InletTemperatureRamp {
            initial_c: self.initial_n2_inlet_temp_c,
            final_c: self.final_n2_inlet_temp_c,
            step_c: self.n2_temp_step_c,
            hold_hours: self.n2_temp_hold_hours,
        }
    }

    pub fn flow_ramp(&self) -> FlowRamp {
        FlowRamp {
            initial: self.initial_n2_flow_nm3h,
            intermediate: self.intermediate_n2_flow_nm3h,
            max: self.max_n2_flow_nm3h,
            intermediate_hours: self.flow_ramp_intermediate_hours,
            total_hours: self.flow_ramp_total_hours,
        }
    }
}

/// LNG fill following a completed cooldown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LngInputs {
    pub initial_filling_rate_m3h: f64,
    /// Liquid velocity cap that sets the maximum fill rate [m/s]
    pub max_velocity_m_s: f64,
    pub ramp_up_hours: f64,
    pub lng_density_kg_m3: f64,
    /// Absolute pressure at the vent [bar]
    pub vent_back_pressure_bar: f64,
    pub lng_temperature_c: f64,
}

impl Default for LngInputs {
    fn default() -> Self {
        Self {
            initial_filling_rate_m3h: 5.0,
            max_velocity_m_s: 0.1,
            ramp_up_hours: 1.0,
            lng_density_kg_m3: 450.0,
            vent_back_pressure_bar: 1.1,
            lng_temperature_c: -162.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_controls::Setpoint;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let inputs: CooldownInputs =
            serde_json::from_str(r#"{ "pipe_length_m": 100.0, "number_of_holds": 0 }"#).unwrap();
        assert_eq!(inputs.pipe_length_m, 100.0);
        assert_eq!(inputs.number_of_holds, 0);
        assert_eq!(inputs.pipe_od_mm, 323.8);
        assert_eq!(inputs.time_step_s, 60.0);
    }

    #[test]
    fn schedules_mirror_fields() {
        let inputs = CooldownInputs::default();
        assert_eq!(inputs.flow_ramp().value_at(0.0), 1000.0);
        assert_eq!(inputs.flow_ramp().value_at(10.0), 5000.0);
        assert_eq!(inputs.inlet_temperature_ramp().value_at(0.0), 15.0);
        assert_eq!(inputs.pipe_spec().insulation_k, 0.01);
    }

    #[test]
    fn lng_defaults() {
        let lng = LngInputs::default();
        assert_eq!(lng.vent_back_pressure_bar, 1.1);
        assert_eq!(lng.lng_temperature_c, -162.0);
    }
}
