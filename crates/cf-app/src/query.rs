//! Query helpers for extracting data from loaded runs.

use cf_results::{RunKind, RunOutput};
use cf_sim::{ChartPoint, LngChartPoint, ProfilePoint};

use crate::error::{AppError, AppResult};

/// Headline numbers of a run, in display order.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub kind: RunKind,
    pub time_range_h: (f64, f64),
    pub point_count: usize,
    pub snapshot_count: usize,
    pub values: Vec<(&'static str, f64)>,
    pub warnings: Vec<String>,
}

const COOLDOWN_SERIES: &[&str] = &[
    "outlet_temp_c",
    "n2_flow_nm3h",
    "n2_inlet_temp_c",
    "cooldown_rate_c_per_h",
    "n2_accumulated_nm3",
    "inlet_pressure_bar",
    "q_ingress_kw",
    "q_convection_kw",
    "q_radiation_kw",
    "q_removed_kw",
    "q_accumulation_kw",
    "heat_added_mj",
    "heat_added_convection_mj",
    "heat_added_radiation_mj",
    "heat_removed_mj",
    "net_heat_removed_mj",
];

const LNG_SERIES: &[&str] = &[
    "fill_rate_m3h",
    "velocity_m_s",
    "filled_volume_m3",
    "n2_vent_rate_nm3h",
    "inlet_pressure_bar",
];

/// Chart variables available for a run kind.
pub fn series_variables(kind: RunKind) -> &'static [&'static str] {
    match kind {
        RunKind::Cooldown => COOLDOWN_SERIES,
        RunKind::Lng => LNG_SERIES,
    }
}

fn cooldown_value(p: &ChartPoint, variable: &str) -> Option<f64> {
    let v = match variable {
        "outlet_temp_c" | "outlet_temperature" => p.outlet_temp_c,
        "n2_flow_nm3h" | "flow" => p.n2_flow_nm3h,
        "n2_inlet_temp_c" | "inlet_temperature" => p.n2_inlet_temp_c,
        "cooldown_rate_c_per_h" | "cooldown_rate" => p.cooldown_rate_c_per_h,
        "n2_accumulated_nm3" => p.n2_accumulated_nm3,
        "inlet_pressure_bar" | "pressure" => p.inlet_pressure_bar,
        "q_ingress_kw" => p.q_ingress_kw,
        "q_convection_kw" => p.q_convection_kw,
        "q_radiation_kw" => p.q_radiation_kw,
        "q_removed_kw" => p.q_removed_kw,
        "q_accumulation_kw" => p.q_accumulation_kw,
        "heat_added_mj" => p.heat_added_mj,
        "heat_added_convection_mj" => p.heat_added_convection_mj,
        "heat_added_radiation_mj" => p.heat_added_radiation_mj,
        "heat_removed_mj" => p.heat_removed_mj,
        "net_heat_removed_mj" => p.net_heat_removed_mj,
        _ => return None,
    };
    Some(v)
}

fn lng_value(p: &LngChartPoint, variable: &str) -> Option<f64> {
    let v = match variable {
        "fill_rate_m3h" | "fill_rate" => p.fill_rate_m3h,
        "velocity_m_s" | "velocity" => p.velocity_m_s,
        "filled_volume_m3" => p.filled_volume_m3,
        "n2_vent_rate_nm3h" | "vent_rate" => p.n2_vent_rate_nm3h,
        "inlet_pressure_bar" | "pressure" => p.inlet_pressure_bar,
        _ => return None,
    };
    Some(v)
}

/// Extract `(time_h, value)` pairs for a chart variable.
pub fn extract_series(output: &RunOutput, variable: &str) -> AppResult<Vec<(f64, f64)>> {
    let unknown = || {
        AppError::InvalidInput(format!(
            "Unknown {} variable: {} (expected one of: {})",
            output.kind(),
            variable,
            series_variables(output.kind()).join(", ")
        ))
    };
    match output {
        RunOutput::Cooldown(r) => r
            .chart
            .iter()
            .map(|p| cooldown_value(p, variable).map(|v| (p.time_h, v)))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(unknown),
        RunOutput::Lng(r) => r
            .chart
            .iter()
            .map(|p| lng_value(p, variable).map(|v| (p.time_h, v)))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(unknown),
    }
}

/// Temperature along the pipe at the end of the run.
pub fn final_profile(output: &RunOutput) -> &[ProfilePoint] {
    match output {
        RunOutput::Cooldown(r) => &r.final_profile,
        RunOutput::Lng(r) => &r.final_temperature_profile,
    }
}

pub fn get_run_summary(output: &RunOutput) -> AppResult<RunSummary> {
    match output {
        RunOutput::Cooldown(r) => {
            let last = r
                .chart
                .last()
                .ok_or_else(|| AppError::InvalidInput("No chart points in run".to_string()))?;
            let mut warnings = Vec::new();
            if r.rate_limit.exceeded {
                warnings.push(format!(
                    "cooldown rate peaked at {:.1} °C/h, above the {:.1} °C/h limit ({} steps)",
                    r.rate_limit.peak_c_per_h, r.rate_limit.limit_c_per_h, r.rate_limit.steps_above_limit
                ));
            }
            Ok(RunSummary {
                kind: RunKind::Cooldown,
                time_range_h: (r.chart[0].time_h, last.time_h),
                point_count: r.chart.len(),
                snapshot_count: r.profile_series.len(),
                values: vec![
                    ("total_time_h", r.summary.total_time_h),
                    ("final_outlet_temp_c", last.outlet_temp_c),
                    ("peak_cooldown_rate_c_per_h", r.summary.peak_cooldown_rate_c_per_h),
                    ("peak_heat_removal_kw", r.summary.peak_heat_removal_kw),
                    ("cooldown_n2_nm3", r.inventory.cooldown_nm3),
                    ("purge_n2_nm3", r.inventory.purge_nm3),
                    ("holds_n2_nm3", r.inventory.holds_nm3),
                    ("preservation_n2_nm3", r.inventory.preservation_nm3),
                    ("grand_total_n2_nm3", r.inventory.grand_total_nm3),
                    ("grand_total_n2_kg", r.inventory.grand_total_kg),
                    ("heat_ingress_mj", r.heat.ingress_mj),
                    ("heat_removed_mj", r.heat.removed_mj),
                    ("pipe_mass_kg", r.pipe.mass_kg),
                    ("internal_volume_m3", r.pipe.internal_volume_m3),
                ],
                warnings,
            })
        }
        RunOutput::Lng(r) => {
            let last = r
                .chart
                .last()
                .ok_or_else(|| AppError::InvalidInput("No chart points in run".to_string()))?;
            let peak_pressure = r
                .chart
                .iter()
                .map(|p| p.inlet_pressure_bar)
                .fold(f64::NEG_INFINITY, f64::max);
            Ok(RunSummary {
                kind: RunKind::Lng,
                time_range_h: (r.chart[0].time_h, last.time_h),
                point_count: r.chart.len(),
                snapshot_count: r.temperature_series.len(),
                values: vec![
                    ("total_filling_time_h", r.total_filling_time_h),
                    ("total_lng_volume_m3", r.total_lng_volume_m3),
                    ("total_lng_mass_kg", r.total_lng_mass_kg),
                    ("max_fill_rate_m3h", r.max_fill_rate_m3h),
                    ("peak_inlet_pressure_bar", peak_pressure),
                ],
                warnings: Vec::new(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_sim::{CooldownInputs, LngInputs, run_cooldown, run_lng_introduction};

    #[test]
    fn every_listed_variable_extracts() {
        let cooldown = run_cooldown(&CooldownInputs::default()).unwrap();
        let lng = run_lng_introduction(&LngInputs::default(), &cooldown).unwrap();
        let outputs = [
            RunOutput::Cooldown(Box::new(cooldown)),
            RunOutput::Lng(Box::new(lng)),
        ];
        for output in &outputs {
            for variable in series_variables(output.kind()) {
                let series = extract_series(output, variable).unwrap();
                assert!(!series.is_empty(), "{variable}");
            }
            assert!(extract_series(output, "nonsense").is_err());
            let summary = get_run_summary(output).unwrap();
            assert_eq!(summary.time_range_h.0, 0.0);
            assert!(!final_profile(output).is_empty());
        }
    }
}
