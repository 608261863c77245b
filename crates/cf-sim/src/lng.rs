//! LNG introduction into a pipeline that has been cooled with nitrogen.
//!
//! Liquid enters at the inlet on a single ramp up to the rate allowed by the
//! velocity cap. The liquid column pushes the cold nitrogen ahead of it out
//! through the vent; friction in the remaining gas column sets the inlet
//! pressure.

use crate::cooldown::{CooldownResult, DEFAULT_SEGMENTS};
use crate::error::{SimError, SimResult};
use crate::inputs::LngInputs;
use crate::record::{
    LngChartPoint, PressurePoint, PressureSnapshot, ProfilePoint, ProfileSnapshot,
    temperature_profile,
};
use cf_components::FrictionLine;
use cf_controls::{FillRamp, Setpoint, SnapshotClock};
use cf_core::SECONDS_PER_HOUR;
use cf_core::units::bar;
use cf_props::nitrogen;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uom::si::pressure::bar as bar_unit;

pub const LNG_TIME_STEP_S: f64 = 60.0;
pub const LNG_SNAPSHOT_INTERVAL_S: f64 = 1800.0;
pub const MAX_LNG_ITERATIONS: usize = 50_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LngResult {
    pub inputs: LngInputs,
    pub total_filling_time_h: f64,
    pub total_lng_volume_m3: f64,
    pub total_lng_mass_kg: f64,
    /// Fill rate at the velocity cap [m³/h]
    pub max_fill_rate_m3h: f64,
    pub chart: Vec<LngChartPoint>,
    pub pressure_series: Vec<PressureSnapshot>,
    pub temperature_series: Vec<ProfileSnapshot>,
    pub final_temperature_profile: Vec<ProfilePoint>,
}

/// Where the liquid front is and what the gas column ahead of it costs.
struct FillState {
    filled_length_m: f64,
    column_length_m: f64,
    inlet_pressure_bar: f64,
}

/// Run the LNG fill on the pipe described by a finished cooldown.
pub fn run_lng_introduction(inputs: &LngInputs, cooldown: &CooldownResult) -> SimResult<LngResult> {
    let pipe = &cooldown.pipe;
    let length_m = cooldown.inputs.pipe_length_m;
    let volume_m3 = pipe.internal_volume_m3;
    if !(volume_m3 > 0.0 && length_m > 0.0) {
        return Err(SimError::invalid(
            "invalid pipe dimensions from cooldown results",
        ));
    }

    let area = pipe.flow_area_m2;
    let inner_diameter_m = 2.0 * pipe.inner_radius_mm / 1000.0;
    let max_rate_m3h = inputs.max_velocity_m_s * area * SECONDS_PER_HOUR;
    if inputs.initial_filling_rate_m3h > max_rate_m3h {
        return Err(SimError::invalid(format!(
            "initial filling rate ({} m³/h) cannot exceed the max rate from the velocity limit ({:.1} m³/h)",
            inputs.initial_filling_rate_m3h, max_rate_m3h
        )));
    }
    let ramp = FillRamp::new(inputs.initial_filling_rate_m3h, max_rate_m3h, inputs.ramp_up_hours)?;

    let friction = FrictionLine {
        inner_diameter_m,
        flow_area_m2: area,
        relative_roughness: cooldown.inputs.pipe_roughness_mm / 1000.0 / inner_diameter_m,
    };
    let gas_c = cooldown.inputs.target_temp_c;
    let back_bar = inputs.vent_back_pressure_bar;
    let n = DEFAULT_SEGMENTS;
    let slice_temps = vec![gas_c; n];
    let centre = |i: usize| (i as f64 + 0.5) * length_m / n as f64;

    info!(
        volume_m3,
        max_rate_m3h,
        back_pressure_bar = back_bar,
        "starting LNG introduction"
    );

    let mut chart = vec![LngChartPoint {
        fill_rate_m3h: inputs.initial_filling_rate_m3h,
        velocity_m_s: inputs.initial_filling_rate_m3h / SECONDS_PER_HOUR / area,
        inlet_pressure_bar: back_bar,
        ..LngChartPoint::default()
    }];
    let mut temperature_series = vec![ProfileSnapshot {
        time_h: 0.0,
        profile: temperature_profile(&slice_temps, centre),
    }];
    let mut pressure_series = vec![PressureSnapshot {
        time_h: 0.0,
        profile: (0..n)
            .map(|i| PressurePoint {
                length_m: centre(i),
                pressure_bar: back_bar,
            })
            .collect(),
    }];

    let dt = LNG_TIME_STEP_S;
    let dt_h = dt / SECONDS_PER_HOUR;
    let mut snapshots = SnapshotClock::new(LNG_SNAPSHOT_INTERVAL_S, 0.0)?;
    let mut filled_m3 = 0.0;
    let mut time_s = 0.0;
    let mut iterations = 0;

    while filled_m3 < volume_m3 {
        if iterations >= MAX_LNG_ITERATIONS {
            warn!(iterations, filled_m3, "LNG introduction timed out");
            return Err(SimError::Timeout { iterations });
        }
        iterations += 1;

        let rate_m3h = ramp.value_at(time_s / SECONDS_PER_HOUR);
        let added_m3 = rate_m3h * dt_h;
        filled_m3 += added_m3;
        time_s += dt;

        // displaced gas leaves at vent pressure and post-cooldown temperature
        let vent_nm3h = nitrogen::normal_volume(back_bar, added_m3, gas_c) / dt_h;
        let filled_length_m = filled_m3 / area;
        let column_length_m = (length_m - filled_length_m).max(0.0);
        let vent = bar(back_bar);
        let inlet = friction.inlet_pressure_for_mass_rate(
            nitrogen::mass_rate_from_normal(vent_nm3h),
            &slice_temps,
            column_length_m / n as f64,
            vent,
        );
        let inlet_pressure_bar = back_bar + (inlet - vent).get::<bar_unit>();

        chart.push(LngChartPoint {
            time_h: time_s / SECONDS_PER_HOUR,
            fill_rate_m3h: rate_m3h,
            velocity_m_s: rate_m3h / SECONDS_PER_HOUR / area,
            filled_volume_m3: filled_m3.min(volume_m3),
            n2_vent_rate_nm3h: vent_nm3h,
            inlet_pressure_bar,
        });

        if snapshots.fire(time_s) {
            let state = FillState {
                filled_length_m,
                column_length_m,
                inlet_pressure_bar,
            };
            // stamped after the clock advances, so t = 0 is not repeated
            let time_h = time_s / SECONDS_PER_HOUR;
            debug!(time_h, filled_m3, inlet_pressure_bar, "LNG snapshot");
            let temps: Vec<f64> = (0..n)
                .map(|i| {
                    if centre(i) < state.filled_length_m {
                        inputs.lng_temperature_c
                    } else {
                        gas_c
                    }
                })
                .collect();
            temperature_series.push(ProfileSnapshot {
                time_h,
                profile: temperature_profile(&temps, centre),
            });
            pressure_series.push(PressureSnapshot {
                time_h,
                profile: pressure_profile(&state, back_bar, (0..n).map(centre)),
            });
        }
    }

    let final_temperature_profile = temperature_profile(&vec![inputs.lng_temperature_c; n], centre);
    temperature_series.push(ProfileSnapshot {
        time_h: time_s / SECONDS_PER_HOUR,
        profile: final_temperature_profile.clone(),
    });

    info!(
        hours = time_s / SECONDS_PER_HOUR,
        iterations, "LNG introduction complete"
    );

    Ok(LngResult {
        inputs: inputs.clone(),
        total_filling_time_h: time_s / SECONDS_PER_HOUR,
        total_lng_volume_m3: volume_m3,
        total_lng_mass_kg: volume_m3 * inputs.lng_density_kg_m3,
        max_fill_rate_m3h: max_rate_m3h,
        chart,
        pressure_series,
        temperature_series,
        final_temperature_profile,
    })
}

/// Liquid-filled positions see the inlet pressure; along the gas column the
/// pressure falls linearly to the vent.
fn pressure_profile(
    state: &FillState,
    back_bar: f64,
    positions: impl Iterator<Item = f64>,
) -> Vec<PressurePoint> {
    let dp_bar = state.inlet_pressure_bar - back_bar;
    positions
        .map(|x| {
            let pressure_bar = if x < state.filled_length_m {
                state.inlet_pressure_bar
            } else if state.column_length_m > 0.0 {
                let to_vent = state.column_length_m - (x - state.filled_length_m);
                back_bar + dp_bar * to_vent / state.column_length_m
            } else {
                back_bar
            };
            PressurePoint {
                length_m: x,
                pressure_bar,
            }
        })
        .collect()
}
