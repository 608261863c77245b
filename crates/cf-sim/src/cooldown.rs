//! Transient nitrogen cooldown of an insulated steel pipeline.
//!
//! The pipe is split into equal segments, each a lumped steel mass at one
//! temperature. Every step the vaporizer schedule sets the gas inlet
//! temperature, the gas is marched through the pipe to find what each
//! segment gives up, the cold-gas front gates that removal, and ambient
//! ingress is added back. Segment temperatures are advanced by explicit
//! Euler until the outlet reaches the target.

use crate::error::{SimError, SimResult};
use crate::inputs::CooldownInputs;
use crate::inventory::NitrogenInventory;
use crate::record::{ChartPoint, ProfilePoint, ProfileSnapshot, temperature_profile};
use cf_components::{Exposure, FrictionLine, HeatIngress, InternalConvection, PipeGeometry, ThermalFront};
use cf_controls::{Setpoint, SnapshotClock};
use cf_core::units::bar;
use cf_core::SECONDS_PER_HOUR;
use cf_props::constants::ATMOSPHERIC_PRESSURE_BAR;
use cf_props::cp_ss304;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uom::si::pressure::bar as bar_unit;

pub const DEFAULT_SEGMENTS: usize = 50;
pub const MIXING_ZONE_SEGMENTS: usize = 5;
pub const MAX_COOLDOWN_ITERATIONS: usize = 500_000;

/// Outlet cooling [°C] required before a stall can be declared.
const STALL_MIN_COOLING_C: f64 = 1e-6;

/// Relative margin within which outlet ingress counts as matching the
/// best removal the maximum flow can deliver.
const STALL_RELATIVE_TOLERANCE: f64 = 1e-6;

const J_PER_MJ: f64 = 1e6;
const W_PER_KW: f64 = 1e3;

/// Numerical settings for a cooldown run.
#[derive(Debug, Clone, PartialEq)]
pub struct CooldownOptions {
    pub segments: usize,
    /// Mixing-zone length in segments
    pub mixing_width: usize,
    /// Safety limit on loop iterations
    pub max_iterations: usize,
    /// Profile snapshot interval [s]
    pub profile_interval_s: f64,
    /// Report progress every N iterations (0 = never)
    pub progress_every: usize,
}

impl Default for CooldownOptions {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            mixing_width: MIXING_ZONE_SEGMENTS,
            max_iterations: MAX_COOLDOWN_ITERATIONS,
            profile_interval_s: SECONDS_PER_HOUR,
            progress_every: 60,
        }
    }
}

/// Progress event for long cooldown runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CooldownProgress {
    pub iteration: usize,
    pub time_h: f64,
    pub outlet_temp_c: f64,
    pub target_temp_c: f64,
    pub n2_flow_nm3h: f64,
    pub n2_inlet_temp_c: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CooldownSummary {
    pub total_time_h: f64,
    pub iterations: usize,
    pub peak_cooldown_rate_c_per_h: f64,
    pub peak_heat_removal_kw: f64,
}

/// Observed cooldown rate against the thermal-shock limit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RateLimitCheck {
    pub limit_c_per_h: f64,
    pub peak_c_per_h: f64,
    pub steps_above_limit: usize,
    pub exceeded: bool,
}

impl RateLimitCheck {
    fn from_chart(limit_c_per_h: f64, chart: &[ChartPoint]) -> Self {
        let peak_c_per_h = peak(chart.iter().map(|p| p.cooldown_rate_c_per_h));
        let steps_above_limit = chart
            .iter()
            .filter(|p| p.cooldown_rate_c_per_h > limit_c_per_h)
            .count();
        Self {
            limit_c_per_h,
            peak_c_per_h,
            steps_above_limit,
            exceeded: steps_above_limit > 0,
        }
    }
}

/// Heat exchanged over the whole run [MJ].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeatTotals {
    pub ingress_mj: f64,
    pub convection_mj: f64,
    pub radiation_mj: f64,
    pub removed_mj: f64,
}

impl HeatTotals {
    pub fn net_removed_mj(&self) -> f64 {
        self.removed_mj - self.ingress_mj
    }
}

/// Derived pipe properties reported alongside the run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PipeSummary {
    pub mass_kg: f64,
    pub outer_surface_area_m2: f64,
    pub internal_volume_m3: f64,
    pub internal_volume_nm3: f64,
    pub outer_radius_mm: f64,
    pub inner_radius_mm: f64,
    pub steel_cross_section_m2: f64,
    pub flow_area_m2: f64,
    pub segment_length_m: f64,
    /// Sum of the per-segment steel wall resistances [K/W]
    pub r_pipe: f64,
    /// Sum of the per-segment insulation resistances [K/W]
    pub r_insulation: f64,
    pub cp_initial: f64,
    pub cp_target: f64,
}

impl PipeSummary {
    fn new(geo: &PipeGeometry, inputs: &CooldownInputs) -> Self {
        let n = geo.segments as f64;
        Self {
            mass_kg: geo.mass.value,
            outer_surface_area_m2: geo.outer_surface_area.value,
            internal_volume_m3: geo.internal_volume.value,
            internal_volume_nm3: geo.internal_volume_nm3,
            outer_radius_mm: geo.outer_radius.value * 1000.0,
            inner_radius_mm: geo.inner_radius.value * 1000.0,
            steel_cross_section_m2: geo.steel_area.value,
            flow_area_m2: geo.flow_area.value,
            segment_length_m: geo.segment_length.value,
            r_pipe: geo.r_pipe_segment * n,
            r_insulation: geo.r_insulation_segment * n,
            cp_initial: cp_ss304(inputs.initial_temp_c),
            cp_target: cp_ss304(inputs.target_temp_c),
        }
    }
}

/// Outcome of a completed cooldown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CooldownResult {
    pub inputs: CooldownInputs,
    pub summary: CooldownSummary,
    pub rate_limit: RateLimitCheck,
    pub inventory: NitrogenInventory,
    pub heat: HeatTotals,
    pub pipe: PipeSummary,
    pub chart: Vec<ChartPoint>,
    pub final_profile: Vec<ProfilePoint>,
    /// Hourly profiles; starts at t = 0 and ends with the final profile
    pub profile_series: Vec<ProfileSnapshot>,
}

/// Per-step sums over all segments [W].
#[derive(Debug, Clone, Copy, Default)]
struct StepHeat {
    ingress: f64,
    convection: f64,
    radiation: f64,
    removed: f64,
}

impl StepHeat {
    fn add(&mut self, q_in: &HeatIngress, removed_w: f64) {
        self.ingress += q_in.total_w;
        self.convection += q_in.convection_w;
        self.radiation += q_in.radiation_w;
        self.removed += removed_w;
    }
}

impl HeatTotals {
    fn accumulate(&mut self, step: &StepHeat, dt_s: f64) {
        self.ingress_mj += step.ingress * dt_s / J_PER_MJ;
        self.convection_mj += step.convection * dt_s / J_PER_MJ;
        self.radiation_mj += step.radiation * dt_s / J_PER_MJ;
        self.removed_mj += step.removed * dt_s / J_PER_MJ;
    }
}

/// The physics of one pipeline, built once per run.
struct Pipeline {
    geo: PipeGeometry,
    exposure: Exposure,
    bore: InternalConvection,
    friction: FrictionLine,
}

impl Pipeline {
    fn new(inputs: &CooldownInputs, segments: usize) -> SimResult<Self> {
        let geo = PipeGeometry::new(&inputs.pipe_spec(), segments, inputs.initial_temp_c)
            .map_err(|e| SimError::invalid(format!("pipe geometry: {e}")))?;
        let exposure = Exposure {
            ambient_c: inputs.ambient_temp_c,
            surface_area_m2: geo.segment_insulation_area.value,
            emissivity: inputs.emissivity,
            h_conv: inputs.ext_convection_coeff,
            r_conductive: geo.r_conductive_segment(),
        };
        Ok(Self {
            bore: InternalConvection::from(&geo),
            friction: FrictionLine::from(&geo),
            exposure,
            geo,
        })
    }

    /// Inlet pressure [bar abs] with the outlet open to atmosphere.
    fn inlet_pressure_bar(&self, flow_nm3h: f64, temps_c: &[f64]) -> f64 {
        let outlet = bar(ATMOSPHERIC_PRESSURE_BAR);
        let inlet = self.friction.inlet_pressure(
            flow_nm3h,
            temps_c,
            self.geo.segment_length.value,
            outlet,
        );
        ATMOSPHERIC_PRESSURE_BAR + (inlet - outlet).get::<bar_unit>()
    }

    fn profile(&self, temps_c: &[f64]) -> Vec<ProfilePoint> {
        temperature_profile(temps_c, |i| self.geo.segment_end(i))
    }
}

/// Ingress equals or exceeds what maximum flow could remove. The outlet can
/// settle on an exact floating-point fixed point where the two agree to the
/// last few ulps, so equality is judged relatively.
fn removal_exhausted(ingress_w: f64, max_removal_w: f64) -> bool {
    ingress_w >= max_removal_w - max_removal_w.abs() * STALL_RELATIVE_TOLERANCE
}

fn peak(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}

/// Run a cooldown with default numerical options.
pub fn run_cooldown(inputs: &CooldownInputs) -> SimResult<CooldownResult> {
    run_cooldown_with(inputs, &CooldownOptions::default(), None)
}

/// Run a cooldown, reporting progress every `opts.progress_every` iterations.
pub fn run_cooldown_with(
    inputs: &CooldownInputs,
    opts: &CooldownOptions,
    mut progress: Option<&mut dyn FnMut(&CooldownProgress)>,
) -> SimResult<CooldownResult> {
    let dt = inputs.time_step_s;
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SimError::invalid("time step must be positive"));
    }
    let line = Pipeline::new(inputs, opts.segments)?;
    let n = opts.segments;
    let dt_h = dt / SECONDS_PER_HOUR;
    let segment_mass = line.geo.segment_mass.value;
    let target = inputs.target_temp_c;
    let temperature_ramp = inputs.inlet_temperature_ramp();
    let flow_ramp = inputs.flow_ramp();
    let mut snapshots = SnapshotClock::new(opts.profile_interval_s, opts.profile_interval_s)?;

    info!(
        length_m = inputs.pipe_length_m,
        segments = n,
        dt_s = dt,
        target_c = target,
        "starting cooldown"
    );

    let mut temps = vec![inputs.initial_temp_c; n];
    let mut flow = inputs.initial_n2_flow_nm3h;
    let mut throughput_nm3 = 0.0;
    let mut time_s = 0.0;
    let mut heat = HeatTotals::default();
    let mut iterations = 0;

    let mut chart = vec![ChartPoint {
        outlet_temp_c: inputs.initial_temp_c,
        n2_flow_nm3h: flow,
        n2_inlet_temp_c: temperature_ramp.value_at(0.0),
        inlet_pressure_bar: ATMOSPHERIC_PRESSURE_BAR,
        ..ChartPoint::default()
    }];
    let mut profile_series = vec![ProfileSnapshot {
        time_h: 0.0,
        profile: line.profile(&temps),
    }];

    let mut outlet = inputs.initial_temp_c;
    while outlet > target {
        // reaching target on the last allowed iteration counts as success
        if iterations >= opts.max_iterations {
            warn!(iterations, outlet_c = outlet, "cooldown timed out");
            return Err(SimError::Timeout { iterations });
        }
        iterations += 1;

        let prev_outlet = outlet;
        let start_h = time_s / SECONDS_PER_HOUR;
        let inlet_c = temperature_ramp.value_at(start_h);
        let front = ThermalFront::locate(throughput_nm3, line.geo.internal_volume_nm3, n, opts.mixing_width);
        let gas = line.bore.gas_temperature_profile(&temps, inlet_c, flow);

        let mut step = StepHeat::default();
        for (i, t) in temps.iter_mut().enumerate() {
            let q_in = line.exposure.heat_ingress(*t);
            let removed = gas.removed_w[i] * front.mixing_factor(i);
            let net = q_in.total_w - removed;
            *t += net * dt / (segment_mass * cp_ss304(*t));
            step.add(&q_in, removed);
        }
        heat.accumulate(&step, dt);

        outlet = temps[n - 1];
        if !outlet.is_finite() {
            return Err(SimError::invalid(
                "outlet temperature became non-finite; check inputs",
            ));
        }
        let rate = (prev_outlet - outlet) / dt_h;
        time_s += dt;

        if snapshots.fire(time_s) {
            debug!(time_h = time_s / SECONDS_PER_HOUR, outlet_c = outlet, "profile snapshot");
            profile_series.push(ProfileSnapshot {
                time_h: time_s / SECONDS_PER_HOUR,
                profile: line.profile(&temps),
            });
        }

        throughput_nm3 += flow * dt_h;

        chart.push(ChartPoint {
            time_h: time_s / SECONDS_PER_HOUR,
            outlet_temp_c: outlet,
            n2_flow_nm3h: flow,
            n2_inlet_temp_c: inlet_c,
            cooldown_rate_c_per_h: rate,
            n2_accumulated_nm3: throughput_nm3,
            inlet_pressure_bar: line.inlet_pressure_bar(flow, &temps),
            q_ingress_kw: step.ingress / W_PER_KW,
            q_convection_kw: step.convection / W_PER_KW,
            q_radiation_kw: step.radiation / W_PER_KW,
            q_removed_kw: step.removed / W_PER_KW,
            q_accumulation_kw: -(step.ingress - step.removed) / W_PER_KW,
            heat_added_mj: heat.ingress_mj,
            heat_added_convection_mj: heat.convection_mj,
            heat_added_radiation_mj: heat.radiation_mj,
            heat_removed_mj: heat.removed_mj,
            net_heat_removed_mj: heat.net_removed_mj(),
        });

        flow = flow_ramp.value_at(start_h);

        // can the outlet still be cooled at all?
        let at_max = line
            .bore
            .gas_temperature_profile(&temps, inlet_c, inputs.max_n2_flow_nm3h);
        let ingress_w = line.exposure.heat_ingress(outlet).total_w;
        let max_removal_w = at_max.outlet_removal_w();
        if removal_exhausted(ingress_w, max_removal_w)
            && inputs.initial_temp_c - outlet > STALL_MIN_COOLING_C
        {
            warn!(outlet_c = outlet, ingress_w, max_removal_w, "cooldown stalled");
            return Err(SimError::Stalled {
                outlet_temp_c: outlet,
                ingress_w,
                max_removal_w,
            });
        }

        if opts.progress_every > 0 && iterations % opts.progress_every == 0 {
            if let Some(cb) = progress.as_mut() {
                cb(&CooldownProgress {
                    iteration: iterations,
                    time_h: time_s / SECONDS_PER_HOUR,
                    outlet_temp_c: outlet,
                    target_temp_c: target,
                    n2_flow_nm3h: flow,
                    n2_inlet_temp_c: inlet_c,
                });
            }
        }
    }

    let ingress_at_target_w = line.exposure.heat_ingress(target).total_w * n as f64;
    let inventory = NitrogenInventory::tally(
        inputs,
        throughput_nm3,
        line.geo.internal_volume_nm3,
        ingress_at_target_w,
    );

    let final_profile = line.profile(&temps);
    profile_series.push(ProfileSnapshot {
        time_h: time_s / SECONDS_PER_HOUR,
        profile: final_profile.clone(),
    });

    let rate_limit = RateLimitCheck::from_chart(inputs.cooldown_rate_limit_c_per_h, &chart);
    let summary = CooldownSummary {
        total_time_h: time_s / SECONDS_PER_HOUR,
        iterations,
        peak_cooldown_rate_c_per_h: rate_limit.peak_c_per_h,
        peak_heat_removal_kw: peak(chart.iter().map(|p| p.q_removed_kw)),
    };

    info!(
        hours = summary.total_time_h,
        iterations,
        n2_total_nm3 = inventory.grand_total_nm3,
        peak_rate_c_per_h = summary.peak_cooldown_rate_c_per_h,
        "cooldown complete"
    );
    if rate_limit.exceeded {
        warn!(
            limit = rate_limit.limit_c_per_h,
            peak = rate_limit.peak_c_per_h,
            steps = rate_limit.steps_above_limit,
            "cooldown rate limit exceeded"
        );
    }

    Ok(CooldownResult {
        inputs: inputs.clone(),
        summary,
        rate_limit,
        inventory,
        heat,
        pipe: PipeSummary::new(&line.geo, inputs),
        chart,
        final_profile,
        profile_series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_step_rejected_before_iterating() {
        let inputs = CooldownInputs {
            time_step_s: 0.0,
            ..CooldownInputs::default()
        };
        let mut calls = 0;
        let mut cb = |_: &CooldownProgress| calls += 1;
        let err = run_cooldown_with(&inputs, &CooldownOptions::default(), Some(&mut cb)).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig { .. }));
        assert_eq!(calls, 0);
    }

    #[test]
    fn wall_thicker_than_radius_rejected() {
        let inputs = CooldownInputs {
            pipe_wt_mm: 200.0,
            ..CooldownInputs::default()
        };
        let err = run_cooldown(&inputs).unwrap_err();
        assert!(err.to_string().contains("pipe geometry"));
    }

    #[test]
    fn already_at_target_needs_no_iterations() {
        let inputs = CooldownInputs {
            target_temp_c: 40.0,
            ..CooldownInputs::default()
        };
        let result = run_cooldown(&inputs).unwrap();
        assert_eq!(result.summary.iterations, 0);
        assert_eq!(result.chart.len(), 1);
        // t = 0 profile plus the final profile
        assert_eq!(result.profile_series.len(), 2);
        assert_eq!(result.inventory.cooldown_nm3, 0.0);
    }

    #[test]
    fn iteration_ceiling_times_out() {
        let opts = CooldownOptions {
            max_iterations: 10,
            ..CooldownOptions::default()
        };
        let err = run_cooldown_with(&CooldownInputs::default(), &opts, None).unwrap_err();
        assert_eq!(err, SimError::Timeout { iterations: 10 });
    }

    #[test]
    fn target_on_last_allowed_iteration_succeeds() {
        let inputs = CooldownInputs {
            target_temp_c: 35.0,
            ..CooldownInputs::default()
        };
        let needed = run_cooldown(&inputs).unwrap().summary.iterations;
        assert!(needed > 0);
        let opts = CooldownOptions {
            max_iterations: needed,
            ..CooldownOptions::default()
        };
        let result = run_cooldown_with(&inputs, &opts, None).unwrap();
        assert_eq!(result.summary.iterations, needed);

        let short = CooldownOptions {
            max_iterations: needed - 1,
            ..CooldownOptions::default()
        };
        assert_eq!(
            run_cooldown_with(&inputs, &short, None).unwrap_err(),
            SimError::Timeout { iterations: needed - 1 }
        );
    }

    #[test]
    fn removal_exhausted_includes_equality() {
        assert!(removal_exhausted(1200.0, 1200.0));
        // a few ulps short of max removal is still a standstill
        assert!(removal_exhausted(1200.0 * (1.0 - 1e-12), 1200.0));
        assert!(removal_exhausted(1300.0, 1200.0));
        assert!(!removal_exhausted(1100.0, 1200.0));
        // gas warmer than the outlet: any ingress wins
        assert!(removal_exhausted(0.0, -5.0));
    }

    #[test]
    fn equilibrium_short_of_target_stalls_before_ceiling() {
        let base = CooldownInputs::default();
        let inputs = CooldownInputs {
            insulation_k: base.insulation_k * 100.0,
            ext_convection_coeff: base.ext_convection_coeff * 100.0,
            ..base
        };
        let opts = CooldownOptions {
            max_iterations: 20_000,
            ..CooldownOptions::default()
        };
        let err = run_cooldown_with(&inputs, &opts, None).unwrap_err();
        assert!(matches!(err, SimError::Stalled { .. }), "{err:?}");
    }

    #[test]
    fn progress_reported_at_interval() {
        let opts = CooldownOptions {
            max_iterations: 125,
            progress_every: 60,
            ..CooldownOptions::default()
        };
        let mut seen = Vec::new();
        let mut cb = |p: &CooldownProgress| seen.push(p.iteration);
        let _ = run_cooldown_with(&CooldownInputs::default(), &opts, Some(&mut cb));
        assert_eq!(seen, vec![60, 120]);
    }

    #[test]
    fn rate_check_counts_steps() {
        let chart = [5.0, 12.0, 9.0, 15.0].map(|r| ChartPoint {
            cooldown_rate_c_per_h: r,
            ..ChartPoint::default()
        });
        let check = RateLimitCheck::from_chart(10.0, &chart);
        assert_eq!(check.steps_above_limit, 2);
        assert!(check.exceeded);
        assert_eq!(check.peak_c_per_h, 15.0);
    }
}
