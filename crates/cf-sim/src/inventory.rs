//! Nitrogen budget for the whole procedure.
//!
//! The simulated cooldown is only one consumer. Purging before the
//! cooldown, keeping the line cold through planned holds and keeping it
//! inerted afterwards all need gas too, and the total is padded by an
//! operational margin.

use crate::inputs::CooldownInputs;
use cf_props::constants::RHO_N2_NORMAL;
use cf_props::nitrogen;
use serde::{Deserialize, Serialize};

/// Nitrogen consumption breakdown [Nm³ unless noted].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NitrogenInventory {
    pub purge_nm3: f64,
    pub cooldown_nm3: f64,
    pub holds_nm3: f64,
    pub preservation_nm3: f64,
    pub sub_total_nm3: f64,
    pub margin_nm3: f64,
    pub grand_total_nm3: f64,
    pub grand_total_kg: f64,
}

/// Gas needed to hold the line at `target_c` for `holds × hold_hours`,
/// fed at `final_inlet_c` and leaving at the target.
///
/// Zero when there are no holds, no hold time, or the gas could not absorb
/// heat at the target.
pub fn holds_nm3(
    ingress_at_target_w: f64,
    target_c: f64,
    final_inlet_c: f64,
    holds: u32,
    hold_hours: f64,
) -> f64 {
    let delta_t = target_c - final_inlet_c;
    if holds == 0 || hold_hours <= 0.0 || delta_t <= 0.0 {
        return 0.0;
    }
    let cp = nitrogen::cp((target_c + final_inlet_c) / 2.0);
    let mdot = ingress_at_target_w / (cp * delta_t);
    nitrogen::normal_from_mass_rate(mdot) * f64::from(holds) * hold_hours
}

impl NitrogenInventory {
    /// Build the budget from the simulated cooldown consumption.
    ///
    /// `line_volume_nm3` is the pipe's gas content at the initial
    /// temperature; `ingress_at_target_w` is the whole-line ingress with
    /// every segment at the target temperature.
    pub fn tally(
        inputs: &CooldownInputs,
        cooldown_nm3: f64,
        line_volume_nm3: f64,
        ingress_at_target_w: f64,
    ) -> Self {
        let purge_nm3 = line_volume_nm3 * inputs.purge_volumes;
        let holds_nm3 = holds_nm3(
            ingress_at_target_w,
            inputs.target_temp_c,
            inputs.final_n2_inlet_temp_c,
            inputs.number_of_holds,
            inputs.hold_duration_hours,
        );
        let preservation_nm3 = line_volume_nm3
            * (inputs.preservation_leak_pct_per_day / 100.0)
            * inputs.preservation_days;

        let sub_total_nm3 = cooldown_nm3 + holds_nm3 + purge_nm3 + preservation_nm3;
        let margin_nm3 = sub_total_nm3 * inputs.operational_margin_pct / 100.0;
        let grand_total_nm3 = sub_total_nm3 + margin_nm3;

        Self {
            purge_nm3,
            cooldown_nm3,
            holds_nm3,
            preservation_nm3,
            sub_total_nm3,
            margin_nm3,
            grand_total_nm3,
            grand_total_kg: grand_total_nm3 * RHO_N2_NORMAL,
        }
    }
}
