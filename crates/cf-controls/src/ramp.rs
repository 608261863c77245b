//! Open-loop ramps in elapsed time.

use crate::error::{ControlError, ControlResult};
use cf_core::numeric::lerp;
use serde::{Deserialize, Serialize};

/// A schedule evaluated at elapsed hours since the procedure started.
pub trait Setpoint {
    fn value_at(&self, elapsed_hours: f64) -> f64;
}

/// Vaporizer outlet temperature lowered in equal steps, each held for a
/// fixed time, never going below `final_c`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InletTemperatureRamp {
    pub initial_c: f64,
    pub final_c: f64,
    pub step_c: f64,
    pub hold_hours: f64,
}

impl Setpoint for InletTemperatureRamp {
    fn value_at(&self, elapsed_hours: f64) -> f64 {
        // a degenerate schedule jumps straight to the final temperature
        if self.step_c <= 0.0 || self.hold_hours <= 0.0 {
            return self.final_c;
        }
        let steps = (elapsed_hours / self.hold_hours).floor();
        (self.initial_c - steps * self.step_c).max(self.final_c)
    }
}

/// Two-stage linear flow ramp: initial → intermediate by `intermediate_hours`,
/// then intermediate → max by `total_hours`, max afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowRamp {
    pub initial: f64,
    pub intermediate: f64,
    pub max: f64,
    pub intermediate_hours: f64,
    pub total_hours: f64,
}

impl FlowRamp {
    fn unclamped(&self, h: f64) -> f64 {
        if self.total_hours <= 0.0 || h > self.total_hours {
            return self.max;
        }
        if h <= self.intermediate_hours {
            let progress = if self.intermediate_hours > 0.0 {
                h / self.intermediate_hours
            } else {
                1.0
            };
            lerp(self.initial, self.intermediate, progress)
        } else {
            let stage = self.total_hours - self.intermediate_hours;
            let progress = if stage > 0.0 {
                (h - self.intermediate_hours) / stage
            } else {
                1.0
            };
            lerp(self.intermediate, self.max, progress)
        }
    }
}

impl Setpoint for FlowRamp {
    fn value_at(&self, elapsed_hours: f64) -> f64 {
        // `max` wins if the band is inverted
        self.unclamped(elapsed_hours)
            .max(self.initial)
            .min(self.max)
    }
}

/// Single-stage LNG fill ramp from `initial` to `max` over `ramp_hours`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillRamp {
    initial: f64,
    max: f64,
    ramp_hours: f64,
}

impl FillRamp {
    pub fn new(initial: f64, max: f64, ramp_hours: f64) -> ControlResult<Self> {
        if !initial.is_finite() || !max.is_finite() || !ramp_hours.is_finite() {
            return Err(ControlError::InvalidArg {
                what: "fill ramp values must be finite",
            });
        }
        if max < initial {
            return Err(ControlError::InvalidArg {
                what: "initial filling rate exceeds maximum rate",
            });
        }
        Ok(Self {
            initial,
            max,
            ramp_hours,
        })
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Setpoint for FillRamp {
    fn value_at(&self, elapsed_hours: f64) -> f64 {
        if self.ramp_hours > 0.0 && elapsed_hours < self.ramp_hours {
            lerp(self.initial, self.max, elapsed_hours / self.ramp_hours)
        } else {
            self.max
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vaporizer() -> InletTemperatureRamp {
        InletTemperatureRamp {
            initial_c: 15.0,
            final_c: -150.0,
            step_c: 30.0,
            hold_hours: 1.0,
        }
    }

    fn flow() -> FlowRamp {
        FlowRamp {
            initial: 1000.0,
            intermediate: 3000.0,
            max: 5000.0,
            intermediate_hours: 4.0,
            total_hours: 8.0,
        }
    }

    #[test]
    fn temperature_steps_and_holds() {
        let ramp = vaporizer();
        assert_eq!(ramp.value_at(0.0), 15.0);
        assert_eq!(ramp.value_at(0.99), 15.0);
        assert_eq!(ramp.value_at(1.0), -15.0);
        assert_eq!(ramp.value_at(2.5), -45.0);
        // 15 - 6*30 = -165 clamps to -150
        assert_eq!(ramp.value_at(6.0), -150.0);
        assert_eq!(ramp.value_at(100.0), -150.0);
    }

    #[test]
    fn degenerate_temperature_schedule_goes_final() {
        let mut ramp = vaporizer();
        ramp.step_c = 0.0;
        assert_eq!(ramp.value_at(0.0), -150.0);
        let mut ramp = vaporizer();
        ramp.hold_hours = -1.0;
        assert_eq!(ramp.value_at(3.0), -150.0);
    }

    #[test]
    fn flow_two_stages() {
        let ramp = flow();
        assert_eq!(ramp.value_at(0.0), 1000.0);
        assert_eq!(ramp.value_at(2.0), 2000.0);
        assert_eq!(ramp.value_at(4.0), 3000.0);
        assert_eq!(ramp.value_at(6.0), 4000.0);
        assert_eq!(ramp.value_at(8.0), 5000.0);
        assert_eq!(ramp.value_at(9.0), 5000.0);
    }

    #[test]
    fn flow_without_ramp_time_holds_max() {
        let mut ramp = flow();
        ramp.total_hours = 0.0;
        assert_eq!(ramp.value_at(0.0), 5000.0);
    }

    #[test]
    fn zero_length_first_stage_is_complete() {
        let mut ramp = flow();
        ramp.intermediate_hours = 0.0;
        assert_eq!(ramp.value_at(0.0), 3000.0);
        assert_eq!(ramp.value_at(4.0), 4000.0);
    }

    #[test]
    fn intermediate_outside_band_is_clamped() {
        let mut ramp = flow();
        ramp.intermediate = 8000.0;
        assert_eq!(ramp.value_at(4.0), 5000.0);
        ramp.intermediate = 0.0;
        assert_eq!(ramp.value_at(4.0), 1000.0);
    }

    #[test]
    fn fill_ramp_reaches_max() {
        let ramp = FillRamp::new(5.0, 22.0, 1.0).unwrap();
        assert_eq!(ramp.value_at(0.0), 5.0);
        assert_eq!(ramp.value_at(0.5), 13.5);
        assert_eq!(ramp.value_at(1.0), 22.0);
        assert_eq!(ramp.value_at(3.0), 22.0);
    }

    #[test]
    fn fill_ramp_without_time_starts_at_max() {
        let ramp = FillRamp::new(5.0, 22.0, 0.0).unwrap();
        assert_eq!(ramp.value_at(0.0), 22.0);
    }

    #[test]
    fn fill_ramp_rejects_inverted_band() {
        let err = FillRamp::new(30.0, 22.0, 1.0).unwrap_err();
        assert!(matches!(err, ControlError::InvalidArg { .. }));
        assert!(err.to_string().contains("Invalid argument"));
    }

    #[test]
    fn ramps_round_trip_through_json() {
        let ramp = flow();
        let json = serde_json::to_string(&ramp).unwrap();
        let back: FlowRamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ramp, back);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn flow_stays_in_band(
            initial in 0.0_f64..5000.0,
            span in 0.0_f64..5000.0,
            intermediate in -1000.0_f64..12_000.0,
            mid in 0.0_f64..10.0,
            extra in 0.0_f64..10.0,
            h in 0.0_f64..50.0,
        ) {
            let ramp = FlowRamp {
                initial,
                intermediate,
                max: initial + span,
                intermediate_hours: mid,
                total_hours: mid + extra,
            };
            let q = ramp.value_at(h);
            prop_assert!(q >= initial && q <= initial + span);
        }

        #[test]
        fn inlet_temperature_never_below_final(
            initial in -100.0_f64..40.0,
            fin in -196.0_f64..-100.0,
            step in -10.0_f64..60.0,
            hold in -1.0_f64..5.0,
            h in 0.0_f64..100.0,
        ) {
            let ramp = InletTemperatureRamp { initial_c: initial, final_c: fin, step_c: step, hold_hours: hold };
            let t = ramp.value_at(h);
            prop_assert!(t >= fin);
            prop_assert!(t <= initial.max(fin));
        }

        #[test]
        fn inlet_temperature_non_increasing(h in 0.0_f64..50.0, dh in 0.0_f64..10.0) {
            let ramp = InletTemperatureRamp { initial_c: 15.0, final_c: -150.0, step_c: 30.0, hold_hours: 1.0 };
            prop_assert!(ramp.value_at(h + dh) <= ramp.value_at(h));
        }

        #[test]
        fn fill_ramp_in_band(initial in 0.0_f64..50.0, span in 0.0_f64..50.0, ramp_h in 0.0_f64..5.0, h in 0.0_f64..10.0) {
            let ramp = FillRamp::new(initial, initial + span, ramp_h).unwrap();
            let q = ramp.value_at(h);
            prop_assert!(q >= initial - 1e-9 && q <= initial + span + 1e-9);
        }
    }
}
