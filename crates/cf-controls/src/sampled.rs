//! Interval clock for periodic snapshots.
//!
//! The simulation loops record a full profile every fixed interval of
//! simulated time. The clock fires once the elapsed time reaches the next
//! scheduled instant, then moves the schedule forward by one interval, so a
//! time step that does not divide the interval never drifts the schedule.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapshotClock {
    /// Interval between snapshots [s]
    pub interval_s: f64,
    /// Elapsed time of the next scheduled snapshot [s]
    pub next_s: f64,
}

impl SnapshotClock {
    /// Clock whose first snapshot is due at `first_s`.
    pub fn new(interval_s: f64, first_s: f64) -> ControlResult<Self> {
        if !(interval_s.is_finite() && interval_s > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "snapshot interval must be positive",
            });
        }
        Ok(Self {
            interval_s,
            next_s: first_s,
        })
    }

    /// Returns `true` (and schedules the next snapshot) when `elapsed_s`
    /// has reached the scheduled instant.
    pub fn fire(&mut self, elapsed_s: f64) -> bool {
        if elapsed_s >= self.next_s {
            self.next_s += self.interval_s;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_with_minute_steps() {
        let mut clock = SnapshotClock::new(3600.0, 3600.0).unwrap();
        let fired: Vec<u32> = (1..=180)
            .filter(|i| clock.fire(f64::from(*i) * 60.0))
            .collect();
        assert_eq!(fired, vec![60, 120, 180]);
    }

    #[test]
    fn first_due_immediately() {
        let mut clock = SnapshotClock::new(1800.0, 0.0).unwrap();
        assert!(clock.fire(60.0));
        assert!(!clock.fire(120.0));
        assert!(clock.fire(1800.0));
    }

    #[test]
    fn uneven_step_does_not_drift() {
        let mut clock = SnapshotClock::new(3600.0, 3600.0).unwrap();
        let mut t = 0.0;
        let mut count = 0;
        while t < 36_000.0 {
            t += 70.0;
            if clock.fire(t) {
                count += 1;
            }
        }
        assert_eq!(count, 10);
        assert_eq!(clock.next_s, 39_600.0);
    }

    #[test]
    fn rejects_non_positive_interval() {
        assert!(SnapshotClock::new(0.0, 0.0).is_err());
        assert!(SnapshotClock::new(f64::NAN, 0.0).is_err());
    }
}
