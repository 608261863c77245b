//! Cold-gas front travelling down the pipe.
//!
//! Cold nitrogen only reaches a segment once the warm gas ahead of it has
//! been pushed out. The front position follows cumulative throughput as a
//! fraction of the pipe's gas inventory; behind it lies a short mixing zone
//! where removal ramps from full to none.

/// Front position for one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThermalFront {
    /// Unclamped leading segment index; may run past the outlet
    raw_leader: i64,
    segments: usize,
    width: usize,
}

impl ThermalFront {
    /// Locate the front after `throughput_nm3` of gas has entered a pipe
    /// holding `inventory_nm3`. A non-positive inventory counts as already
    /// displaced.
    pub fn locate(throughput_nm3: f64, inventory_nm3: f64, segments: usize, width: usize) -> Self {
        let raw_leader = if inventory_nm3 > 0.0 {
            // `as` saturates, so absurd throughputs stay representable
            (throughput_nm3 / inventory_nm3 * segments as f64).floor() as i64
        } else {
            segments as i64
        };
        Self {
            raw_leader,
            segments,
            width,
        }
    }

    fn clamp(&self, index: i64) -> usize {
        index.clamp(0, self.segments as i64) as usize
    }

    fn raw_trailer(&self) -> i64 {
        self.raw_leader.saturating_sub(self.width as i64)
    }

    /// Leading edge, clamped to `[0, segments]`.
    pub fn leader(&self) -> usize {
        self.clamp(self.raw_leader)
    }

    /// Trailing edge of the mixing zone, clamped to `[0, segments]`.
    pub fn trailer(&self) -> usize {
        self.clamp(self.raw_trailer())
    }

    /// Fraction of the available removal applied to `segment`.
    pub fn mixing_factor(&self, segment: usize) -> f64 {
        let i = segment as i64;
        if i < self.raw_trailer() {
            1.0
        } else if i <= self.raw_leader && self.width > 0 {
            (self.raw_leader - i) as f64 / self.width as f64
        } else {
            0.0
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn trailer_leader_bounds(throughput in 0.0_f64..1.0e6, inventory in 0.0_f64..100.0) {
            let front = ThermalFront::locate(throughput, inventory, 50, 5);
            prop_assert!(front.trailer() <= front.leader());
            prop_assert!(front.leader() <= 50);
        }

        #[test]
        fn factor_non_increasing_downstream(throughput in 0.0_f64..200.0) {
            let front = ThermalFront::locate(throughput, 35.0, 50, 5);
            for i in 1..50 {
                let up = front.mixing_factor(i - 1);
                let down = front.mixing_factor(i);
                prop_assert!(down <= up);
                prop_assert!((0.0..=1.0).contains(&down));
            }
        }

        #[test]
        fn factor_grows_with_throughput(a in 0.0_f64..100.0, extra in 0.0_f64..100.0, seg in 0usize..50) {
            let early = ThermalFront::locate(a, 35.0, 50, 5);
            let late = ThermalFront::locate(a + extra, 35.0, 50, 5);
            prop_assert!(late.mixing_factor(seg) >= early.mixing_factor(seg));
        }
    }
}
