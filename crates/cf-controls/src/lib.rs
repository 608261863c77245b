//! Setpoint schedules for the cooldown and LNG fill procedures.
//!
//! The vaporizer operator does not close a loop on measured temperatures;
//! both the nitrogen inlet temperature and the flow follow fixed schedules in
//! elapsed time. This crate provides those schedules plus the snapshot clock
//! the simulation loops use to decide when to record a profile.
//!
//! # Design Principles
//!
//! - **Open loop**: every schedule is a pure function of elapsed hours
//! - **Clamped**: outputs never leave the configured band
//! - **Serializable**: schedules round-trip through project files

pub mod error;
pub mod ramp;
pub mod sampled;

pub use error::{ControlError, ControlResult};
pub use ramp::{FillRamp, FlowRamp, InletTemperatureRamp, Setpoint};
pub use sampled::SnapshotClock;
