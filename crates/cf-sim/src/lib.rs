//! Cooldown and LNG-introduction engines for cryogenic pipelines.
//!
//! Provides:
//! - Segment-lumped transient nitrogen cooldown with scheduled inlet
//!   temperature and flow, a cold-gas front, and stall detection
//! - Nitrogen budget (purge, cooldown, holds, preservation, margin)
//! - LNG fill of the cooled line with vent rate and inlet pressure
//!
//! Runs are single-threaded and deterministic: identical inputs give equal
//! results.

pub mod cooldown;
pub mod error;
pub mod inputs;
pub mod inventory;
pub mod lng;
pub mod record;

// Re-exports for public API
pub use cooldown::{
    CooldownOptions, CooldownProgress, CooldownResult, CooldownSummary, HeatTotals, PipeSummary,
    RateLimitCheck, run_cooldown, run_cooldown_with,
};
pub use error::{SimError, SimResult};
pub use inputs::{CooldownInputs, LngInputs};
pub use inventory::NitrogenInventory;
pub use lng::{LngResult, run_lng_introduction};
pub use record::{
    ChartPoint, LngChartPoint, PressurePoint, PressureSnapshot, ProfilePoint, ProfileSnapshot,
};
