//! cf-components: per-segment physics of a cooling pipeline.
//!
//! Provides:
//! - Pipe geometry derived once from the user's dimensions
//! - Environmental heat ingress through insulation (convection + radiation)
//! - Internal forced-convection heat removal and the gas temperature march
//! - Darcy-Weisbach pressure-drop integration from outlet to inlet
//! - The cold-gas front and its mixing zone
//!
//! Everything here is a deterministic function of its inputs; the simulation
//! loop in `cf-sim` owns the segment temperatures and calls into these models
//! once per step.
//!
//! # Example
//!
//! ```
//! use cf_components::{PipeGeometry, PipeSpec, InternalConvection};
//!
//! let spec = PipeSpec {
//!     length_m: 622.0,
//!     outer_diameter_mm: 323.8,
//!     wall_thickness_mm: 21.44,
//!     roughness_mm: 0.045,
//!     insulation_thickness_mm: 100.0,
//!     insulation_k: 0.01,
//! };
//! let geo = PipeGeometry::new(&spec, 50, 40.0).unwrap();
//! let bore = InternalConvection::from(&geo);
//! let profile = bore.gas_temperature_profile(&vec![40.0; 50], 15.0, 1000.0);
//! assert_eq!(profile.gas_temps_c.len(), 51);
//! ```

pub mod common;
pub mod error;
pub mod front;
pub mod geometry;
pub mod ingress;
pub mod pipe;
pub mod removal;

// Re-exports
pub use error::{ComponentError, ComponentResult};
pub use front::ThermalFront;
pub use geometry::{PipeGeometry, PipeSpec};
pub use ingress::{Exposure, HeatIngress};
pub use pipe::FrictionLine;
pub use removal::{GasProfile, HeatRemoval, InternalConvection};
