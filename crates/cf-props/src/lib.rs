//! cf-props: temperature-dependent material and gas properties for cryoflow.
//!
//! Provides:
//! - Stainless steel (SS304) specific heat
//! - Nitrogen gas specific heat, conductivity, viscosity (Sutherland) and
//!   ideal-gas density, plus normal-volume conversions
//! - Darcy friction factor (laminar / Haaland)
//!
//! Everything here is a pure function of its arguments. Temperatures are in
//! °C and pressures in bar absolute, matching the engineering inputs the
//! simulation engine receives.
//!
//! # Example
//!
//! ```
//! use cf_props::{GasProperties, constants::ATMOSPHERIC_PRESSURE_BAR};
//!
//! let props = GasProperties::nitrogen(-100.0, ATMOSPHERIC_PRESSURE_BAR);
//! assert!(props.density > 1.9 && props.density < 2.0);
//! ```

pub mod constants;
pub mod friction;
pub mod nitrogen;
pub mod steel;

// Re-exports for ergonomics
pub use friction::{FlowRegime, LAMINAR_REYNOLDS_LIMIT, darcy_friction_factor};
pub use nitrogen::GasProperties;
pub use steel::cp_ss304;
