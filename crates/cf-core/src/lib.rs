//! cf-core: stable foundation for cryoflow.
//!
//! Contains:
//! - units (uom SI types + constructors for the engineering units the engine reads)
//! - numeric (Real, tolerances, temperature conversion, interpolation helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CfError, CfResult};
pub use numeric::*;
pub use units::*;
