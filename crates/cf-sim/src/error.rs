//! Error types for the cooldown and LNG-introduction engines.

use thiserror::Error;

/// Errors that end a simulation run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Configuration the engine cannot run with; raised before iterating.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Heat ingress at the outlet equals or exceeds what the maximum flow can remove.
    #[error(
        "Stalled at outlet temperature {outlet_temp_c:.1}°C: heat ingress to the final pipe \
         segment ({ingress_w:.0} W) matches or exceeds its maximum possible heat removal \
         ({max_removal_w:.0} W). Increase max N₂ flow or improve insulation."
    )]
    Stalled {
        outlet_temp_c: f64,
        ingress_w: f64,
        max_removal_w: f64,
    },

    #[error("Simulation timed out after {iterations} iterations. Check input parameters.")]
    Timeout { iterations: usize },
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SimError::InvalidConfig {
            message: message.into(),
        }
    }
}

impl From<cf_components::ComponentError> for SimError {
    fn from(e: cf_components::ComponentError) -> Self {
        SimError::invalid(e.to_string())
    }
}

impl From<cf_controls::ControlError> for SimError {
    fn from(e: cf_controls::ControlError) -> Self {
        SimError::invalid(e.to_string())
    }
}
