//! Error types for component operations.

use cf_core::error::CfError;
use thiserror::Error;

/// Errors that can occur while building pipe components.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<CfError> for ComponentError {
    fn from(e: CfError) -> Self {
        match e {
            CfError::NonFinite { what, .. } => ComponentError::NonPhysical { what },
        }
    }
}
