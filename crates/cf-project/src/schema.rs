//! Project schema definitions.

use crate::migrate::LATEST_VERSION;
use cf_sim::{CooldownInputs, LngInputs};
use serde::{Deserialize, Serialize};

/// A cooldown study: one pipeline, its cooldown procedure and, optionally,
/// the LNG introduction that follows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub cooldown: CooldownInputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<LngInputs>,
}

impl Project {
    /// New project at the latest schema version with the default line and
    /// LNG procedure.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            cooldown: CooldownInputs::default(),
            lng: Some(LngInputs::default()),
        }
    }
}
