//! Result data types.

use cf_sim::{CooldownResult, LngResult};
use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub project_name: String,
    pub timestamp: String,
    pub kind: RunKind,
    pub engine_version: String,
}

impl RunManifest {
    /// Manifest stamped with the current UTC time.
    pub fn new(
        run_id: impl Into<RunId>,
        project_name: impl Into<String>,
        kind: RunKind,
        engine_version: impl Into<String>,
    ) -> Self {
        Self {
            run_id: run_id.into(),
            project_name: project_name.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            kind,
            engine_version: engine_version.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RunKind {
    Cooldown,
    Lng,
}

impl RunKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunKind::Cooldown => "cooldown",
            RunKind::Lng => "lng",
        }
    }
}

impl std::fmt::Display for RunKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine output as written to `result.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "result")]
pub enum RunOutput {
    Cooldown(Box<CooldownResult>),
    Lng(Box<LngResult>),
}

impl RunOutput {
    pub fn kind(&self) -> RunKind {
        match self {
            RunOutput::Cooldown(_) => RunKind::Cooldown,
            RunOutput::Lng(_) => RunKind::Lng,
        }
    }
}
