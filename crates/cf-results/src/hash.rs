//! Content-based hashing for run IDs.

use crate::types::RunKind;
use cf_sim::{CooldownInputs, LngInputs};
use sha2::{Digest, Sha256};

/// Run id for a set of engine inputs.
///
/// An LNG run depends on the cooldown that precedes it, so both input sets
/// are hashed. Project names do not take part: renaming a project keeps its
/// cache.
pub fn compute_run_id(
    cooldown: &CooldownInputs,
    lng: Option<&LngInputs>,
    kind: RunKind,
    engine_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    let cooldown_json = serde_json::to_string(cooldown).unwrap_or_default();
    hasher.update(cooldown_json.as_bytes());

    if let Some(lng) = lng {
        let lng_json = serde_json::to_string(lng).unwrap_or_default();
        hasher.update(lng_json.as_bytes());
    }

    hasher.update(kind.as_str().as_bytes());
    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
