use cf_results::RunKind;
use cf_sim::CooldownProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    LoadingProject,
    CheckingCache,
    LoadingCachedResult,
    RunningCooldown,
    RunningLng,
    SavingResults,
    Completed,
}

impl RunStage {
    pub fn label(&self) -> &'static str {
        match self {
            RunStage::LoadingProject => "loading project",
            RunStage::CheckingCache => "checking cache",
            RunStage::LoadingCachedResult => "loading cached result",
            RunStage::RunningCooldown => "nitrogen cooldown",
            RunStage::RunningLng => "LNG introduction",
            RunStage::SavingResults => "saving results",
            RunStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub kind: RunKind,
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
    /// Engine state while the cooldown loop runs
    pub cooldown: Option<CooldownProgress>,
}

impl RunProgressEvent {
    pub fn stage(
        kind: RunKind,
        stage: RunStage,
        elapsed_wall_s: f64,
        message: Option<String>,
    ) -> Self {
        Self {
            kind,
            stage,
            elapsed_wall_s,
            message,
            cooldown: None,
        }
    }

    /// Fraction of the way from the initial to the target outlet
    /// temperature, when known.
    pub fn cooldown_fraction(&self, initial_temp_c: f64) -> Option<f64> {
        let p = self.cooldown.as_ref()?;
        let span = initial_temp_c - p.target_temp_c;
        if span <= 0.0 {
            return None;
        }
        Some(((initial_temp_c - p.outlet_temp_c) / span).clamp(0.0, 1.0))
    }
}
