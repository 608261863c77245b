//! Run execution and caching service.

use std::path::Path;
use std::time::Instant;

use cf_project::Project;
use cf_results::{RunKind, RunManifest, RunOutput, RunStore};
use cf_sim::{CooldownOptions, CooldownProgress, CooldownResult, run_cooldown_with, run_lng_introduction};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::progress::{RunProgressEvent, RunStage};
use crate::project_service;

/// Version stamped into run ids and manifests; a new engine release
/// invalidates older cached runs.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub engine_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            engine_version: ENGINE_VERSION.to_string(),
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub project_path: &'a Path,
    pub options: RunOptions,
}

/// Wall-clock timing for a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub load_cache_time_s: f64,
    pub cooldown_time_s: f64,
    pub lng_time_s: f64,
    pub save_time_s: f64,
    pub total_time_s: f64,
    /// Engine iterations executed (0 when everything came from cache)
    pub iterations: usize,
}

/// Response from a run execution.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub output: RunOutput,
    pub loaded_from_cache: bool,
    pub timing: RunTimingSummary,
}

type ProgressCallback<'a> = Option<&'a mut dyn FnMut(RunProgressEvent)>;

fn emit_progress(
    progress_cb: &mut ProgressCallback<'_>,
    kind: RunKind,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
    cooldown: Option<CooldownProgress>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent {
            cooldown,
            ..RunProgressEvent::stage(
                kind,
                stage,
                started.elapsed().as_secs_f64(),
                message,
            )
        });
    }
}

/// Execute or load the nitrogen cooldown for a project.
pub fn ensure_cooldown_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_cooldown_run_with_progress(request, None)
}

/// Execute or load the nitrogen cooldown and stream progress events.
pub fn ensure_cooldown_run_with_progress(
    request: &RunRequest,
    mut progress_cb: ProgressCallback<'_>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    emit_progress(
        &mut progress_cb,
        RunKind::Cooldown,
        RunStage::LoadingProject,
        started,
        Some("Loading project".to_string()),
        None,
    );
    let project = project_service::load_project(request.project_path)?;
    let store = RunStore::for_project(request.project_path)?;

    let (manifest, result, loaded_from_cache) = resolve_cooldown(
        &project,
        &store,
        &request.options,
        &mut progress_cb,
        started,
        &mut timing,
    )?;
    timing.total_time_s = started.elapsed().as_secs_f64();

    emit_progress(
        &mut progress_cb,
        RunKind::Cooldown,
        RunStage::Completed,
        started,
        Some(if loaded_from_cache {
            "Loaded cached run".to_string()
        } else {
            "Run completed".to_string()
        }),
        None,
    );

    Ok(RunResponse {
        run_id: manifest.run_id.clone(),
        manifest,
        output: RunOutput::Cooldown(Box::new(result)),
        loaded_from_cache,
        timing,
    })
}

/// Execute or load the LNG introduction for a project.
///
/// The cooldown that precedes it is taken from the cache when possible.
pub fn ensure_lng_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_lng_run_with_progress(request, None)
}

/// Execute or load the LNG introduction and stream progress events.
pub fn ensure_lng_run_with_progress(
    request: &RunRequest,
    mut progress_cb: ProgressCallback<'_>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    emit_progress(
        &mut progress_cb,
        RunKind::Lng,
        RunStage::LoadingProject,
        started,
        Some("Loading project".to_string()),
        None,
    );
    let project = project_service::load_project(request.project_path)?;
    let lng_inputs = project.lng.clone().ok_or_else(|| {
        AppError::InvalidInput(format!(
            "project '{}' has no LNG introduction procedure",
            project.name
        ))
    })?;
    let store = RunStore::for_project(request.project_path)?;

    emit_progress(
        &mut progress_cb,
        RunKind::Lng,
        RunStage::CheckingCache,
        started,
        Some("Checking run cache".to_string()),
        None,
    );
    let run_id = cf_results::compute_run_id(
        &project.cooldown,
        Some(&lng_inputs),
        RunKind::Lng,
        &request.options.engine_version,
    );

    if request.options.use_cache && store.has_run(&run_id) {
        emit_progress(
            &mut progress_cb,
            RunKind::Lng,
            RunStage::LoadingCachedResult,
            started,
            Some("Loading cached run".to_string()),
            None,
        );
        let load_started = Instant::now();
        let manifest = store.load_manifest(&run_id)?;
        let output = store.load_output(&run_id)?;
        timing.load_cache_time_s = load_started.elapsed().as_secs_f64();
        timing.total_time_s = started.elapsed().as_secs_f64();

        emit_progress(
            &mut progress_cb,
            RunKind::Lng,
            RunStage::Completed,
            started,
            Some("Loaded cached run".to_string()),
            None,
        );
        return Ok(RunResponse {
            run_id,
            manifest,
            output,
            loaded_from_cache: true,
            timing,
        });
    }

    let (_, cooldown, _) = resolve_cooldown(
        &project,
        &store,
        &request.options,
        &mut progress_cb,
        started,
        &mut timing,
    )?;

    emit_progress(
        &mut progress_cb,
        RunKind::Lng,
        RunStage::RunningLng,
        started,
        Some("Filling line with LNG".to_string()),
        None,
    );
    let lng_started = Instant::now();
    let result = run_lng_introduction(&lng_inputs, &cooldown)?;
    timing.lng_time_s = lng_started.elapsed().as_secs_f64();
    timing.iterations += result.chart.len().saturating_sub(1);

    let manifest = new_manifest(&project, &run_id, RunKind::Lng, &request.options);
    let output = RunOutput::Lng(Box::new(result));
    save(&store, &manifest, &output, &mut progress_cb, started, &mut timing)?;
    timing.total_time_s = started.elapsed().as_secs_f64();

    info!(
        run_id = %run_id,
        seconds = timing.total_time_s,
        "LNG run stored"
    );
    emit_progress(
        &mut progress_cb,
        RunKind::Lng,
        RunStage::Completed,
        started,
        Some("Run completed".to_string()),
        None,
    );

    Ok(RunResponse {
        run_id,
        manifest,
        output,
        loaded_from_cache: false,
        timing,
    })
}

/// Cached or freshly computed cooldown for the project's inputs.
fn resolve_cooldown(
    project: &Project,
    store: &RunStore,
    options: &RunOptions,
    progress_cb: &mut ProgressCallback<'_>,
    started: Instant,
    timing: &mut RunTimingSummary,
) -> AppResult<(RunManifest, CooldownResult, bool)> {
    emit_progress(
        progress_cb,
        RunKind::Cooldown,
        RunStage::CheckingCache,
        started,
        Some("Checking run cache".to_string()),
        None,
    );
    let run_id = cf_results::compute_run_id(
        &project.cooldown,
        None,
        RunKind::Cooldown,
        &options.engine_version,
    );

    if options.use_cache && store.has_run(&run_id) {
        emit_progress(
            progress_cb,
            RunKind::Cooldown,
            RunStage::LoadingCachedResult,
            started,
            Some("Loading cached run".to_string()),
            None,
        );
        let load_started = Instant::now();
        let manifest = store.load_manifest(&run_id)?;
        let output = store.load_output(&run_id)?;
        timing.load_cache_time_s += load_started.elapsed().as_secs_f64();
        return match output {
            RunOutput::Cooldown(result) => Ok((manifest, *result, true)),
            other => Err(AppError::Results(format!(
                "run {} holds a {} result, expected cooldown",
                run_id,
                other.kind()
            ))),
        };
    }

    emit_progress(
        progress_cb,
        RunKind::Cooldown,
        RunStage::RunningCooldown,
        started,
        Some("Simulating nitrogen cooldown".to_string()),
        None,
    );
    let cooldown_started = Instant::now();
    let result = {
        let mut forward = |p: &CooldownProgress| {
            emit_progress(
                progress_cb,
                RunKind::Cooldown,
                RunStage::RunningCooldown,
                started,
                None,
                Some(*p),
            );
        };
        run_cooldown_with(&project.cooldown, &CooldownOptions::default(), Some(&mut forward))?
    };
    timing.cooldown_time_s = cooldown_started.elapsed().as_secs_f64();
    timing.iterations += result.summary.iterations;

    let manifest = new_manifest(project, &run_id, RunKind::Cooldown, options);
    let output = RunOutput::Cooldown(Box::new(result.clone()));
    save(store, &manifest, &output, progress_cb, started, timing)?;
    info!(
        run_id = %run_id,
        seconds = timing.cooldown_time_s,
        "cooldown run stored"
    );

    Ok((manifest, result, false))
}

fn new_manifest(project: &Project, run_id: &str, kind: RunKind, options: &RunOptions) -> RunManifest {
    RunManifest::new(run_id, project.name.as_str(), kind, options.engine_version.as_str())
}

fn save(
    store: &RunStore,
    manifest: &RunManifest,
    output: &RunOutput,
    progress_cb: &mut ProgressCallback<'_>,
    started: Instant,
    timing: &mut RunTimingSummary,
) -> AppResult<()> {
    emit_progress(
        progress_cb,
        manifest.kind,
        RunStage::SavingResults,
        started,
        Some("Saving run output".to_string()),
        None,
    );
    let save_started = Instant::now();
    store.save_run(manifest, output)?;
    timing.save_time_s += save_started.elapsed().as_secs_f64();
    Ok(())
}

/// Cached runs for a project, most recent first.
pub fn list_runs(project_path: &Path) -> AppResult<Vec<RunManifest>> {
    let store = RunStore::for_project(project_path)?;

    let mut runs = store.list_runs()?;
    runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Ok(runs)
}

/// Load a specific run.
pub fn load_run(project_path: &Path, run_id: &str) -> AppResult<(RunManifest, RunOutput)> {
    let store = RunStore::for_project(project_path)?;

    let manifest = store.load_manifest(run_id)?;
    let output = store.load_output(run_id)?;

    Ok((manifest, output))
}
