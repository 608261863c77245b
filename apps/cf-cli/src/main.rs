use cf_app::{
    AppResult, RunOptions, RunProgressEvent, RunRequest, RunResponse, RunStage, RunTimingSummary,
    export, project_service, query, run_service,
};
use cf_results::RunKind;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "cf-cli")]
#[command(about = "CryoFlow CLI - nitrogen cooldown and LNG introduction for cryogenic pipelines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a new project with the default line and procedures
    Init {
        /// Path of the project file to create (.yaml or .json)
        project_path: PathBuf,
        /// Project name
        #[arg(long, default_value = "New pipeline")]
        name: String,
    },
    /// Validate a project file
    Validate {
        /// Path to the project file
        project_path: PathBuf,
    },
    /// Run a simulation
    #[command(subcommand)]
    Run(RunCommands),
    /// List cached runs for a project
    Runs {
        /// Path to the project file
        project_path: PathBuf,
    },
    /// Show details of a cached run
    ShowRun {
        /// Path to the project file
        project_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export a chart series from a run as CSV
    ExportSeries {
        /// Path to the project file
        project_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Variable name (e.g. outlet_temp_c, n2_flow_nm3h, inlet_pressure_bar),
        /// or `profile` for the final temperature profile
        variable: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum RunCommands {
    /// Nitrogen cooldown of the line
    Cooldown {
        /// Path to the project file
        project_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// LNG introduction after the cooldown
    Lng {
        /// Path to the project file
        project_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { project_path, name } => cmd_init(&project_path, &name),
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Run(run_cmd) => match run_cmd {
            RunCommands::Cooldown {
                project_path,
                no_cache,
            } => cmd_run(&project_path, RunKind::Cooldown, !no_cache),
            RunCommands::Lng {
                project_path,
                no_cache,
            } => cmd_run(&project_path, RunKind::Lng, !no_cache),
        },
        Commands::Runs { project_path } => cmd_runs(&project_path),
        Commands::ShowRun {
            project_path,
            run_id,
        } => cmd_show_run(&project_path, &run_id),
        Commands::ExportSeries {
            project_path,
            run_id,
            variable,
            output,
        } => cmd_export_series(&project_path, &run_id, &variable, output.as_deref()),
    }
}

fn cmd_init(project_path: &Path, name: &str) -> AppResult<()> {
    project_service::init_project(project_path, name)?;
    println!("✓ Created project: {}", project_path.display());
    Ok(())
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    println!("✓ Project '{}' is valid", project.name);
    if project.lng.is_none() {
        println!("  (no LNG introduction procedure)");
    }
    Ok(())
}

fn cmd_run(project_path: &Path, kind: RunKind, use_cache: bool) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    println!("Running {} simulation for: {}", kind, project.name);

    let request = RunRequest {
        project_path,
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    };

    let initial_temp_c = project.cooldown.initial_temp_c;
    let mut last_emit = Instant::now();
    let mut last_stage = None;
    let mut on_event = |event: RunProgressEvent| {
        let emit_now = last_stage != Some(event.stage) || last_emit.elapsed().as_millis() >= 100;
        if emit_now {
            render_cli_progress(&event, initial_temp_c);
            last_stage = Some(event.stage);
            last_emit = Instant::now();
        }
    };
    let response = match kind {
        RunKind::Cooldown => {
            run_service::ensure_cooldown_run_with_progress(&request, Some(&mut on_event))?
        }
        RunKind::Lng => run_service::ensure_lng_run_with_progress(&request, Some(&mut on_event))?,
    };
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Simulation completed: {}", response.run_id);
    }

    print_timing_summary(&response.timing);
    print_summary(&response)?;
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent, initial_temp_c: f64) {
    match (&event.stage, &event.cooldown) {
        (RunStage::RunningCooldown, Some(p)) => {
            let fraction = event.cooldown_fraction(initial_temp_c).unwrap_or(0.0);
            let width = 28usize;
            let filled = ((fraction * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            print!(
                "\r[{}] {:>6.2}%  t={:.2}h  outlet={:.1}°C  inlet={:.1}°C  flow={:.0}Nm³/h  elapsed={:.1}s",
                bar,
                fraction * 100.0,
                p.time_h,
                p.outlet_temp_c,
                p.n2_inlet_temp_c,
                p.n2_flow_nm3h,
                event.elapsed_wall_s
            );
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{}", line);
        }
    }
    let _ = io::stdout().flush();
}

fn print_timing_summary(timing: &RunTimingSummary) {
    println!("\nTiming summary:");
    if timing.cooldown_time_s > 0.0 {
        println!("  Cooldown:   {:.3}s", timing.cooldown_time_s);
    }
    if timing.lng_time_s > 0.0 {
        println!("  LNG fill:   {:.3}s", timing.lng_time_s);
    }
    println!("  Save:       {:.3}s", timing.save_time_s);
    if timing.load_cache_time_s > 0.0 {
        println!("  Cache load: {:.3}s", timing.load_cache_time_s);
    }
    println!("  Total:      {:.3}s", timing.total_time_s);
    println!("  Iterations: {}", timing.iterations);
}

fn print_summary(response: &RunResponse) -> AppResult<()> {
    let summary = query::get_run_summary(&response.output)?;
    println!("\nRun Summary ({}):", summary.kind);
    println!(
        "  Time range: {:.2} - {:.2} h ({} points, {} profile snapshots)",
        summary.time_range_h.0, summary.time_range_h.1, summary.point_count, summary.snapshot_count
    );
    for (name, value) in &summary.values {
        println!("  {:<28} {:>14.3}", name, value);
    }
    for warning in &summary.warnings {
        println!("  ! {}", warning);
    }
    Ok(())
}

fn cmd_runs(project_path: &Path) -> AppResult<()> {
    let runs = run_service::list_runs(project_path)?;

    if runs.is_empty() {
        println!("No cached runs found for: {}", project_path.display());
    } else {
        println!("Cached runs:");
        for manifest in runs {
            println!(
                "  {} {:<8} {} ({})",
                manifest.run_id, manifest.kind, manifest.project_name, manifest.timestamp
            );
        }
    }
    Ok(())
}

fn cmd_show_run(project_path: &Path, run_id: &str) -> AppResult<()> {
    println!("Loading run: {}", run_id);

    let (manifest, output) = run_service::load_run(project_path, run_id)?;
    println!(
        "  Project: {}  Kind: {}  Engine: {}  Stored: {}",
        manifest.project_name, manifest.kind, manifest.engine_version, manifest.timestamp
    );

    let summary = query::get_run_summary(&output)?;
    println!("\nRun Summary:");
    for (name, value) in &summary.values {
        println!("  {:<28} {:>14.3}", name, value);
    }
    for warning in &summary.warnings {
        println!("  ! {}", warning);
    }

    println!("\nSeries:");
    for variable in query::series_variables(output.kind()) {
        println!("  {}", variable);
    }
    println!("  profile");

    Ok(())
}

fn cmd_export_series(
    project_path: &Path,
    run_id: &str,
    variable: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let (_manifest, run) = run_service::load_run(project_path, run_id)?;

    let (csv, rows) = if variable == "profile" {
        let profile = query::final_profile(&run);
        (export::profile_to_csv(profile), profile.len())
    } else {
        let series = query::extract_series(&run, variable)?;
        (export::series_to_csv(variable, &series), series.len())
    };

    if let Some(path) = output {
        export::write_csv(path, &csv)?;
        println!("✓ Exported {} data points to {}", rows, path.display());
    } else {
        print!("{}", csv);
    }

    Ok(())
}
