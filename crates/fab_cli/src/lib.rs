//! CLI logic for kicad-fab.
//!
//! Argument handling, configuration lookup and the run summary live here
//! so they can be tested without spawning the binary. The pipeline itself
//! is in `fab_core`.

mod args;

pub use args::Args;

use std::path::{Path, PathBuf};

use fab_core::config::{ConfigError, ConfigManager, Settings};
use fab_core::models::ProjectPaths;
use fab_core::orchestrator::{
    create_standard_pipeline, prepare_output_dir, Context, PipelineError, RunState,
};
use fab_core::tools::resolve_kicad_path;

fn config_error(e: ConfigError) -> PipelineError {
    PipelineError::setup_failed(format!("Failed to load configuration: {}", e))
}

/// Resolve the configuration for this invocation.
///
/// Called before logging is set up, since the log level and log file can
/// come from the config.
pub fn load_config(args: &Args) -> Result<ConfigManager, PipelineError> {
    let project_dir = args.project.as_deref().unwrap_or(Path::new("."));
    ConfigManager::resolve(args.config.as_deref(), project_dir).map_err(config_error)
}

/// Write the effective configuration to `path`.
pub fn write_config(config: &ConfigManager, path: &Path) -> Result<(), PipelineError> {
    config.save_to(path).map_err(|e| {
        PipelineError::setup_failed(format!("Failed to write {}: {}", path.display(), e))
    })?;
    println!("Wrote configuration to {}", path.display());
    Ok(())
}

/// Everything a run needs, resolved and checked, with a fresh output
/// folder in place.
#[derive(Debug)]
pub struct RunPlan {
    project: ProjectPaths,
    output_dir: PathBuf,
    settings: Settings,
    kicad_path: String,
}

impl RunPlan {
    /// Output folder of the run.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// kicad-cli executable the run will use.
    pub fn kicad_path(&self) -> &str {
        &self.kicad_path
    }

    /// Log file inside the output folder, if one is configured.
    ///
    /// The folder exists only after [`prepare`], so the file layer must be
    /// attached from the plan.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.settings
            .logging
            .log_file
            .as_deref()
            .map(|name| self.output_dir.join(name))
    }
}

/// Check the inputs and prepare the output folder.
///
/// # Errors
///
/// Returns `PipelineError` for:
/// - a missing project folder
/// - an existing output folder without `--force`
pub fn prepare(args: &Args, config: ConfigManager) -> Result<RunPlan, PipelineError> {
    let project_dir = args
        .project
        .as_deref()
        .ok_or_else(|| PipelineError::setup_failed("No project folder given"))?;
    if !project_dir.exists() {
        return Err(PipelineError::setup_failed(format!(
            "Project folder \"{}\" does not exist.",
            project_dir.display()
        )));
    }

    let settings = config.into_settings();
    let kicad_path = resolve_kicad_path(
        args.kicad_path.as_deref(),
        settings.tools.kicad_path.as_deref(),
        &settings.tools.kicad_probe_paths,
    );

    let project = ProjectPaths::resolve(project_dir, args.schema.as_deref(), args.pcb.as_deref())
        .ok_or_else(|| {
            PipelineError::setup_failed(format!(
                "Cannot derive a project name from \"{}\"",
                project_dir.display()
            ))
        })?;

    prepare_output_dir(&args.output, args.force)?;

    Ok(RunPlan {
        project,
        output_dir: args.output.clone(),
        settings,
        kicad_path,
    })
}

/// Run the fabrication pipeline for a prepared plan.
///
/// # Errors
///
/// Returns the first failing step's error.
pub fn execute(plan: RunPlan) -> Result<RunState, PipelineError> {
    println!(
        "Using {} to generate fabrication outputs for PCB {} and schema {}",
        plan.kicad_path,
        plan.project.pcb.display(),
        plan.project.schema.display()
    );

    let ctx = Context::new(plan.project, plan.output_dir, plan.settings, plan.kicad_path)
        .with_progress_callback(Box::new(|name, n, total| {
            println!("[{}/{}] {}", n, total, name);
        }));
    let mut state = RunState::new();

    let result = create_standard_pipeline().run(&ctx, &mut state)?;
    tracing::debug!("Completed steps: {:?}", result.steps_completed);

    println!("Done.");
    for file in state.deliverables() {
        tracing::info!("Wrote {}", file.display());
    }

    Ok(state)
}
