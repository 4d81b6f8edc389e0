//! Core types for the orchestrator pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::io::{CommandRunner, ProcessRunner};
use crate::models::{FixupTable, ProjectPaths};
use crate::tools::KicadCli;

use super::errors::StepResult;

/// Progress callback type for reporting pipeline progress.
///
/// Arguments: (step_name, step_number starting at 1, total_steps)
pub type ProgressCallback = Box<dyn Fn(&str, usize, usize) + Send + Sync>;

/// Read-only context passed to pipeline steps.
///
/// Contains run configuration and shared resources that steps can read
/// but not modify. Data produced by steps goes in `RunState`.
pub struct Context {
    /// Project files (schematic, board, base name).
    pub project: ProjectPaths,
    /// Directory receiving every generated file.
    pub output_dir: PathBuf,
    /// Application settings.
    pub settings: Settings,
    /// kicad-cli command builder.
    pub kicad: KicadCli,
    /// Runs external commands.
    runner: Box<dyn CommandRunner>,
    /// Optional progress callback.
    progress_callback: Option<ProgressCallback>,
}

impl Context {
    /// Create a context that runs real processes.
    pub fn new(
        project: ProjectPaths,
        output_dir: impl Into<PathBuf>,
        settings: Settings,
        kicad_path: impl Into<String>,
    ) -> Self {
        Self {
            project,
            output_dir: output_dir.into(),
            settings,
            kicad: KicadCli::new(kicad_path),
            runner: Box::new(ProcessRunner::new()),
            progress_callback: None,
        }
    }

    /// Replace the command runner.
    pub fn with_runner(mut self, runner: Box<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Set the progress callback.
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Report progress to callback (if set).
    pub fn report_progress(&self, step_name: &str, step_number: usize, total_steps: usize) {
        if let Some(ref callback) = self.progress_callback {
            callback(step_name, step_number, total_steps);
        }
    }

    /// Run an external command through the configured runner.
    pub fn run_command(&self, args: &[String]) -> StepResult<()> {
        self.runner.run(args)
    }

    /// Board file.
    pub fn pcb(&self) -> &Path {
        &self.project.pcb
    }

    /// Schematic file.
    pub fn schema(&self) -> &Path {
        &self.project.schema
    }

    /// Project base name used for deliverable names.
    pub fn project_base(&self) -> &str {
        &self.project.project_base
    }

    /// `<output>/<project>-gerbers.zip`
    pub fn archive_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}-gerbers.zip", self.project_base()))
    }

    /// `<output>/<project>-bom.csv`
    pub fn bom_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}-bom.csv", self.project_base()))
    }

    /// `<output>/<project>.pos`
    pub fn positions_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.pos", self.project_base()))
    }
}

/// Mutable run state that accumulates results from pipeline steps.
///
/// This is a write-once manifest: each step records its output in its own
/// section, and later steps read what they depend on from here rather
/// than from shared context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunState {
    /// When the run started.
    pub started_at: Option<String>,
    /// Gerber files written (from Generate gerbers).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gerbers: Option<Vec<PathBuf>>,
    /// Drill files written (from Generate drill).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drill: Option<Vec<PathBuf>>,
    /// Fabrication archive (from Archive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<PathBuf>,
    /// Bill of materials (from Generate BOM).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bom: Option<PathBuf>,
    /// Rotation overrides (from Load fixups).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixups: Option<FixupTable>,
    /// Final pick-and-place output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<PositionsOutput>,
}

impl RunState {
    /// Create a new run state stamped with the current time.
    pub fn new() -> Self {
        Self {
            started_at: Some(chrono::Local::now().to_rfc3339()),
            ..Default::default()
        }
    }

    /// Check if the fixup table has been loaded.
    pub fn has_fixups(&self) -> bool {
        self.fixups.is_some()
    }

    /// Deliverables produced so far, in pipeline order.
    pub fn deliverables(&self) -> Vec<&Path> {
        let mut files: Vec<&Path> = Vec::new();
        if let Some(archive) = &self.archive {
            files.push(archive);
        }
        if let Some(bom) = &self.bom {
            files.push(bom);
        }
        if let Some(positions) = &self.positions {
            files.push(&positions.path);
        }
        files
    }
}

/// Output from the pick-and-place step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionsOutput {
    /// Path to the final position file.
    pub path: PathBuf,
    /// Component rows written.
    pub rows: usize,
    /// Rows whose rotation came from a fixup.
    pub rotations_overridden: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FixupRecord;

    fn context() -> Context {
        let project = ProjectPaths::resolve(Path::new("boards/blinky"), None, None).unwrap();
        Context::new(project, "fab", Settings::default(), "kicad-cli")
    }

    #[test]
    fn deliverable_paths_use_project_name() {
        let ctx = context();

        assert_eq!(ctx.archive_path(), Path::new("fab/blinky-gerbers.zip"));
        assert_eq!(ctx.bom_path(), Path::new("fab/blinky-bom.csv"));
        assert_eq!(ctx.positions_path(), Path::new("fab/blinky.pos"));
    }

    #[test]
    fn progress_callback_receives_step() {
        use std::sync::{Arc, Mutex};

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let ctx = context().with_progress_callback(Box::new(move |name, n, total| {
            sink.lock().unwrap().push(format!("{}/{} {}", n, total, name));
        }));

        ctx.report_progress("Generate BOM", 4, 6);

        assert_eq!(*seen.lock().unwrap(), vec!["4/6 Generate BOM".to_string()]);
    }

    #[test]
    fn run_state_tracks_fixups() {
        let mut state = RunState::new();
        assert!(!state.has_fixups());
        assert!(state.started_at.is_some());

        state.fixups = Some([FixupRecord::new("R1", Some("90"))].into_iter().collect());

        assert!(state.has_fixups());
    }

    #[test]
    fn run_state_serializes() {
        let mut state = RunState::new();
        state.bom = Some(PathBuf::from("fab/blinky-bom.csv"));

        let json = serde_json::to_string(&state).unwrap();

        assert!(json.contains("\"bom\":\"fab/blinky-bom.csv\""));
        assert!(!json.contains("positions"));
        assert_eq!(state.deliverables(), vec![Path::new("fab/blinky-bom.csv")]);
    }
}
