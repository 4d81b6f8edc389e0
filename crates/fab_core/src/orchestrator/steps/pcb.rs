//! Board fabrication steps: gerbers, drill files and the zip archive.

use std::path::PathBuf;

use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RunState};
use crate::tools::{find_fab_files, zip_args, FabFileKind};

use super::require_file;

fn list_outputs(ctx: &Context, kind: FabFileKind) -> StepResult<Vec<PathBuf>> {
    find_fab_files(&ctx.output_dir, kind).map_err(|e| {
        StepError::io_error(format!("listing {}", ctx.output_dir.display()), e)
    })
}

fn require_outputs(files: Option<&Vec<PathBuf>>, what: &str) -> StepResult<()> {
    match files {
        Some(files) if !files.is_empty() => {
            files.iter().try_for_each(|f| require_file(f))
        }
        _ => Err(StepError::precondition_failed(format!(
            "no {} files were generated",
            what
        ))),
    }
}

/// Export gerber layers with kicad-cli.
pub struct GerbersStep;

impl GerbersStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GerbersStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for GerbersStep {
    fn name(&self) -> &str {
        "Generate gerbers"
    }

    fn validate_input(&self, ctx: &Context, _state: &RunState) -> StepResult<()> {
        require_file(ctx.pcb())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<()> {
        ctx.run_command(&ctx.kicad.export_gerbers(
            &ctx.settings.gerbers,
            &ctx.output_dir,
            ctx.pcb(),
        ))?;

        let files = list_outputs(ctx, FabFileKind::Gerber)?;
        tracing::debug!("{} gerber file(s) in output", files.len());
        state.gerbers = Some(files);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        require_outputs(state.gerbers.as_ref(), "gerber")
    }

    fn description(&self) -> &str {
        "Export copper, mask, silkscreen and edge layers as gerbers"
    }
}

/// Export drill files with kicad-cli.
pub struct DrillStep;

impl DrillStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DrillStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for DrillStep {
    fn name(&self) -> &str {
        "Generate drill"
    }

    fn validate_input(&self, ctx: &Context, _state: &RunState) -> StepResult<()> {
        require_file(ctx.pcb())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<()> {
        ctx.run_command(&ctx.kicad.export_drill(
            &ctx.settings.drill,
            &ctx.output_dir,
            ctx.pcb(),
        ))?;

        state.drill = Some(list_outputs(ctx, FabFileKind::Drill)?);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        require_outputs(state.drill.as_ref(), "drill")
    }
}

/// Zip gerber and drill files into `<project>-gerbers.zip`.
///
/// The file list is taken from the output folder at the time the step
/// runs, gerbers first and then drill files, each group in name order.
pub struct ArchiveStep;

impl ArchiveStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ArchiveStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for ArchiveStep {
    fn name(&self) -> &str {
        "Archive PCB fabrication outputs"
    }

    fn validate_input(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        require_outputs(state.gerbers.as_ref(), "gerber")?;
        require_outputs(state.drill.as_ref(), "drill")
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<()> {
        let mut files = list_outputs(ctx, FabFileKind::Gerber)?;
        files.extend(list_outputs(ctx, FabFileKind::Drill)?);

        let archive = ctx.archive_path();
        ctx.run_command(&zip_args(&ctx.settings.tools.zip_path, &archive, &files))?;

        state.archive = Some(archive);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        super::require_recorded_file(state.archive.as_deref(), "Archive")
    }

    fn description(&self) -> &str {
        "Zip gerber and drill files for the board house"
    }
}
