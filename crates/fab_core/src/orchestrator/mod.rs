//! Pipeline orchestrator for fabrication runs.
//!
//! A run is a fixed sequence of steps, each wrapping one or more external
//! tool invocations. Steps share a read-only [`Context`] and record their
//! outputs in a [`RunState`].
//!
//! # Architecture
//!
//! ```text
//! Pipeline
//!     ├── Step: Generate gerbers
//!     ├── Step: Generate drill
//!     ├── Step: Archive PCB fabrication outputs
//!     ├── Step: Generate BOM
//!     ├── Step: Load pick-and-place fixup mappings
//!     └── Step: Generate and fixup pick-and-place
//! ```
//!
//! # Example
//!
//! ```ignore
//! use fab_core::orchestrator::{create_standard_pipeline, prepare_output_dir, Context, RunState};
//!
//! prepare_output_dir(&output_dir, force)?;
//! let ctx = Context::new(project, output_dir, settings, kicad_path);
//! let mut state = RunState::new();
//!
//! let result = create_standard_pipeline().run(&ctx, &mut state)?;
//! println!("Completed: {:?}", result.steps_completed);
//! ```

mod errors;
mod pipeline;
mod step;
pub mod steps;
mod types;

use std::fs;
use std::path::Path;

pub use errors::{
    PipelineError, PipelineResult, StepError, StepResult, EXIT_COMMAND_FAILED, EXIT_INTERNAL,
    EXIT_PRECONDITION,
};
pub use pipeline::{Pipeline, PipelineRunResult};
pub use step::PipelineStep;
pub use steps::{ArchiveStep, BomStep, DrillStep, GerbersStep, LoadFixupsStep, PositionsStep};
pub use types::{Context, PositionsOutput, ProgressCallback, RunState};

/// Create the standard pipeline with all steps in order.
///
/// 1. Generate gerbers
/// 2. Generate drill
/// 3. Archive gerbers and drill files
/// 4. Generate BOM
/// 5. Load rotation fixups
/// 6. Generate the reconciled position file
pub fn create_standard_pipeline() -> Pipeline {
    Pipeline::new()
        .with_step(GerbersStep::new())
        .with_step(DrillStep::new())
        .with_step(ArchiveStep::new())
        .with_step(BomStep::new())
        .with_step(LoadFixupsStep::new())
        .with_step(PositionsStep::new())
}

/// Make sure `path` is a fresh, empty output directory.
///
/// An existing directory is an error unless `force` is set, in which case
/// it is removed with everything in it. Parents are created as needed.
pub fn prepare_output_dir(path: &Path, force: bool) -> PipelineResult<()> {
    if path.exists() {
        if !force {
            return Err(PipelineError::output_exists(path));
        }
        tracing::info!("Removing existing output {}", path.display());
        let removed = if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        removed.map_err(|e| {
            PipelineError::setup_failed(format!("Cannot remove {}: {}", path.display(), e))
        })?;
    }

    fs::create_dir_all(path).map_err(|e| {
        PipelineError::setup_failed(format!("Cannot create {}: {}", path.display(), e))
    })
}
