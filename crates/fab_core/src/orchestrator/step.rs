//! Pipeline step trait definition.
//!
//! All pipeline steps implement this trait, providing a consistent
//! interface for validation and execution.

use super::errors::StepResult;
use super::types::{Context, RunState};

/// Trait for pipeline steps.
///
/// Each step in the pipeline implements this trait. The pipeline runner
/// calls these methods in order:
///
/// 1. `validate_input` - Check preconditions before execution
/// 2. `execute` - Perform the step's work
/// 3. `validate_output` - Verify the step produced its files
///
/// # Example
///
/// ```ignore
/// struct BomStep;
///
/// impl PipelineStep for BomStep {
///     fn name(&self) -> &str { "Generate BOM" }
///
///     fn validate_input(&self, ctx: &Context, _state: &RunState) -> StepResult<()> {
///         require_file(ctx.schema())
///     }
///
///     fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<()> {
///         let output = ctx.bom_path();
///         ctx.run_command(&ctx.kicad.export_bom(&ctx.settings.bom, &output, ctx.schema()))?;
///         state.bom = Some(output);
///         Ok(())
///     }
///
///     fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
///         require_recorded_file(state.bom.as_deref(), "BOM")
///     }
/// }
/// ```
pub trait PipelineStep: Send + Sync {
    /// Step title, reported to the progress observer before the step runs.
    fn name(&self) -> &str;

    /// Validate inputs before execution.
    ///
    /// Should check that everything the step consumes is available: input
    /// files on disk and outputs of earlier steps in `state`.
    fn validate_input(&self, ctx: &Context, state: &RunState) -> StepResult<()>;

    /// Execute the step's main work and record its output in `state`.
    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<()>;

    /// Validate outputs after execution.
    ///
    /// Only file presence is checked; the content is the tool's business.
    fn validate_output(&self, ctx: &Context, state: &RunState) -> StepResult<()>;

    /// Human-readable description of what this step does.
    fn description(&self) -> &str {
        self.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockStep {
        name: &'static str,
    }

    impl PipelineStep for MockStep {
        fn name(&self) -> &str {
            self.name
        }

        fn validate_input(&self, _ctx: &Context, _state: &RunState) -> StepResult<()> {
            Ok(())
        }

        fn execute(&self, _ctx: &Context, _state: &mut RunState) -> StepResult<()> {
            Ok(())
        }

        fn validate_output(&self, _ctx: &Context, _state: &RunState) -> StepResult<()> {
            Ok(())
        }
    }

    #[test]
    fn step_trait_object_works() {
        let step: Box<dyn PipelineStep> = Box::new(MockStep { name: "TestStep" });

        assert_eq!(step.name(), "TestStep");
        assert_eq!(step.description(), "TestStep");
    }
}
