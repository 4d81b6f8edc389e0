//! Pipeline runner that executes steps in sequence.

use crate::logging::MessagePrefix;

use super::errors::{PipelineError, PipelineResult};
use super::step::PipelineStep;
use super::types::{Context, RunState};

/// Pipeline that runs a fixed sequence of steps.
///
/// Steps run strictly in order, one at a time. The first failure stops
/// the run; later steps never execute.
pub struct Pipeline {
    /// Steps to execute in order.
    steps: Vec<Box<dyn PipelineStep>>,
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step to the pipeline.
    pub fn add_step<S: PipelineStep + 'static>(&mut self, step: S) -> &mut Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Add a step (builder pattern).
    pub fn with_step<S: PipelineStep + 'static>(mut self, step: S) -> Self {
        self.add_step(step);
        self
    }

    /// Run the pipeline with the given context and state.
    ///
    /// Executes each step in order:
    /// 1. Report the step title to the progress callback
    /// 2. Run `validate_input`
    /// 3. Run `execute`
    /// 4. Run `validate_output`
    ///
    /// A failure at any stage returns that step's error wrapped in
    /// [`PipelineError::StepFailed`].
    pub fn run(&self, ctx: &Context, state: &mut RunState) -> PipelineResult<PipelineRunResult> {
        let mut result = PipelineRunResult {
            steps_completed: Vec::new(),
        };

        let total_steps = self.steps.len();

        for (i, step) in self.steps.iter().enumerate() {
            let step_name = step.name();
            ctx.report_progress(step_name, i + 1, total_steps);
            tracing::info!("{}", MessagePrefix::Phase.format(step_name));

            tracing::debug!("Validating input for '{}'", step_name);
            if let Err(e) = step.validate_input(ctx, state) {
                tracing::error!("Input validation failed: {}", e);
                return Err(PipelineError::step_failed(step_name, e));
            }

            tracing::debug!("Executing '{}': {}", step_name, step.description());
            if let Err(e) = step.execute(ctx, state) {
                tracing::error!("{} failed: {}", step_name, e);
                return Err(PipelineError::step_failed(step_name, e));
            }

            tracing::debug!("Validating output for '{}'", step_name);
            if let Err(e) = step.validate_output(ctx, state) {
                tracing::error!("Output validation failed: {}", e);
                return Err(PipelineError::step_failed(step_name, e));
            }

            tracing::info!("{}", MessagePrefix::Success.format(step_name));
            result.steps_completed.push(step_name.to_string());
        }

        Ok(result)
    }

    /// Get the number of steps in the pipeline.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get step names in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRunResult {
    /// Steps that completed successfully, in order.
    pub steps_completed: Vec<String>,
}

impl PipelineRunResult {
    /// Total number of steps that ran.
    pub fn total_steps(&self) -> usize {
        self.steps_completed.len()
    }
}
