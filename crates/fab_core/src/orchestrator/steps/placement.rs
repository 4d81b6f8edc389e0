//! Pick-and-place steps.
//!
//! Loading the rotation fixups and generating the position file are two
//! steps; the table travels between them in [`RunState::fixups`].

use crate::fixups::load_fixups;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RunState};
use crate::positions::generate_positions;

use super::require_file;

/// Load per-component rotation overrides from the schematic.
pub struct LoadFixupsStep;

impl LoadFixupsStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LoadFixupsStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for LoadFixupsStep {
    fn name(&self) -> &str {
        "Load pick-and-place fixup mappings"
    }

    fn validate_input(&self, ctx: &Context, _state: &RunState) -> StepResult<()> {
        require_file(ctx.schema())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<()> {
        state.fixups = Some(load_fixups(ctx)?);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        if state.has_fixups() {
            Ok(())
        } else {
            Err(StepError::precondition_failed("fixup table was not loaded"))
        }
    }
}

/// Export placements and write the reconciled `<project>.pos`.
pub struct PositionsStep;

impl PositionsStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PositionsStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for PositionsStep {
    fn name(&self) -> &str {
        "Generate and fixup pick-and-place"
    }

    fn validate_input(&self, ctx: &Context, state: &RunState) -> StepResult<()> {
        if !state.has_fixups() {
            return Err(StepError::precondition_failed(
                "fixup table must be loaded before generating positions",
            ));
        }
        require_file(ctx.pcb())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<()> {
        let fixups = state.fixups.as_ref().ok_or_else(|| {
            StepError::precondition_failed("fixup table must be loaded before generating positions")
        })?;
        let output = generate_positions(ctx, fixups)?;
        state.positions = Some(output);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        super::require_recorded_file(
            state.positions.as_ref().map(|p| p.path.as_path()),
            "Position file",
        )
    }

    fn description(&self) -> &str {
        "Export component placements and apply rotation overrides"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixups::FIXUPS_SCRATCH_FILE;
    use crate::orchestrator::steps::testing::{Fixture, ScriptedRunner};
    use crate::positions::RAW_POSITIONS_SCRATCH_FILE;

    #[test]
    fn load_fixups_fills_state_and_removes_scratch() {
        let fixture = Fixture::new();
        let runner = ScriptedRunner::new();
        let ctx = fixture.context(&runner);
        let mut state = RunState::new();

        LoadFixupsStep::new().execute(&ctx, &mut state).unwrap();

        let fixups = state.fixups.as_ref().unwrap();
        assert_eq!(fixups.rotation_for("R1"), Some("90"));
        assert_eq!(fixups.rotation_for("U1"), None);
        assert!(!fixture.output_dir.join(FIXUPS_SCRATCH_FILE).exists());

        let call = &runner.calls()[0];
        assert!(call.contains(&"Reference,PosRotAdjust".to_string()));
    }

    #[test]
    fn malformed_fixups_remove_scratch() {
        let fixture = Fixture::new();
        let mut runner = ScriptedRunner::new();
        runner.fixups = Some("Ref,PosRotAdjust\nR1,90\n".to_string());
        let ctx = fixture.context(&runner);
        let mut state = RunState::new();

        let err = LoadFixupsStep::new().execute(&ctx, &mut state).unwrap_err();

        assert_eq!(err.exit_code(), 3);
        assert!(state.fixups.is_none());
        assert!(fixture.output_files().is_empty());
    }

    #[test]
    fn positions_requires_loaded_fixups() {
        let fixture = Fixture::new();
        let runner = ScriptedRunner::new();
        let ctx = fixture.context(&runner);

        let err = PositionsStep::new()
            .validate_input(&ctx, &RunState::new())
            .unwrap_err();

        assert!(matches!(err, StepError::PreconditionFailed(_)));
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn positions_applies_fixups() {
        let fixture = Fixture::new();
        let runner = ScriptedRunner::new();
        let ctx = fixture.context(&runner);
        let mut state = RunState::new();

        LoadFixupsStep::new().execute(&ctx, &mut state).unwrap();
        let step = PositionsStep::new();
        step.validate_input(&ctx, &state).unwrap();
        step.execute(&ctx, &mut state).unwrap();
        step.validate_output(&ctx, &state).unwrap();

        let output = state.positions.unwrap();
        assert_eq!(output.rows, 3);
        assert_eq!(output.rotations_overridden, 1);

        let text = std::fs::read_to_string(&output.path).unwrap();
        assert_eq!(
            text,
            "Designator,Val,Package,Mid X,Mid Y,Rotation,Layer\n\
             \"R1\",\"10k\",\"0805\",12.5,8.2,90,top\n\
             \"C2\",\"100nF\",\"0603\",5.0,5.0,180,top\n\
             \"U1\",\"STM32\",\"LQFP-48\",30,40,270,top\n"
        );
        assert_eq!(fixture.output_files(), ["blinky.pos"]);
    }

    #[test]
    fn short_placement_row_removes_scratch() {
        let fixture = Fixture::new();
        let mut runner = ScriptedRunner::new();
        runner.positions = Some("Ref,Val\nR1,10k\n".to_string());
        let ctx = fixture.context(&runner);
        let mut state = RunState::new();
        state.fixups = Some(Default::default());

        let err = PositionsStep::new().execute(&ctx, &mut state).unwrap_err();

        assert!(matches!(err, StepError::Parse { .. }));
        assert!(!fixture.output_dir.join(RAW_POSITIONS_SCRATCH_FILE).exists());
    }

    #[test]
    fn export_failure_removes_scratch() {
        let fixture = Fixture::new();
        let runner = ScriptedRunner::failing_on(" pos ");
        let ctx = fixture.context(&runner);
        let mut state = RunState::new();
        state.fixups = Some(Default::default());

        let err = PositionsStep::new().execute(&ctx, &mut state).unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(fixture.output_files().is_empty());
    }

    #[test]
    fn failed_placement_export_removes_written_scratch() {
        let fixture = Fixture::new();
        let runner = ScriptedRunner::failing_after_write(" pos ");
        let ctx = fixture.context(&runner);

        let err = generate_positions(&ctx, &Default::default()).unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(err.details().contains("scripted failure"));
        assert!(!fixture.output_dir.join(RAW_POSITIONS_SCRATCH_FILE).exists());
        assert!(fixture.output_files().is_empty());
    }

    #[test]
    fn failed_fixup_export_removes_written_scratch() {
        let fixture = Fixture::new();
        let runner = ScriptedRunner::failing_after_write("Reference,PosRotAdjust");
        let ctx = fixture.context(&runner);

        let err = load_fixups(&ctx).unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert_eq!(runner.call_count(), 1);
        assert!(!fixture.output_dir.join(FIXUPS_SCRATCH_FILE).exists());
        assert!(fixture.output_files().is_empty());
    }

    #[test]
    fn failed_fixup_export_leaves_state_unset() {
        let fixture = Fixture::new();
        let runner = ScriptedRunner::failing_on("Reference,PosRotAdjust");
        let ctx = fixture.context(&runner);
        let mut state = RunState::new();

        let err = LoadFixupsStep::new().execute(&ctx, &mut state).unwrap_err();

        assert!(matches!(err, StepError::CommandFailed { .. }));
        assert!(!state.has_fixups());
        assert!(fixture.output_files().is_empty());
    }
}
