//! Bill of materials step.

use crate::orchestrator::errors::StepResult;
use crate::orchestrator::step::PipelineStep;
use crate::orchestrator::types::{Context, RunState};

use super::{require_file, require_recorded_file};

/// Export the assembly BOM to `<project>-bom.csv`.
pub struct BomStep;

impl BomStep {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BomStep {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStep for BomStep {
    fn name(&self) -> &str {
        "Generate BOM"
    }

    fn validate_input(&self, ctx: &Context, _state: &RunState) -> StepResult<()> {
        require_file(ctx.schema())
    }

    fn execute(&self, ctx: &Context, state: &mut RunState) -> StepResult<()> {
        let output = ctx.bom_path();
        ctx.run_command(&ctx.kicad.export_bom(&ctx.settings.bom, &output, ctx.schema()))?;
        state.bom = Some(output);
        Ok(())
    }

    fn validate_output(&self, _ctx: &Context, state: &RunState) -> StepResult<()> {
        require_recorded_file(state.bom.as_deref(), "BOM")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::steps::testing::{Fixture, ScriptedRunner};

    #[test]
    fn exports_grouped_bom() {
        let fixture = Fixture::new();
        let runner = ScriptedRunner::new();
        let ctx = fixture.context(&runner);
        let mut state = RunState::new();

        BomStep::new().execute(&ctx, &mut state).unwrap();
        BomStep::new().validate_output(&ctx, &state).unwrap();

        let call = &runner.calls()[0];
        assert_eq!(&call[..4], ["kicad-cli", "sch", "export", "bom"]);
        assert!(call.contains(&"Comment,Designator,Footprint,LCSC Part Number".to_string()));
        assert!(call.last().unwrap().ends_with("blinky.kicad_sch"));
        assert!(state.bom.unwrap().ends_with("blinky-bom.csv"));
    }

    #[test]
    fn command_failure_propagates() {
        let fixture = Fixture::new();
        let runner = ScriptedRunner::failing_on("--group-by");
        let ctx = fixture.context(&runner);
        let mut state = RunState::new();

        let err = BomStep::new().execute(&ctx, &mut state).unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(state.bom.is_none());
    }
}
