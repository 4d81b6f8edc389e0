//! Scripted command runner and project fixtures for step tests.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use crate::config::Settings;
use crate::io::CommandRunner;
use crate::models::ProjectPaths;
use crate::orchestrator::errors::{StepError, StepResult};
use crate::orchestrator::types::Context;

pub(crate) const RAW_POSITIONS: &str = "Ref,Val,Package,PosX,PosY,Rot,Side\n\
R1,10k,0805,12.5,8.2,0,top\n\
C2,100nF,0603,5.0,5.0,180,top\n\
U1,STM32,LQFP-48,30,40,270,top\n";

pub(crate) const FIXUPS: &str = "\"Reference\",\"PosRotAdjust\"\n\"R1\",\"90\"\n\"U1\",\"\"\n";

/// Fake kicad-cli and zip.
///
/// Writes the files each real tool would write, records every invocation
/// and fails any command whose line contains `fail_on`. With
/// `write_before_failing` the failing command still leaves its output
/// behind, like a tool that crashes after a partial write.
#[derive(Clone, Default)]
pub(crate) struct ScriptedRunner {
    pub calls: Arc<Mutex<Vec<Vec<String>>>>,
    pub fail_on: Option<String>,
    pub write_before_failing: bool,
    pub positions: Option<String>,
    pub fixups: Option<String>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(pattern: &str) -> Self {
        Self {
            fail_on: Some(pattern.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_after_write(pattern: &str) -> Self {
        Self {
            write_before_failing: true,
            ..Self::failing_on(pattern)
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

fn output_arg(args: &[String]) -> PathBuf {
    let idx = args.iter().position(|a| a == "-o").unwrap();
    PathBuf::from(&args[idx + 1])
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, args: &[String]) -> StepResult<()> {
        self.calls.lock().unwrap().push(args.to_vec());
        let line = args.join(" ");

        let failing = self
            .fail_on
            .as_deref()
            .is_some_and(|pattern| line.contains(pattern));
        if failing && !self.write_before_failing {
            return Err(StepError::command_failed(line, "scripted failure", Some(1)));
        }

        let has = |word: &str| args.iter().any(|a| a == word);
        let out = output_arg(args);
        if args[0] == "zip" {
            fs::write(&out, "PK").unwrap();
        } else if has("gerbers") {
            fs::write(out.join("blinky-F_Cu.gtl"), "G04*").unwrap();
            fs::write(out.join("blinky-job.gbrjob"), "{}").unwrap();
        } else if has("drill") {
            fs::write(out.join("blinky.drl"), "M48").unwrap();
            fs::write(out.join("blinky-drl_map.gbr"), "G04*").unwrap();
        } else if has("pos") {
            let data = self.positions.as_deref().unwrap_or(RAW_POSITIONS);
            fs::write(&out, data).unwrap();
        } else if has("--group-by") {
            fs::write(&out, "Comment,Designator\n").unwrap();
        } else if has("bom") {
            let data = self.fixups.as_deref().unwrap_or(FIXUPS);
            fs::write(&out, data).unwrap();
        }

        if failing {
            return Err(StepError::command_failed(line, "scripted failure", Some(1)));
        }
        Ok(())
    }
}

/// A project folder `blinky/` with schematic and board, plus an empty
/// output folder `fab/`.
pub(crate) struct Fixture {
    _dir: TempDir,
    pub project: ProjectPaths,
    pub output_dir: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let project_dir = dir.path().join("blinky");
        fs::create_dir(&project_dir).unwrap();
        fs::write(project_dir.join("blinky.kicad_sch"), "(kicad_sch)").unwrap();
        fs::write(project_dir.join("blinky.kicad_pcb"), "(kicad_pcb)").unwrap();
        let output_dir = dir.path().join("fab");
        fs::create_dir(&output_dir).unwrap();

        let project = ProjectPaths::resolve(&project_dir, None, None).unwrap();
        Self {
            _dir: dir,
            project,
            output_dir,
        }
    }

    pub fn context(&self, runner: &ScriptedRunner) -> Context {
        Context::new(
            self.project.clone(),
            &self.output_dir,
            Settings::default(),
            "kicad-cli",
        )
        .with_runner(Box::new(runner.clone()))
    }

    pub fn output_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.output_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }
}
