//! Command runner for external process execution.
//!
//! Every external tool invocation in the pipeline goes through a
//! [`CommandRunner`]. The production implementation spawns the process,
//! captures stdout and stderr through one shared pipe (so the text keeps
//! its interleaving) and waits for it to exit. There is no retry and no
//! timeout.

use std::io::Read;
use std::process::{Command, Stdio};

use crate::logging::MessagePrefix;
use crate::orchestrator::{StepError, StepResult};

/// Runs an external command described by its argument vector.
///
/// `args[0]` is the program; the rest are passed as arguments.
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion.
    ///
    /// Succeeds on exit status zero. Any other status, or a failure to
    /// start the process, is a [`StepError::CommandFailed`] whose details
    /// hold the captured output.
    fn run(&self, args: &[String]) -> StepResult<()>;
}

/// [`CommandRunner`] backed by `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, args: &[String]) -> StepResult<()> {
        let (program, rest) = args
            .split_first()
            .ok_or_else(|| StepError::precondition_failed("Empty command"))?;
        let command_line = args.join(" ");

        tracing::info!("{}", MessagePrefix::Command.format(&command_line));

        let (output, status) = spawn_merged(program, rest).map_err(|e| {
            StepError::command_failed(&command_line, format!("Failed to start {}: {}", program, e), None)
        })?;

        let output = String::from_utf8_lossy(&output).to_string();
        for line in output.lines() {
            tracing::debug!("  {}", line);
        }

        if !status.success() {
            tracing::debug!("{} exited with {}", program, status);
            return Err(StepError::command_failed(command_line, output, status.code()));
        }

        Ok(())
    }
}

/// Spawn `program`, collect its merged stdout/stderr and wait for exit.
fn spawn_merged(
    program: &str,
    args: &[String],
) -> std::io::Result<(Vec<u8>, std::process::ExitStatus)> {
    let (mut reader, writer) = std::io::pipe()?;

    // The Command owns both write ends; it must be dropped before reading
    // or the read never sees EOF.
    let mut child = {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(writer.try_clone()?)
            .stderr(writer);
        cmd.spawn()?
    };

    let mut output = Vec::new();
    let read_result = reader.read_to_end(&mut output);
    let status = child.wait()?;
    read_result?;

    Ok((output, status))
}
