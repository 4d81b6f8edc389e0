//! Error types for the orchestrator pipeline.
//!
//! Errors carry context that chains through layers:
//! Run → Step → Operation → Detail
//!
//! Every error renders as a title/details pair and maps to a process exit
//! code, so front ends never need to match on variants.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit code for a run that could not start (output exists, bad setup).
pub const EXIT_PRECONDITION: i32 = 1;
/// Exit code for an external command failure.
pub const EXIT_COMMAND_FAILED: i32 = 2;
/// Exit code for local I/O or parse failures.
pub const EXIT_INTERNAL: i32 = 3;

/// Top-level pipeline error.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A step failed during validation or execution.
    #[error("Step '{step_name}' failed: {source}")]
    StepFailed {
        step_name: String,
        #[source]
        source: StepError,
    },

    /// The output directory exists and overwriting was not requested.
    #[error("\"{}\" already exists.", path.display())]
    OutputExists { path: PathBuf },

    /// Failed to set up the run (config, directories, project paths).
    #[error("Setup failed: {message}")]
    SetupFailed { message: String },
}

impl PipelineError {
    /// Create a step failed error.
    pub fn step_failed(step_name: impl Into<String>, source: StepError) -> Self {
        Self::StepFailed {
            step_name: step_name.into(),
            source,
        }
    }

    /// Create an output exists error.
    pub fn output_exists(path: impl Into<PathBuf>) -> Self {
        Self::OutputExists { path: path.into() }
    }

    /// Create a setup failed error.
    pub fn setup_failed(message: impl Into<String>) -> Self {
        Self::SetupFailed {
            message: message.into(),
        }
    }

    /// One-line headline for terminal output.
    pub fn title(&self) -> String {
        match self {
            Self::StepFailed { source, .. } => source.title(),
            Self::OutputExists { .. } => self.to_string(),
            Self::SetupFailed { message } => message.clone(),
        }
    }

    /// Longer explanation printed under the title.
    pub fn details(&self) -> String {
        match self {
            Self::StepFailed { step_name, source } => {
                let details = source.details();
                if details.is_empty() {
                    format!("Step: {}", step_name)
                } else {
                    format!("Step: {}\n{}", step_name, details)
                }
            }
            Self::OutputExists { .. } => {
                "Use --force to remove and re-create, or --output to specify a different path"
                    .to_string()
            }
            Self::SetupFailed { .. } => String::new(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::StepFailed { source, .. } => source.exit_code(),
            Self::OutputExists { .. } | Self::SetupFailed { .. } => EXIT_PRECONDITION,
        }
    }

    /// The failing step, if the error came from one.
    pub fn step_name(&self) -> Option<&str> {
        match self {
            Self::StepFailed { step_name, .. } => Some(step_name),
            _ => None,
        }
    }
}

/// Error from a pipeline step with operation context.
#[derive(Error, Debug)]
pub enum StepError {
    /// An external command exited unsuccessfully or could not be started.
    #[error("Error executing command {command}")]
    CommandFailed {
        /// Arguments joined by spaces.
        command: String,
        /// Combined stdout/stderr, or the spawn error.
        output: String,
        /// Exit status, if the process ran.
        status: Option<i32>,
    },

    /// A required file was not found.
    #[error("Required file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A precondition was not met.
    #[error("Precondition not met: {0}")]
    PreconditionFailed(String),

    /// File I/O error.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// Malformed tool output.
    #[error("Failed to parse {what}: {message}")]
    Parse { what: String, message: String },
}

impl StepError {
    /// Create a command failed error.
    pub fn command_failed(
        command: impl Into<String>,
        output: impl Into<String>,
        status: Option<i32>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            output: output.into(),
            status,
        }
    }

    /// Create a file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a precondition failed error.
    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::PreconditionFailed(message.into())
    }

    /// Create an I/O error with context.
    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a parse error.
    pub fn parse_error(what: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            what: what.into(),
            message: message.into(),
        }
    }

    /// One-line headline.
    pub fn title(&self) -> String {
        self.to_string()
    }

    /// Captured tool output for command failures; empty otherwise.
    pub fn details(&self) -> String {
        match self {
            Self::CommandFailed { output, .. } => output.clone(),
            _ => String::new(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { .. } => EXIT_COMMAND_FAILED,
            Self::FileNotFound { .. } | Self::PreconditionFailed(_) => EXIT_PRECONDITION,
            Self::Io { .. } | Self::Parse { .. } => EXIT_INTERNAL,
        }
    }
}

/// Result type for step operations.
pub type StepResult<T> = Result<T, StepError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
