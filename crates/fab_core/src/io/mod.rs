//! Process and filesystem plumbing shared by the pipeline steps.

mod runner;
mod scratch;

pub use runner::{CommandRunner, ProcessRunner};
pub use scratch::ScratchFile;
