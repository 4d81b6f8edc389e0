//! Pipeline step implementations.
//!
//! Each step produces one fabrication deliverable, or a piece of state a
//! later step consumes.

mod bom;
mod pcb;
mod placement;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

pub use bom::BomStep;
pub use pcb::{ArchiveStep, DrillStep, GerbersStep};
pub use placement::{LoadFixupsStep, PositionsStep};

use super::errors::{StepError, StepResult};

/// Fail unless `path` is an existing file.
pub(crate) fn require_file(path: &Path) -> StepResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(StepError::file_not_found(path))
    }
}

/// Fail unless a step recorded an output and that file exists.
pub(crate) fn require_recorded_file(path: Option<&Path>, what: &str) -> StepResult<()> {
    match path {
        Some(path) => require_file(path),
        None => Err(StepError::precondition_failed(format!(
            "{} output was not recorded",
            what
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn require_file_rejects_missing_and_directories() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("blinky.kicad_sch");
        std::fs::write(&file, "").unwrap();

        assert!(require_file(&file).is_ok());
        assert!(matches!(
            require_file(&dir.path().join("missing")),
            Err(StepError::FileNotFound { .. })
        ));
        assert!(require_file(dir.path()).is_err());
    }

    #[test]
    fn require_recorded_file_needs_a_record() {
        let err = require_recorded_file(None, "BOM").unwrap_err();
        assert!(err.to_string().contains("BOM"));
        assert_eq!(err.exit_code(), 1);
    }
}
