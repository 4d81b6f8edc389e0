//! Scratch files that external tools write and the pipeline consumes.
//!
//! A [`ScratchFile`] owns a path inside the output directory. The file is
//! removed when the guard goes out of scope, whichever way the owning step
//! exits, including when the tool never created it.

use std::io;
use std::path::Path;

use tempfile::TempPath;

/// Owned intermediate file, deleted on drop.
#[derive(Debug)]
pub struct ScratchFile {
    path: TempPath,
}

impl ScratchFile {
    /// Claim `file_name` inside `dir`.
    ///
    /// Nothing is created on disk; the tool that writes the file does that.
    /// Fails only if a relative `dir` cannot be made absolute.
    pub fn new(dir: &Path, file_name: &str) -> io::Result<Self> {
        let path = TempPath::try_from_path(dir.join(file_name))?;
        tracing::trace!("Claimed scratch file {}", path.display());
        Ok(Self { path })
    }

    /// Path of the scratch file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn removes_file_on_drop() {
        let dir = tempdir().unwrap();
        let path;
        {
            let scratch = ScratchFile::new(dir.path(), "pre-fixup-pos.pos").unwrap();
            path = scratch.path().to_path_buf();
            fs::write(scratch.path(), "Ref,Val\n").unwrap();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn drop_without_file_is_fine() {
        let dir = tempdir().unwrap();
        let scratch = ScratchFile::new(dir.path(), "pos-fixups.csv").unwrap();
        let path = scratch.path().to_path_buf();
        drop(scratch);
        assert!(!path.exists());
    }

    #[test]
    fn removes_file_when_unwinding_through_error() {
        fn failing_step(dir: &Path) -> Result<(), String> {
            let scratch = ScratchFile::new(dir, "pos-fixups.csv").map_err(|e| e.to_string())?;
            fs::write(scratch.path(), "Reference\n").map_err(|e| e.to_string())?;
            Err("tool failed".to_string())
        }

        let dir = tempdir().unwrap();
        assert!(failing_step(dir.path()).is_err());
        assert!(!dir.path().join("pos-fixups.csv").exists());
    }
}
