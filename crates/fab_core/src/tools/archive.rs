//! Fabrication file discovery and the zip command line.
//!
//! Gerber outputs are matched the way a shell glob `*.g*` would match them
//! (any non-hidden name containing `.g`), drill files by `*.drl`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::kicad::path_arg;

/// Kind of fabrication output to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FabFileKind {
    /// Gerber layers, job file and drill maps (`*.g*`).
    Gerber,
    /// Excellon drill files (`*.drl`).
    Drill,
}

impl FabFileKind {
    /// Does a file name belong to this kind?
    pub fn matches(&self, file_name: &str) -> bool {
        if file_name.starts_with('.') {
            return false;
        }
        match self {
            FabFileKind::Gerber => file_name.contains(".g"),
            FabFileKind::Drill => file_name.ends_with(".drl"),
        }
    }
}

/// List the files of one kind directly inside `dir`, sorted by name.
pub fn find_fab_files(dir: &Path, kind: FabFileKind) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if kind.matches(&name.to_string_lossy()) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Build `zip -o <archive> <files...>`.
pub fn zip_args(zip_program: &str, archive: &Path, files: &[PathBuf]) -> Vec<String> {
    let mut args = vec![zip_program.to_string(), "-o".to_string(), path_arg(archive)];
    args.extend(files.iter().map(|f| path_arg(f)));
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn gerber_pattern_matches_like_glob() {
        let g = FabFileKind::Gerber;
        assert!(g.matches("blinky-F_Cu.gtl"));
        assert!(g.matches("blinky-job.gbrjob"));
        assert!(g.matches("blinky-drl_map.gbr"));
        assert!(!g.matches("blinky.drl"));
        assert!(!g.matches("blinky-gerbers.zip"));
        assert!(!g.matches(".hidden.gtl"));
    }

    #[test]
    fn drill_pattern_matches_extension() {
        assert!(FabFileKind::Drill.matches("blinky-PTH.drl"));
        assert!(!FabFileKind::Drill.matches("blinky.drl.bak"));
    }

    #[test]
    fn finds_sorted_files_only() {
        let dir = tempdir().unwrap();
        for name in ["b-B_Cu.gbl", "a-F_Cu.gtl", "blinky.drl", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("sub.gdir")).unwrap();

        let gerbers = find_fab_files(dir.path(), FabFileKind::Gerber).unwrap();
        let names: Vec<_> = gerbers
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["a-F_Cu.gtl", "b-B_Cu.gbl"]);

        let drills = find_fab_files(dir.path(), FabFileKind::Drill).unwrap();
        assert_eq!(drills.len(), 1);
    }

    #[test]
    fn zip_args_list_archive_then_files() {
        let files = vec![PathBuf::from("fab/a.gtl"), PathBuf::from("fab/a.drl")];
        let args = zip_args("zip", Path::new("fab/blinky-gerbers.zip"), &files);
        assert_eq!(args, ["zip", "-o", "fab/blinky-gerbers.zip", "fab/a.gtl", "fab/a.drl"]);
    }
}
