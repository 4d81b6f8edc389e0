//! KiCad project file locations.

use std::path::{Path, PathBuf};

/// Resolved input files for a fabrication run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    /// Project folder.
    pub project_dir: PathBuf,
    /// Project base name, used to name the deliverables.
    pub project_base: String,
    /// Schematic file.
    pub schema: PathBuf,
    /// Board file.
    pub pcb: PathBuf,
}

impl ProjectPaths {
    /// Resolve project files.
    ///
    /// `schema` and `pcb` are file names relative to the project folder and
    /// default to `<basename>.kicad_sch` / `<basename>.kicad_pcb`.
    ///
    /// Returns `None` if no base name can be derived from `project_dir`.
    pub fn resolve(project_dir: &Path, schema: Option<&str>, pcb: Option<&str>) -> Option<Self> {
        let project_base = project_base_name(project_dir)?;

        let schema = schema
            .map(String::from)
            .unwrap_or_else(|| format!("{}.kicad_sch", project_base));
        let pcb = pcb
            .map(String::from)
            .unwrap_or_else(|| format!("{}.kicad_pcb", project_base));

        Some(Self {
            project_dir: project_dir.to_path_buf(),
            schema: project_dir.join(schema),
            pcb: project_dir.join(pcb),
            project_base,
        })
    }
}

/// Last path component of the project folder.
///
/// Falls back to the canonical path for inputs like `.`.
fn project_base_name(project_dir: &Path) -> Option<String> {
    let name = match project_dir.file_name() {
        Some(name) => name.to_os_string(),
        None => project_dir.canonicalize().ok()?.file_name()?.to_os_string(),
    };
    let name = name.to_string_lossy().to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_project_name() {
        let paths = ProjectPaths::resolve(Path::new("boards/blinky"), None, None).unwrap();

        assert_eq!(paths.project_base, "blinky");
        assert_eq!(paths.schema, Path::new("boards/blinky/blinky.kicad_sch"));
        assert_eq!(paths.pcb, Path::new("boards/blinky/blinky.kicad_pcb"));
    }

    #[test]
    fn explicit_names_join_onto_project() {
        let paths = ProjectPaths::resolve(
            Path::new("boards/blinky/"),
            Some("main.kicad_sch"),
            Some("rev2.kicad_pcb"),
        )
        .unwrap();

        assert_eq!(paths.project_base, "blinky");
        assert_eq!(paths.schema, Path::new("boards/blinky/main.kicad_sch"));
        assert_eq!(paths.pcb, Path::new("boards/blinky/rev2.kicad_pcb"));
    }

    #[test]
    fn current_dir_uses_canonical_name() {
        let paths = ProjectPaths::resolve(Path::new("."), None, None).unwrap();
        assert!(!paths.project_base.is_empty());
        assert!(paths.pcb.to_string_lossy().ends_with(".kicad_pcb"));
    }
}
