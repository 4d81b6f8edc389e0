//! kicad-cli command builder.
//!
//! Builds argument vectors for the `kicad-cli` subcommands the pipeline
//! uses. Nothing here runs a process; the vectors go to a
//! [`CommandRunner`](crate::io::CommandRunner).

use std::path::Path;

use crate::config::{BomSettings, DrillSettings, GerberSettings, PositionSettings};

/// Default command name when no install path is found.
pub const KICAD_CLI: &str = "kicad-cli";

/// Builder for kicad-cli command lines.
#[derive(Debug, Clone)]
pub struct KicadCli {
    program: String,
}

impl KicadCli {
    /// Create a builder for the given kicad-cli executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `pcb export gerbers` into `output_dir`.
    pub fn export_gerbers(
        &self,
        settings: &GerberSettings,
        output_dir: &Path,
        pcb: &Path,
    ) -> Vec<String> {
        let mut args = self.subcommand(&["pcb", "export", "gerbers"]);
        args.push("-l".to_string());
        args.push(settings.layers.clone());
        if settings.no_x2 {
            args.push("--no-x2".to_string());
        }
        if settings.subtract_soldermask {
            args.push("--subtract-soldermask".to_string());
        }
        args.push("-o".to_string());
        args.push(path_arg(output_dir));
        args.push(path_arg(pcb));
        args
    }

    /// `pcb export drill` into `output_dir`.
    ///
    /// kicad-cli treats the output as a directory only with a trailing
    /// separator, so one is always appended.
    pub fn export_drill(
        &self,
        settings: &DrillSettings,
        output_dir: &Path,
        pcb: &Path,
    ) -> Vec<String> {
        let mut args = self.subcommand(&["pcb", "export", "drill"]);
        args.push("--map-format".to_string());
        args.push(settings.map_format.clone());
        args.push("-o".to_string());
        args.push(dir_arg(output_dir));
        args.push(path_arg(pcb));
        args
    }

    /// `sch export bom` for the fabrication BOM.
    pub fn export_bom(&self, settings: &BomSettings, output: &Path, schema: &Path) -> Vec<String> {
        let mut args = self.subcommand(&["sch", "export", "bom"]);
        args.extend([
            "--fields".to_string(),
            settings.fields.clone(),
            "--group-by".to_string(),
            settings.group_by.clone(),
            "--labels".to_string(),
            settings.labels.clone(),
            "--ref-range-delimiter".to_string(),
            settings.ref_range_delimiter.clone(),
            "-o".to_string(),
            path_arg(output),
            path_arg(schema),
        ]);
        args
    }

    /// `sch export bom` restricted to reference and rotation override.
    pub fn export_rotation_fixups(
        &self,
        settings: &PositionSettings,
        output: &Path,
        schema: &Path,
    ) -> Vec<String> {
        let mut args = self.subcommand(&["sch", "export", "bom"]);
        args.extend([
            "--fields".to_string(),
            format!("Reference,{}", settings.rotation_field),
            "-o".to_string(),
            path_arg(output),
            path_arg(schema),
        ]);
        args
    }

    /// `pcb export pos` as CSV.
    pub fn export_positions(
        &self,
        settings: &PositionSettings,
        output: &Path,
        pcb: &Path,
    ) -> Vec<String> {
        let mut args = self.subcommand(&["pcb", "export", "pos"]);
        args.extend([
            "--format".to_string(),
            "csv".to_string(),
            "--units".to_string(),
            settings.units.clone(),
            "--side".to_string(),
            settings.side.clone(),
            "-o".to_string(),
            path_arg(output),
            path_arg(pcb),
        ]);
        args
    }

    fn subcommand(&self, parts: &[&str]) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(parts.iter().map(|p| p.to_string()))
            .collect()
    }
}

pub(crate) fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

fn dir_arg(path: &Path) -> String {
    let mut arg = path_arg(path);
    if !arg.ends_with(std::path::MAIN_SEPARATOR) {
        arg.push(std::path::MAIN_SEPARATOR);
    }
    arg
}
