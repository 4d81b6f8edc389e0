//! Command-line argument definitions for kicad-fab.

use std::path::PathBuf;

use clap::Parser;

use fab_core::logging::LogLevel;

/// Generate PCB fabrication outputs (gerbers, drill, BOM, pick-and-place)
/// from a KiCad project.
#[derive(Parser, Debug)]
#[command(name = "kicad-fab", author, version, about, long_about = None)]
pub struct Args {
    /// KiCad project folder to generate fabrication outputs for
    #[arg(short, long, required_unless_present = "write_config")]
    pub project: Option<PathBuf>,

    /// Schematic file within the project [default: <project>.kicad_sch]
    #[arg(short, long)]
    pub schema: Option<String>,

    /// Board file within the project [default: <project>.kicad_pcb]
    #[arg(short = 'c', long)]
    pub pcb: Option<String>,

    /// Output folder
    #[arg(short, long, default_value = "fab")]
    pub output: PathBuf,

    /// Delete and re-create the output folder if it already exists
    #[arg(short, long)]
    pub force: bool,

    /// Path to kicad-cli
    #[arg(short, long)]
    pub kicad_path: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error) [default: from config]
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// Write the effective configuration to this path and exit
    #[arg(long, value_name = "PATH")]
    pub write_config: Option<PathBuf>,
}
