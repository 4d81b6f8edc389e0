//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Every field has a default, so an empty or partial file is valid.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// External tool locations.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Gerber export options.
    #[serde(default)]
    pub gerbers: GerberSettings,

    /// Drill export options.
    #[serde(default)]
    pub drill: DrillSettings,

    /// BOM export options.
    #[serde(default)]
    pub bom: BomSettings,

    /// Pick-and-place export options.
    #[serde(default)]
    pub positions: PositionSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Locations of the external tools the pipeline drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Explicit kicad-cli path. Skips probing when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kicad_path: Option<String>,

    /// Install locations checked in order when no explicit path is given.
    #[serde(default = "default_kicad_probe_paths")]
    pub kicad_probe_paths: Vec<String>,

    /// Archive tool command.
    #[serde(default = "default_zip_path")]
    pub zip_path: String,
}

fn default_kicad_probe_paths() -> Vec<String> {
    vec!["/Applications/KiCad/KiCad.app/Contents/MacOS/kicad-cli".to_string()]
}

fn default_zip_path() -> String {
    "zip".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            kicad_path: None,
            kicad_probe_paths: default_kicad_probe_paths(),
            zip_path: default_zip_path(),
        }
    }
}

/// Gerber export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GerberSettings {
    /// Comma-separated list of board layers to plot.
    #[serde(default = "default_layers")]
    pub layers: String,

    /// Disable Gerber X2 extensions.
    #[serde(default = "default_true")]
    pub no_x2: bool,

    /// Subtract soldermask from silkscreen.
    #[serde(default = "default_true")]
    pub subtract_soldermask: bool,
}

fn default_layers() -> String {
    "F.Cu,F.Paste,F.Silkscreen,F.Mask,B.Cu,B.Paste,B.Silkscreen,B.Mask,Edge.Cuts".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GerberSettings {
    fn default() -> Self {
        Self {
            layers: default_layers(),
            no_x2: true,
            subtract_soldermask: true,
        }
    }
}

/// Drill export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillSettings {
    /// Format of the drill map file.
    #[serde(default = "default_map_format")]
    pub map_format: String,
}

fn default_map_format() -> String {
    "gerberx2".to_string()
}

impl Default for DrillSettings {
    fn default() -> Self {
        Self {
            map_format: default_map_format(),
        }
    }
}

/// BOM export configuration.
///
/// Defaults produce the column layout JLCPCB expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomSettings {
    /// Symbol fields to export.
    #[serde(default = "default_bom_fields")]
    pub fields: String,

    /// Field used to group rows.
    #[serde(default = "default_group_by")]
    pub group_by: String,

    /// Column labels, one per field.
    #[serde(default = "default_bom_labels")]
    pub labels: String,

    /// Delimiter for reference ranges (empty lists every reference).
    #[serde(default)]
    pub ref_range_delimiter: String,
}

fn default_bom_fields() -> String {
    "Value,Reference,Footprint,LCSC".to_string()
}

fn default_group_by() -> String {
    "Value".to_string()
}

fn default_bom_labels() -> String {
    "Comment,Designator,Footprint,LCSC Part Number".to_string()
}

impl Default for BomSettings {
    fn default() -> Self {
        Self {
            fields: default_bom_fields(),
            group_by: default_group_by(),
            labels: default_bom_labels(),
            ref_range_delimiter: String::new(),
        }
    }
}

/// Pick-and-place export configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSettings {
    /// Schematic field holding the per-component rotation override.
    #[serde(default = "default_rotation_field")]
    pub rotation_field: String,

    /// Coordinate units.
    #[serde(default = "default_units")]
    pub units: String,

    /// Board side to export.
    #[serde(default = "default_side")]
    pub side: String,
}

fn default_rotation_field() -> String {
    "PosRotAdjust".to_string()
}

fn default_units() -> String {
    "mm".to_string()
}

fn default_side() -> String {
    "front".to_string()
}

impl Default for PositionSettings {
    fn default() -> Self {
        Self {
            rotation_field: default_rotation_field(),
            units: default_units(),
            side: default_side(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default log level (`RUST_LOG` still wins when set).
    #[serde(default)]
    pub level: LogLevel,

    /// Log file name, written inside the output directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            log_file: None,
        }
    }
}

/// Names of config sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Tools,
    Gerbers,
    Drill,
    Bom,
    Positions,
    Logging,
}

impl ConfigSection {
    /// All sections in file order.
    pub const ALL: [ConfigSection; 6] = [
        ConfigSection::Tools,
        ConfigSection::Gerbers,
        ConfigSection::Drill,
        ConfigSection::Bom,
        ConfigSection::Positions,
        ConfigSection::Logging,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Tools => "tools",
            ConfigSection::Gerbers => "gerbers",
            ConfigSection::Drill => "drill",
            ConfigSection::Bom => "bom",
            ConfigSection::Positions => "positions",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the section in generated files.
    pub fn comment(&self) -> &'static str {
        match self {
            ConfigSection::Tools => "External tool locations",
            ConfigSection::Gerbers => "Gerber export (kicad-cli pcb export gerbers)",
            ConfigSection::Drill => "Drill export (kicad-cli pcb export drill)",
            ConfigSection::Bom => "Bill of materials (kicad-cli sch export bom)",
            ConfigSection::Positions => "Pick-and-place export and rotation fixups",
            ConfigSection::Logging => "Logging configuration",
        }
    }
}
