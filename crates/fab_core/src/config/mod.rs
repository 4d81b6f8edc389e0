//! Configuration management for kicad-fab.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Layered lookup: `--config` path, project file, built-in defaults
//! - Atomic file writes when emitting a starter config
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use fab_core::config::ConfigManager;
//!
//! let config = ConfigManager::resolve(None, Path::new("boards/blinky")).unwrap();
//! println!("Rotation field: {}", config.settings().positions.rotation_field);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult, PROJECT_CONFIG_FILE};
pub use settings::{
    BomSettings, ConfigSection, DrillSettings, GerberSettings, LoggingSettings,
    PositionSettings, Settings, ToolSettings,
};
