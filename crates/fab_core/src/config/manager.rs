//! Config manager for loading and saving settings.
//!
//! Key features:
//! - Layered resolution (explicit path, project file, defaults)
//! - Atomic writes (write to temp file, then rename)
//! - Unknown sections are reported, not fatal

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::settings::{ConfigSection, Settings};

/// Name of the per-project config file looked up next to the KiCad project.
pub const PROJECT_CONFIG_FILE: &str = "kicad-fab.toml";

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages application configuration.
#[derive(Debug)]
pub struct ConfigManager {
    /// Path to the config file (None = built-in defaults).
    config_path: Option<PathBuf>,
    /// Current settings loaded in memory.
    settings: Settings,
}

impl ConfigManager {
    /// Create a manager bound to a config file path.
    ///
    /// Does not load the config - call `load()` after.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(config_path.into()),
            settings: Settings::default(),
        }
    }

    /// Create a manager holding built-in defaults and no backing file.
    pub fn defaults() -> Self {
        Self {
            config_path: None,
            settings: Settings::default(),
        }
    }

    /// Resolve and load the settings for a run.
    ///
    /// Resolution order:
    /// 1. `explicit` - must exist
    /// 2. `<project_dir>/kicad-fab.toml` - used if present
    /// 3. built-in defaults
    pub fn resolve(explicit: Option<&Path>, project_dir: &Path) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            let mut manager = Self::new(path);
            manager.load()?;
            return Ok(manager);
        }

        let project_config = project_dir.join(PROJECT_CONFIG_FILE);
        if project_config.is_file() {
            let mut manager = Self::new(project_config);
            manager.load()?;
            return Ok(manager);
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::defaults())
    }

    /// Get the config file path, if the settings came from a file.
    pub fn path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Get a reference to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get a mutable reference to the current settings.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Consume the manager and return its settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// Load config from file.
    ///
    /// Returns error if the manager has no file or it doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        let path = self
            .config_path
            .clone()
            .ok_or_else(|| ConfigError::NotFound(PathBuf::new()))?;
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }

        let content = fs::read_to_string(&path)?;
        self.settings = parse_settings(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(())
    }

    /// Save the entire config atomically to `path`.
    ///
    /// Writes to a temp file first, then renames to ensure atomic write.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let content = self.generate_config_with_comments()?;
        atomic_write(path, &content)?;
        Ok(())
    }

    /// Generate config content with a comment above each section.
    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let mut output = String::new();

        output.push_str("# kicad-fab configuration\n");
        output.push_str("# Every key is optional; missing keys use built-in defaults.\n\n");

        for section in ConfigSection::ALL {
            output.push_str(&format!("# {}\n", section.comment()));
            output.push_str(&format!("[{}]\n", section.table_name()));
            let content = self.section_toml(section)?;
            for line in content.lines() {
                output.push_str(line);
                output.push('\n');
            }
            output.push('\n');
        }

        Ok(output)
    }

    /// Serialize a single section's body.
    fn section_toml(&self, section: ConfigSection) -> ConfigResult<String> {
        let s = &self.settings;
        let content = match section {
            ConfigSection::Tools => toml::to_string_pretty(&s.tools)?,
            ConfigSection::Gerbers => toml::to_string_pretty(&s.gerbers)?,
            ConfigSection::Drill => toml::to_string_pretty(&s.drill)?,
            ConfigSection::Bom => toml::to_string_pretty(&s.bom)?,
            ConfigSection::Positions => toml::to_string_pretty(&s.positions)?,
            ConfigSection::Logging => toml::to_string_pretty(&s.logging)?,
        };
        Ok(content)
    }
}

/// Parse settings, warning about tables this version does not know.
fn parse_settings(content: &str) -> ConfigResult<Settings> {
    let table: toml::Table = toml::from_str(content)?;
    for key in table.keys() {
        if !ConfigSection::ALL.iter().any(|s| s.table_name() == key) {
            tracing::warn!("Ignoring unknown config section [{}]", key);
        }
    }

    let settings: Settings = toml::from_str(content)?;
    Ok(settings)
}

/// Write content to a file atomically.
fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    // Temp file in same directory (for atomic rename)
    let temp_path = path.with_extension("toml.tmp");

    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)?;

    Ok(())
}
