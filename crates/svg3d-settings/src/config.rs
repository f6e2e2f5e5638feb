//! Configuration and settings management for svg3d
//!
//! Provides configuration file handling, defaults, and validation.
//! Supports JSON and TOML file formats, with a default location in the
//! platform-specific config directory.
//!
//! Configuration is organized into logical sections:
//! - Import settings (curve resolution, vertex cap)
//! - Extrusion depths handed to the downstream solid builder
//! - Logging preferences

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use svg3d_core::constants::{
    BASE_DEPTH, CURVE_STEP, DEFAULT_MAX_CONTOUR_VERTICES, POCKET_DEPTH,
};
use svg3d_core::{ExtrusionParams, ImportOptions};
use tracing::debug;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Contour import settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Curve and ellipse sampling step in document units
    pub curve_step: f64,
    /// Maximum vertices per contour accepted by validation
    pub max_contour_vertices: usize,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            curve_step: CURVE_STEP,
            max_contour_vertices: DEFAULT_MAX_CONTOUR_VERTICES,
        }
    }
}

/// Extrusion depths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrusionSettings {
    /// Full depth of the outer footprint
    pub base_depth: f64,
    /// Depth of the top layer that carries the holes
    pub pocket_depth: f64,
}

impl Default for ExtrusionSettings {
    fn default() -> Self {
        Self {
            base_depth: BASE_DEPTH,
            pocket_depth: POCKET_DEPTH,
        }
    }
}

/// Logging preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of pretty text
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Import settings
    pub import: ImportSettings,
    /// Extrusion depths
    pub extrusion: ExtrusionSettings,
    /// Logging preferences
    pub logging: LoggingSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/svg3d/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("svg3d").join("config.toml"))
    }

    /// Load from an explicit path, else the default path if it exists, else defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Some(default) if default.is_file() => Self::load_from_file(&default),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Self::format_of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Self::format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.import.curve_step.is_finite() || self.import.curve_step <= 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "import.curve_step".to_string(),
                value: self.import.curve_step.to_string(),
            });
        }

        if self.import.max_contour_vertices == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "import.max_contour_vertices".to_string(),
                value: "0".to_string(),
            });
        }

        if self.extrusion.pocket_depth.is_nan() || self.extrusion.pocket_depth <= 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "extrusion.pocket_depth".to_string(),
                value: self.extrusion.pocket_depth.to_string(),
            });
        }

        if self.extrusion.pocket_depth >= self.extrusion.base_depth {
            return Err(ConfigError::PocketDeeperThanBase {
                base_depth: self.extrusion.base_depth,
                pocket_depth: self.extrusion.pocket_depth,
            });
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::UnknownLogLevel(self.logging.level.clone()));
        }

        Ok(())
    }

    /// Tunables for the contour pipeline.
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            curve_step: self.import.curve_step,
            max_contour_vertices: self.import.max_contour_vertices,
            extrusion: ExtrusionParams {
                base_depth: self.extrusion.base_depth,
                pocket_depth: self.extrusion.pocket_depth,
            },
        }
    }

    fn format_of(path: &Path) -> Result<Format, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

enum Format {
    Json,
    Toml,
}
