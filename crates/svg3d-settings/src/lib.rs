//! svg3d Settings Crate
//!
//! Handles configuration files: import tunables, extrusion depths and logging.

pub mod config;
pub mod error;

pub use config::{Config, ExtrusionSettings, ImportSettings, LoggingSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
