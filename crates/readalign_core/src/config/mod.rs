//! Configuration management for readalign.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only the changed section is modified)
//! - Defaults applied for missing keys on load
//!
//! # Example
//!
//! ```no_run
//! use readalign_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/settings.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Export folder: {}", config.settings().paths.export_folder);
//!
//! config.settings_mut().editing.insert_duration_secs = 2.0;
//! config.update_section(ConfigSection::Editing).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{ConfigSection, EditingSettings, LoggingSettings, PathSettings, Settings};
