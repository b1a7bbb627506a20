//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level
//! updates.

use serde::{Deserialize, Serialize};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Fragment editing behavior.
    #[serde(default)]
    pub editing: EditingSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Path configuration for export output, logs, and session restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Output folder for exported publications.
    #[serde(default = "default_export_folder")]
    pub export_folder: String,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Last opened publication path.
    #[serde(default)]
    pub last_book_path: String,
}

fn default_export_folder() -> String {
    "export".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            export_folder: default_export_folder(),
            logs_folder: default_logs_folder(),
            last_book_path: String::new(),
        }
    }
}

/// Fragment editing behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditingSettings {
    /// Clip duration in seconds for fragments created by insert-after.
    #[serde(default = "default_insert_duration")]
    pub insert_duration_secs: f64,

    /// `epub:type` attribute written on exported sequences.
    #[serde(default = "default_seq_epub_type")]
    pub seq_epub_type: String,
}

fn default_insert_duration() -> f64 {
    1.0
}

fn default_seq_epub_type() -> String {
    "chapter".to_string()
}

impl Default for EditingSettings {
    fn default() -> Self {
        Self {
            insert_duration_secs: default_insert_duration(),
            seq_epub_type: default_seq_epub_type(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level for application logging ("trace" through "error").
    #[serde(default = "default_level")]
    pub level: String,

    /// Write a per-session edit log file.
    #[serde(default = "default_true")]
    pub session_log: bool,

    /// Number of recent lines the session logger keeps for display.
    #[serde(default = "default_tail_lines")]
    pub tail_lines: u32,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tail_lines() -> u32 {
    50
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            session_log: default_true(),
            tail_lines: default_tail_lines(),
        }
    }
}

/// Identifies one settings section for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    /// The `[paths]` table.
    Paths,
    /// The `[editing]` table.
    Editing,
    /// The `[logging]` table.
    Logging,
}

impl ConfigSection {
    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Editing => "editing",
            ConfigSection::Logging => "logging",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let settings = Settings::default();
        assert_eq!(settings.paths.export_folder, "export");
        assert!((settings.editing.insert_duration_secs - 1.0).abs() < 1e-9);
        assert_eq!(settings.editing.seq_epub_type, "chapter");
        assert_eq!(settings.logging.level, "info");
        assert!(settings.logging.session_log);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings: Settings = toml::from_str("[paths]\nexport_folder = \"out\"\n").unwrap();
        assert_eq!(settings.paths.export_folder, "out");
        assert_eq!(settings.paths.logs_folder, ".logs");
        assert_eq!(settings.logging.tail_lines, 50);
    }

    #[test]
    fn roundtrips_through_toml() {
        let mut settings = Settings::default();
        settings.editing.insert_duration_secs = 2.5;

        let serialized = toml::to_string_pretty(&settings).unwrap();
        let reparsed: Settings = toml::from_str(&serialized).unwrap();
        assert!((reparsed.editing.insert_duration_secs - 2.5).abs() < 1e-9);
    }
}
