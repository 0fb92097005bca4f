//! User settings for adhesion-cli
//!
//! Persisted as `config.json` in the base directory. Every field has a
//! serde default so older or hand-written files keep loading.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::AdhesionPaths;
use crate::error::AdhesionError;
use crate::export::ExportFormat;

/// User settings for adhesion-cli
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Diagnostic log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Date format used in terminal output (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Report format used when `--format` is not given
    #[serde(default)]
    pub export_format: ExportFormat,

    /// Whether mutations are recorded in the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            log_level: default_log_level(),
            date_format: default_date_format(),
            export_format: ExportFormat::default(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &AdhesionPaths) -> Result<Self, AdhesionError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| AdhesionError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| AdhesionError::Config(format!("Failed to parse settings file: {}", e)))?;

        validate_date_format(&settings.date_format)?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AdhesionPaths) -> Result<(), AdhesionError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AdhesionError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| AdhesionError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

/// Reject strftime patterns chrono cannot render
pub fn validate_date_format(date_format: &str) -> Result<(), AdhesionError> {
    if StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error)) {
        return Err(AdhesionError::Config(format!(
            "Invalid date_format '{}' in settings",
            date_format
        )));
    }
    Ok(())
}
