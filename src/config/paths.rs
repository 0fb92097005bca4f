//! Path management for adhesion-cli
//!
//! ## Path Resolution Order
//!
//! 1. `ADHESION_CLI_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory reported by `directories`
//!    (e.g. `~/.config/adhesion-cli` on Linux, `%APPDATA%\adhesion-cli` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::AdhesionError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "ADHESION_CLI_DATA_DIR";

/// Manages all paths used by adhesion-cli
#[derive(Debug, Clone)]
pub struct AdhesionPaths {
    base_dir: PathBuf,
}

impl AdhesionPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, AdhesionError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to companies.json
    pub fn companies_file(&self) -> PathBuf {
        self.data_dir().join("companies.json")
    }

    /// Get the path to transfers.json
    pub fn transfers_file(&self) -> PathBuf {
        self.data_dir().join("transfers.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), AdhesionError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AdhesionError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| AdhesionError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if adhesion-cli has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, AdhesionError> {
    ProjectDirs::from("", "", "adhesion-cli")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| AdhesionError::Config("Could not determine home directory".into()))
}
