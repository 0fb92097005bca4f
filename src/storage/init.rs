//! Storage initialization
//!
//! Handles first-run setup: directories plus empty data files.

use crate::config::paths::AdhesionPaths;
use crate::error::AdhesionError;

use super::companies::CompanyData;
use super::file_io::write_json_atomic;
use super::transfers::TransferData;

/// Initialize storage for a fresh installation
///
/// Existing data files are left untouched.
pub fn initialize_storage(paths: &AdhesionPaths) -> Result<(), AdhesionError> {
    paths.ensure_directories()?;

    if !paths.companies_file().exists() {
        write_json_atomic(paths.companies_file(), &CompanyData::default())?;
    }

    if !paths.transfers_file().exists() {
        write_json_atomic(paths.transfers_file(), &TransferData::default())?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &AdhesionPaths) -> bool {
    !paths.companies_file().exists() || !paths.transfers_file().exists()
}
