//! Adhesion CLI command
//!
//! Translates adhesion outcomes into terminal output. Not-found and
//! already-adhered outcomes become errors here so the binary can pick the
//! matching exit status.

use crate::config::settings::Settings;
use crate::error::{AdhesionError, AdhesionResult};
use crate::ports::CompanyRepository;
use crate::services::{AdhesionOutcome, AdhesionService, CompanyService};
use crate::storage::Storage;

/// Handle `adhere <tax_id>`
pub fn handle_adhere_command(
    storage: &Storage,
    settings: &Settings,
    tax_id: &str,
) -> AdhesionResult<()> {
    // Snapshot for the audit trail
    let before = storage.companies.find_by_tax_id(tax_id)?;

    match AdhesionService::new(&storage.companies).adhere(tax_id)? {
        AdhesionOutcome::Adhered(company) => {
            if let Some(before) = &before {
                CompanyService::new(storage).record_adhesion(before, &company);
            }
            let date = company
                .adhesion_date()
                .map(|d| d.format(&settings.date_format).to_string())
                .unwrap_or_default();
            println!("Company adhered successfully");
            println!("  {} adhered on {}", company, date);
            Ok(())
        }
        AdhesionOutcome::NotFound { tax_id } => Err(AdhesionError::company_not_found(tax_id)),
        AdhesionOutcome::AlreadyAdhered { message } => Err(AdhesionError::InvalidState(message)),
    }
}
