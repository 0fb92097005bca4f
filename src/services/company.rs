//! Company service
//!
//! Registration, lookup and renaming of companies, with audit logging.

use log::info;

use crate::audit::EntityType;
use crate::error::{AdhesionError, AdhesionResult};
use crate::models::Company;
use crate::ports::CompanyRepository;
use crate::storage::Storage;

/// Service for company management
pub struct CompanyService<'a> {
    storage: &'a Storage,
}

impl<'a> CompanyService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new, not yet adhered company
    pub fn register(&self, tax_id: &str, legal_name: &str) -> AdhesionResult<Company> {
        let company = Company::register(tax_id, legal_name)?;

        if self.storage.companies.find_by_tax_id(company.tax_id())?.is_some() {
            return Err(AdhesionError::duplicate_company(company.tax_id()));
        }

        let company = self.storage.companies.save(company)?;

        self.storage.log_create(
            EntityType::Company,
            id_label(&company),
            Some(company.legal_name().to_string()),
            &company,
        );

        info!("Registered company {}", company);
        Ok(company)
    }

    pub fn find(&self, tax_id: &str) -> AdhesionResult<Option<Company>> {
        self.storage.companies.find_by_tax_id(tax_id)
    }

    /// Get a company by tax id, failing with `NotFound` when absent
    pub fn get(&self, tax_id: &str) -> AdhesionResult<Company> {
        self.find(tax_id)?
            .ok_or_else(|| AdhesionError::company_not_found(tax_id.trim()))
    }

    pub fn list(&self) -> AdhesionResult<Vec<Company>> {
        self.storage.companies.find_all()
    }

    /// Change a company's legal name
    pub fn rename(&self, tax_id: &str, legal_name: &str) -> AdhesionResult<Company> {
        let before = self.get(tax_id)?;
        let renamed = before.with_legal_name(legal_name)?;
        let after = self.storage.companies.save(renamed)?;

        self.storage.log_update(
            EntityType::Company,
            id_label(&after),
            Some(after.legal_name().to_string()),
            &before,
            &after,
        );

        info!("Renamed company {} to {}", after.tax_id(), after.legal_name());
        Ok(after)
    }

    /// Record an adhesion performed by the adhesion use case
    pub fn record_adhesion(&self, before: &Company, after: &Company) {
        self.storage.log_update(
            EntityType::Company,
            id_label(after),
            Some(after.legal_name().to_string()),
            before,
            after,
        );
    }
}

fn id_label(company: &Company) -> String {
    company
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| company.tax_id().to_string())
}
