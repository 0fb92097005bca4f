//! Persistence ports
//!
//! The services only talk to storage through these traits. The JSON file
//! stores in [`crate::storage`] implement them for the CLI; tests supply
//! in-memory fakes.

use chrono::NaiveDate;

use crate::error::AdhesionResult;
use crate::models::{Company, CompanyId, Transfer};

/// Data access for companies
pub trait CompanyRepository {
    /// Persist a company, assigning an id on first save
    ///
    /// Must be all-or-nothing, and must reject a second company with the
    /// same tax id (`AdhesionError::Duplicate`).
    fn save(&self, company: Company) -> AdhesionResult<Company>;

    fn find_by_tax_id(&self, tax_id: &str) -> AdhesionResult<Option<Company>>;

    /// Companies whose adhesion date lies in `[start, end]`
    fn find_by_adhesion_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AdhesionResult<Vec<Company>>;

    fn find_all(&self) -> AdhesionResult<Vec<Company>>;
}

/// Data access for transfers
pub trait TransferRepository {
    /// Persist a transfer, assigning an id on first save
    fn save(&self, transfer: Transfer) -> AdhesionResult<Transfer>;

    /// Distinct companies owning at least one transfer dated in `[start, end]`
    fn find_companies_with_transfers_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AdhesionResult<Vec<Company>>;

    fn find_by_company(&self, company_id: CompanyId) -> AdhesionResult<Vec<Transfer>>;
}
