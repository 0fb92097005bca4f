//! Trailing-month reports
//!
//! Both reports compute the previous calendar month once per call and
//! delegate the range query to the repositories.

use std::collections::HashSet;

use chrono::NaiveDate;
use log::debug;

use crate::error::AdhesionResult;
use crate::models::{Company, DateRange};
use crate::ports::{CompanyRepository, TransferRepository};

/// Service producing the last-month company reports
pub struct ReportService<'a> {
    companies: &'a dyn CompanyRepository,
    transfers: &'a dyn TransferRepository,
}

impl<'a> ReportService<'a> {
    pub fn new(
        companies: &'a dyn CompanyRepository,
        transfers: &'a dyn TransferRepository,
    ) -> Self {
        Self {
            companies,
            transfers,
        }
    }

    /// Companies adhered during the previous calendar month
    pub fn companies_adhered_last_month(&self) -> AdhesionResult<Vec<Company>> {
        self.companies_adhered_in(DateRange::last_month())
    }

    pub fn companies_adhered_last_month_as_of(
        &self,
        today: NaiveDate,
    ) -> AdhesionResult<Vec<Company>> {
        self.companies_adhered_in(DateRange::last_month_from(today))
    }

    /// Companies with at least one transfer during the previous calendar month
    pub fn companies_with_transfers_last_month(&self) -> AdhesionResult<Vec<Company>> {
        self.companies_with_transfers_in(DateRange::last_month())
    }

    pub fn companies_with_transfers_last_month_as_of(
        &self,
        today: NaiveDate,
    ) -> AdhesionResult<Vec<Company>> {
        self.companies_with_transfers_in(DateRange::last_month_from(today))
    }

    fn companies_adhered_in(&self, range: DateRange) -> AdhesionResult<Vec<Company>> {
        debug!("Querying companies adhered {}", range);
        self.companies
            .find_by_adhesion_date_between(range.start, range.end)
    }

    fn companies_with_transfers_in(&self, range: DateRange) -> AdhesionResult<Vec<Company>> {
        debug!("Querying companies with transfers {}", range);
        let companies = self
            .transfers
            .find_companies_with_transfers_between(range.start, range.end)?;

        // First occurrence wins; companies without an id are kept as-is
        let mut seen = HashSet::new();
        Ok(companies
            .into_iter()
            .filter(|c| c.id().map(|id| seen.insert(id)).unwrap_or(true))
            .collect())
    }
}
