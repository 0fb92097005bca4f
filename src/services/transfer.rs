//! Transfer service
//!
//! Registers transfers for companies identified by tax id.

use chrono::NaiveDate;
use log::info;
use rust_decimal::Decimal;

use crate::audit::EntityType;
use crate::error::AdhesionResult;
use crate::models::{Company, Transfer};
use crate::ports::TransferRepository;
use crate::storage::Storage;

use super::company::CompanyService;

/// Service for transfer registration and lookup
pub struct TransferService<'a> {
    storage: &'a Storage,
}

impl<'a> TransferService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a transfer for the company with `tax_id`
    ///
    /// `transfer_date` defaults to today.
    pub fn register(
        &self,
        tax_id: &str,
        amount: Decimal,
        debit_account: &str,
        credit_account: &str,
        transfer_date: Option<NaiveDate>,
    ) -> AdhesionResult<Transfer> {
        let today = chrono::Local::now().date_naive();
        let company = CompanyService::new(self.storage).get(tax_id)?;

        let transfer = Transfer::new_as_of(
            &company,
            amount,
            debit_account,
            credit_account,
            transfer_date.unwrap_or(today),
            today,
        )?;
        let transfer = TransferRepository::save(self.storage, transfer)?;

        let label = transfer
            .id()
            .map(|id| id.to_string())
            .unwrap_or_default();
        self.storage.log_create(
            EntityType::Transfer,
            label,
            Some(company.legal_name().to_string()),
            &transfer,
        );

        info!("Registered transfer {} for {}", transfer, company);
        Ok(transfer)
    }

    /// All transfers of the company with `tax_id`, oldest first
    pub fn list_for_company(&self, tax_id: &str) -> AdhesionResult<(Company, Vec<Transfer>)> {
        let company = CompanyService::new(self.storage).get(tax_id)?;
        let transfers = match company.id() {
            Some(id) => self.storage.find_by_company(id)?,
            None => Vec::new(),
        };
        Ok((company, transfers))
    }
}
