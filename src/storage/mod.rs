//! Storage layer for adhesion-cli
//!
//! JSON file stores with atomic writes. [`CompanyStore`] implements
//! [`CompanyRepository`](crate::ports::CompanyRepository) directly; the
//! [`Storage`] coordinator implements
//! [`TransferRepository`](crate::ports::TransferRepository) because
//! transfer queries resolve their companies through the company store.

pub mod companies;
pub mod file_io;
pub mod init;
pub mod transfers;

pub use companies::CompanyStore;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use transfers::TransferStore;

use std::collections::HashSet;

use chrono::NaiveDate;
use log::warn;
use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::AdhesionPaths;
use crate::error::{AdhesionError, AdhesionResult};
use crate::models::{Company, CompanyId, Transfer};
use crate::ports::TransferRepository;

/// Main storage coordinator that provides access to all stores
pub struct Storage {
    paths: AdhesionPaths,
    pub companies: CompanyStore,
    pub transfers: TransferStore,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a new Storage instance with auditing enabled
    pub fn new(paths: AdhesionPaths) -> Result<Self, AdhesionError> {
        paths.ensure_directories()?;

        Ok(Self {
            companies: CompanyStore::new(paths.companies_file()),
            transfers: TransferStore::new(paths.transfers_file()),
            audit: Some(AuditLogger::new(paths.audit_log())),
            paths,
        })
    }

    pub fn paths(&self) -> &AdhesionPaths {
        &self.paths
    }

    pub fn set_audit_enabled(&mut self, enabled: bool) {
        self.audit = if enabled {
            Some(AuditLogger::new(self.paths.audit_log()))
        } else {
            None
        };
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), AdhesionError> {
        self.load_all_as_of(chrono::Local::now().date_naive())
    }

    /// Load all data, judging transfer dates against `today`
    pub fn load_all_as_of(&self, today: NaiveDate) -> Result<(), AdhesionError> {
        self.companies.load()?;
        self.transfers.load(today)?;
        Ok(())
    }

    /// Record a newly created entity in the audit log
    ///
    /// Runs after the entity is committed, so a failed append is logged as a
    /// warning and never undoes or fails the mutation.
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        if let Some(logger) = &self.audit {
            let entry = AuditEntry::create(entity_type, entity_id, entity_name, entity);
            append_or_warn(logger, &entry);
        }
    }

    /// Record an entity update in the audit log; failures only warn
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) {
        if let Some(logger) = &self.audit {
            let entry = AuditEntry::update(entity_type, entity_id, entity_name, before, after);
            append_or_warn(logger, &entry);
        }
    }
}

fn append_or_warn(logger: &AuditLogger, entry: &AuditEntry) {
    if let Err(e) = logger.log(entry) {
        warn!(
            "{} {} {} was saved but not audited: {}",
            entry.operation, entry.entity_type, entry.entity_id, e
        );
    }
}

impl TransferRepository for Storage {
    fn save(&self, transfer: Transfer) -> AdhesionResult<Transfer> {
        let company_id = transfer.company_id();
        if self.companies.get(company_id)?.is_none() {
            return Err(AdhesionError::NotFound {
                entity_type: "Company",
                identifier: company_id.to_string(),
            });
        }

        self.transfers.upsert(transfer)
    }

    fn find_companies_with_transfers_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AdhesionResult<Vec<Company>> {
        let mut seen = HashSet::new();
        let mut companies = Vec::new();

        for transfer in self.transfers.get_by_date_range(start, end)? {
            let company_id = transfer.company_id();
            if !seen.insert(company_id) {
                continue;
            }

            let company = self.companies.get(company_id)?.ok_or_else(|| {
                AdhesionError::Storage(format!(
                    "Transfer references unknown company {}",
                    company_id
                ))
            })?;
            companies.push(company);
        }

        Ok(companies)
    }

    fn find_by_company(&self, company_id: CompanyId) -> AdhesionResult<Vec<Transfer>> {
        self.transfers.get_by_company(company_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::CompanyRepository;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdhesionPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all_as_of(date(2024, 3, 15)).unwrap();
        (temp_dir, storage)
    }

    fn register(storage: &Storage, tax_id: &str, name: &str) -> Company {
        storage
            .companies
            .save(Company::register(tax_id, name).unwrap())
            .unwrap()
    }

    fn transfer(company: &Company, on: NaiveDate) -> Transfer {
        Transfer::new_as_of(company, Decimal::ONE, "A-1", "B-2", on, date(2024, 3, 15)).unwrap()
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_storage();
        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.paths().base_dir(), temp_dir.path());
    }

    #[test]
    fn test_transfer_save_requires_known_company() {
        let (_temp_dir, storage) = create_storage();
        let ghost = Company::register("20123456789", "Ghost")
            .unwrap()
            .with_id(CompanyId::generate());

        let err = TransferRepository::save(&storage, transfer(&ghost, date(2024, 2, 1)))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_companies_with_transfers_are_distinct_in_first_transfer_order() {
        let (_temp_dir, storage) = create_storage();
        let acme = register(&storage, "20123456789", "Acme");
        let beta = register(&storage, "30712345678", "Beta");
        let idle = register(&storage, "27000000001", "Idle");

        for (company, on) in [
            (&beta, date(2024, 2, 2)),
            (&acme, date(2024, 2, 5)),
            (&beta, date(2024, 2, 20)),
            (&idle, date(2024, 1, 31)),
        ] {
            TransferRepository::save(&storage, transfer(company, on)).unwrap();
        }

        let found = storage
            .find_companies_with_transfers_between(date(2024, 2, 1), date(2024, 2, 29))
            .unwrap();
        let names: Vec<_> = found.iter().map(|c| c.legal_name()).collect();
        assert_eq!(names, vec!["Beta", "Acme"]);
    }

    #[test]
    fn test_audit_log_written_when_enabled() {
        let (_temp_dir, storage) = create_storage();
        let acme = register(&storage, "20123456789", "Acme");

        storage
            .log_create(EntityType::Company, acme.id().unwrap().to_string(), None, &acme);

        let logger = AuditLogger::new(storage.paths().audit_log());
        assert_eq!(logger.read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_audit_disabled_writes_nothing() {
        let (_temp_dir, mut storage) = create_storage();
        storage.set_audit_enabled(false);
        let acme = register(&storage, "20123456789", "Acme");

        storage
            .log_create(EntityType::Company, "cmp-x", None, &acme);

        assert!(!storage.paths().audit_log().exists());
    }
}
