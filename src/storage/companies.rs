//! Company store for JSON storage
//!
//! Manages loading and saving companies to companies.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;
use log::debug;

use crate::error::{AdhesionError, AdhesionResult};
use crate::models::{Company, CompanyId};
use crate::ports::CompanyRepository;

use super::file_io::{read_json, write_json_atomic};

/// Serializable company data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct CompanyData {
    pub companies: Vec<Company>,
}

/// File-backed company store
pub struct CompanyStore {
    path: PathBuf,
    data: RwLock<HashMap<CompanyId, Company>>,
}

impl CompanyStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load companies from disk
    ///
    /// Every record is validated while decoding; a file holding an invalid
    /// company or a record without an id fails the whole load.
    pub fn load(&self) -> AdhesionResult<()> {
        let file_data: CompanyData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            AdhesionError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.clear();

        for company in file_data.companies {
            let id = company.id().ok_or_else(|| {
                AdhesionError::Storage(format!(
                    "Company {} in {} has no id",
                    company.tax_id(),
                    self.path.display()
                ))
            })?;
            data.insert(id, company);
        }

        debug!("Loaded {} companies from {}", data.len(), self.path.display());
        Ok(())
    }

    /// Look up a company by its storage id
    pub fn get(&self, id: CompanyId) -> AdhesionResult<Option<Company>> {
        let data = self.data.read().map_err(|e| {
            AdhesionError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    pub fn count(&self) -> AdhesionResult<usize> {
        let data = self.data.read().map_err(|e| {
            AdhesionError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }

    fn persist(&self, data: &HashMap<CompanyId, Company>) -> AdhesionResult<()> {
        let mut companies: Vec<_> = data.values().cloned().collect();
        companies.sort_by(|a, b| a.tax_id().cmp(b.tax_id()));
        write_json_atomic(&self.path, &CompanyData { companies })
    }
}

fn by_name(companies: &mut [Company]) {
    companies.sort_by(|a, b| {
        a.legal_name()
            .to_lowercase()
            .cmp(&b.legal_name().to_lowercase())
            .then_with(|| a.tax_id().cmp(b.tax_id()))
    });
}

impl CompanyRepository for CompanyStore {
    fn save(&self, company: Company) -> AdhesionResult<Company> {
        let company = match company.id() {
            Some(_) => company,
            None => company.with_id(CompanyId::generate()),
        };
        let id = company.id().ok_or_else(|| {
            AdhesionError::Storage("Company id missing after assignment".into())
        })?;

        let mut data = self.data.write().map_err(|e| {
            AdhesionError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if data
            .values()
            .any(|other| other.tax_id() == company.tax_id() && other.id() != Some(id))
        {
            return Err(AdhesionError::duplicate_company(company.tax_id()));
        }

        let previous = data.insert(id, company.clone());
        if let Err(e) = self.persist(&data) {
            match previous {
                Some(previous) => data.insert(id, previous),
                None => data.remove(&id),
            };
            return Err(e);
        }

        debug!("Saved company {} ({})", id, company.tax_id());
        Ok(company)
    }

    fn find_by_tax_id(&self, tax_id: &str) -> AdhesionResult<Option<Company>> {
        let data = self.data.read().map_err(|e| {
            AdhesionError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let tax_id = tax_id.trim();
        Ok(data.values().find(|c| c.tax_id() == tax_id).cloned())
    }

    fn find_by_adhesion_date_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AdhesionResult<Vec<Company>> {
        let data = self.data.read().map_err(|e| {
            AdhesionError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut companies: Vec<_> = data
            .values()
            .filter(|c| {
                c.adhesion_date()
                    .map(|date| date >= start && date <= end)
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        companies.sort_by(|a, b| {
            a.adhesion_date()
                .cmp(&b.adhesion_date())
                .then_with(|| a.tax_id().cmp(b.tax_id()))
        });
        Ok(companies)
    }

    fn find_all(&self) -> AdhesionResult<Vec<Company>> {
        let data = self.data.read().map_err(|e| {
            AdhesionError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut companies: Vec<_> = data.values().cloned().collect();
        by_name(&mut companies);
        Ok(companies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_store() -> (TempDir, CompanyStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = CompanyStore::new(temp_dir.path().join("companies.json"));
        store.load().unwrap();
        (temp_dir, store)
    }

    fn company(tax_id: &str, name: &str, adhered: Option<NaiveDate>) -> Company {
        Company::new(None, tax_id, name, adhered).unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, store) = create_test_store();
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn test_save_assigns_id_and_persists() {
        let (temp_dir, store) = create_test_store();

        let saved = store
            .save(company("20123456789", "Acme S.A.", None))
            .unwrap();
        let id = saved.id().unwrap();

        let reloaded = CompanyStore::new(temp_dir.path().join("companies.json"));
        reloaded.load().unwrap();
        let found = reloaded.get(id).unwrap().unwrap();
        assert_eq!(found, saved);
    }

    #[test]
    fn test_save_existing_updates_in_place() {
        let (_temp_dir, store) = create_test_store();
        let saved = store
            .save(company("20123456789", "Acme", None))
            .unwrap();

        let adhered = saved.adhere_on(date(2024, 2, 10)).unwrap();
        let updated = store.save(adhered).unwrap();

        assert_eq!(updated.id(), saved.id());
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(
            store
                .find_by_tax_id("20123456789")
                .unwrap()
                .unwrap()
                .adhesion_date(),
            Some(date(2024, 2, 10))
        );
    }

    #[test]
    fn test_duplicate_tax_id_rejected() {
        let (_temp_dir, store) = create_test_store();
        store.save(company("20123456789", "Acme", None)).unwrap();

        let err = store
            .save(company("20123456789", "Other", None))
            .unwrap_err();
        assert!(matches!(err, AdhesionError::Duplicate { .. }));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_failed_write_leaves_memory_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = CompanyStore::new(blocker.join("companies.json"));

        let result = store.save(company("20123456789", "Acme", None));

        assert!(result.is_err());
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.find_by_tax_id("20123456789").unwrap().is_none());
    }

    #[test]
    fn test_find_by_tax_id_trims() {
        let (_temp_dir, store) = create_test_store();
        store.save(company("20123456789", "Acme", None)).unwrap();

        assert!(store.find_by_tax_id(" 20123456789 ").unwrap().is_some());
        assert!(store.find_by_tax_id("99999999999").unwrap().is_none());
    }

    #[test]
    fn test_find_by_adhesion_date_between_is_inclusive() {
        let (_temp_dir, store) = create_test_store();
        store
            .save(company("20000000001", "Start", Some(date(2024, 2, 1))))
            .unwrap();
        store
            .save(company("20000000002", "End", Some(date(2024, 2, 29))))
            .unwrap();
        store
            .save(company("20000000003", "Before", Some(date(2024, 1, 31))))
            .unwrap();
        store
            .save(company("20000000004", "After", Some(date(2024, 3, 1))))
            .unwrap();
        store.save(company("20000000005", "Never", None)).unwrap();

        let found = store
            .find_by_adhesion_date_between(date(2024, 2, 1), date(2024, 2, 29))
            .unwrap();
        let tax_ids: Vec<_> = found.iter().map(|c| c.tax_id()).collect();
        assert_eq!(tax_ids, vec!["20000000001", "20000000002"]);
    }

    #[test]
    fn test_find_all_sorted_by_name() {
        let (_temp_dir, store) = create_test_store();
        store.save(company("20000000001", "zeta", None)).unwrap();
        store.save(company("20000000002", "Alpha", None)).unwrap();

        let names: Vec<_> = store
            .find_all()
            .unwrap()
            .iter()
            .map(|c| c.legal_name().to_string())
            .collect();
        assert_eq!(names, vec!["Alpha", "zeta"]);
    }

    #[test]
    fn test_load_rejects_invalid_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("companies.json");
        std::fs::write(
            &path,
            r#"{"companies":[{"id":null,"tax_id":"123","legal_name":"Bad","adhesion_date":null}]}"#,
        )
        .unwrap();

        let store = CompanyStore::new(path);
        assert!(matches!(store.load(), Err(AdhesionError::Storage(_))));
    }

    #[test]
    fn test_load_rejects_record_without_id() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("companies.json");
        std::fs::write(
            &path,
            r#"{"companies":[{"id":null,"tax_id":"20123456789","legal_name":"Acme","adhesion_date":null}]}"#,
        )
        .unwrap();

        let store = CompanyStore::new(path);
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("has no id"));
    }
}
