//! Transfer store for JSON storage
//!
//! Manages loading and saving transfers to transfers.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;
use log::debug;

use crate::error::{AdhesionError, AdhesionResult};
use crate::models::{CompanyId, Transfer, TransferId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transfer data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub(crate) struct TransferData {
    pub transfers: Vec<Transfer>,
}

/// File-backed transfer store
pub struct TransferStore {
    path: PathBuf,
    data: RwLock<HashMap<TransferId, Transfer>>,
}

/// Oldest first; ties broken by id so listings are stable across loads
fn chronological(transfers: &mut [Transfer]) {
    transfers.sort_by(|a, b| {
        a.transfer_date()
            .cmp(&b.transfer_date())
            .then_with(|| {
                let a_id = a.id().map(|id| *id.as_uuid());
                let b_id = b.id().map(|id| *id.as_uuid());
                a_id.cmp(&b_id)
            })
    });
}

impl TransferStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load transfers from disk, re-validating every record against `today`
    pub fn load(&self, today: NaiveDate) -> AdhesionResult<()> {
        let file_data: TransferData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            AdhesionError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        data.clear();

        for transfer in file_data.transfers {
            let id = transfer.id().ok_or_else(|| {
                AdhesionError::Storage(format!(
                    "Transfer in {} has no id",
                    self.path.display()
                ))
            })?;
            transfer.validate(today).map_err(|e| {
                AdhesionError::Storage(format!("Invalid transfer {} on disk: {}", id, e))
            })?;
            data.insert(id, transfer);
        }

        debug!("Loaded {} transfers from {}", data.len(), self.path.display());
        Ok(())
    }

    /// Insert or replace a transfer, assigning an id when missing
    ///
    /// The in-memory state is restored if the file write fails.
    pub fn upsert(&self, transfer: Transfer) -> AdhesionResult<Transfer> {
        let transfer = match transfer.id() {
            Some(_) => transfer,
            None => transfer.with_id(TransferId::generate()),
        };
        let id = transfer.id().ok_or_else(|| {
            AdhesionError::Storage("Transfer id missing after assignment".into())
        })?;

        let mut data = self.data.write().map_err(|e| {
            AdhesionError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let previous = data.insert(id, transfer.clone());
        if let Err(e) = self.persist(&data) {
            match previous {
                Some(previous) => data.insert(id, previous),
                None => data.remove(&id),
            };
            return Err(e);
        }

        debug!("Saved transfer {} for company {}", id, transfer.company_id());
        Ok(transfer)
    }

    pub fn get_all(&self) -> AdhesionResult<Vec<Transfer>> {
        let data = self.data.read().map_err(|e| {
            AdhesionError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transfers: Vec<_> = data.values().cloned().collect();
        chronological(&mut transfers);
        Ok(transfers)
    }

    pub fn get_by_company(&self, company_id: CompanyId) -> AdhesionResult<Vec<Transfer>> {
        let data = self.data.read().map_err(|e| {
            AdhesionError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transfers: Vec<_> = data
            .values()
            .filter(|t| t.company_id() == company_id)
            .cloned()
            .collect();
        chronological(&mut transfers);
        Ok(transfers)
    }

    /// Transfers dated within `[start, end]`, oldest first
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AdhesionResult<Vec<Transfer>> {
        let data = self.data.read().map_err(|e| {
            AdhesionError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut transfers: Vec<_> = data
            .values()
            .filter(|t| t.transfer_date() >= start && t.transfer_date() <= end)
            .cloned()
            .collect();
        chronological(&mut transfers);
        Ok(transfers)
    }

    pub fn count(&self) -> AdhesionResult<usize> {
        let data = self.data.read().map_err(|e| {
            AdhesionError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }

    fn persist(&self, data: &HashMap<TransferId, Transfer>) -> AdhesionResult<()> {
        let mut transfers: Vec<_> = data.values().cloned().collect();
        chronological(&mut transfers);
        write_json_atomic(&self.path, &TransferData { transfers })
    }
}
