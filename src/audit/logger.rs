//! Append-only JSONL sink for audit entries
//!
//! One entry per line. Nothing is ever rewritten, so a damaged line only
//! affects reads, and reads report its line number.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{AdhesionError, AdhesionResult};

use super::entry::AuditEntry;

/// Audit trail stored at a single file path
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append `entry` and flush before returning
    pub fn log(&self, entry: &AuditEntry) -> AdhesionResult<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| AdhesionError::Json(format!("Audit entry not encodable: {}", e)))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| self.io_error("open", e))?;

        writeln!(file, "{}", line)
            .and_then(|_| file.flush())
            .map_err(|e| self.io_error("append to", e))
    }

    /// Every recorded entry, oldest first; an absent log reads as empty
    pub fn read_all(&self) -> AdhesionResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path).map_err(|e| self.io_error("open", e))?;

        let mut entries = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|e| self.io_error(&format!("read line {} of", line_no), e))?;
            if line.trim().is_empty() {
                continue;
            }
            entries.push(serde_json::from_str(&line).map_err(|e| {
                AdhesionError::Json(format!("Audit log line {} is malformed: {}", line_no, e))
            })?);
        }

        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> AdhesionResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let skip = entries.len().saturating_sub(count);
        Ok(entries.split_off(skip))
    }

    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }

    fn io_error(&self, action: &str, cause: std::io::Error) -> AdhesionError {
        AdhesionError::Io(format!(
            "Cannot {} audit log {}: {}",
            action,
            self.log_path.display(),
            cause
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::EntityType;
    use serde_json::json;
    use tempfile::TempDir;

    fn logger() -> (TempDir, AuditLogger) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (temp_dir, logger)
    }

    #[test]
    fn test_missing_log_reads_empty() {
        let (_temp_dir, logger) = logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert!(!logger.path().exists());
    }

    #[test]
    fn test_log_and_read_back() {
        let (_temp_dir, logger) = logger();
        let entry = AuditEntry::create(
            EntityType::Company,
            "cmp-1",
            Some("Acme".into()),
            &json!({"tax_id": "20123456789"}),
        );

        logger.log(&entry).unwrap();
        logger.log(&entry).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entity_id, "cmp-1");
    }

    #[test]
    fn test_read_recent_returns_tail() {
        let (_temp_dir, logger) = logger();
        for i in 0..5 {
            let entry =
                AuditEntry::create(EntityType::Transfer, format!("trf-{}", i), None, &json!({}));
            logger.log(&entry).unwrap();
        }

        let recent = logger.read_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].entity_id, "trf-3");
        assert_eq!(recent[1].entity_id, "trf-4");

        assert_eq!(logger.read_recent(50).unwrap().len(), 5);
    }

    #[test]
    fn test_corrupt_line_reports_line_number() {
        let (_temp_dir, logger) = logger();
        std::fs::write(logger.path(), "\nnot json\n").unwrap();

        let err = logger.read_all().unwrap_err();
        assert!(err.to_string().contains("line 2 is malformed"));
    }

    #[test]
    fn test_unwritable_log_is_io_error() {
        let (_temp_dir, logger) = logger();
        std::fs::create_dir(logger.path()).unwrap();

        let entry = AuditEntry::create(EntityType::Company, "cmp-1", None, &json!({}));
        let err = logger.log(&entry).unwrap_err();
        assert!(matches!(err, AdhesionError::Io(_)));
    }
}
