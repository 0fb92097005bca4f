//! Audit log CLI command

use crate::audit::AuditLogger;
use crate::error::AdhesionResult;
use crate::storage::Storage;

/// Handle `audit [--limit N]`
pub fn handle_audit_command(storage: &Storage, limit: usize) -> AdhesionResult<()> {
    let logger = AuditLogger::new(storage.paths().audit_log());
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
