//! Audit trail for adhesion-cli
//!
//! Company registrations, renames, adhesions and transfer registrations are
//! appended to a line-delimited JSON log with before/after snapshots.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
