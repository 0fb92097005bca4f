//! CLI command handlers
//!
//! This module bridges clap argument parsing with the service layer and
//! maps errors to process exit codes.

pub mod adhere;
pub mod audit;
pub mod company;
pub mod report;
pub mod transfer;

pub use adhere::handle_adhere_command;
pub use audit::handle_audit_command;
pub use company::{handle_company_command, CompanyCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transfer::{handle_transfer_command, TransferCommands};

use crate::error::AdhesionError;

/// Exit status for a command that failed with `err`
pub fn exit_code(err: &AdhesionError) -> i32 {
    match err {
        AdhesionError::InvalidArgument(_) => 2,
        AdhesionError::NotFound { .. } => 3,
        AdhesionError::InvalidState(_) | AdhesionError::Duplicate { .. } => 4,
        _ => 1,
    }
}
