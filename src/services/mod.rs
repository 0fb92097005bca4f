//! Service layer for adhesion-cli
//!
//! The adhesion and report use cases depend only on the repository ports;
//! the company and transfer services work against the file-backed
//! [`Storage`](crate::storage::Storage) and record audit entries.

pub mod adhesion;
pub mod company;
pub mod report;
pub mod transfer;

pub use adhesion::{AdhesionOutcome, AdhesionService};
pub use company::CompanyService;
pub use report::ReportService;
pub use transfer::TransferService;
