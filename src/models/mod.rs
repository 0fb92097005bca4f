//! Core data models for adhesion-cli
//!
//! This module contains the invariant-enforcing entities of the adhesion
//! domain (companies and transfers), their identities, and the trailing-month
//! date range used by the reports.

pub mod company;
pub mod ids;
pub mod range;
pub mod transfer;

pub use company::{AlreadyAdhered, Company, CompanyValidationError};
pub use ids::{CompanyId, TransferId};
pub use range::DateRange;
pub use transfer::{AccountSide, Transfer, TransferValidationError};
