//! Display formatting for terminal output
//!
//! Tables and detail views for companies and transfers.

pub mod company;
pub mod transfer;

pub use company::{format_company_details, format_company_list};
pub use transfer::format_transfer_list;
