//! adhesion-cli - company adhesion tracking and trailing-month reporting
//!
//! Companies enroll ("adhere") once, identified by their 11-digit tax id.
//! Transfers are recorded against registered companies, and two reports
//! list the companies that adhered, or moved funds, during the previous
//! calendar month.
//!
//! # Architecture
//!
//! - `models`: validated entities (`Company`, `Transfer`) and `DateRange`
//! - `ports`: repository traits the use cases depend on
//! - `services`: the adhesion and report use cases plus management services
//! - `storage`: JSON file stores implementing the ports
//! - `config`: paths and user settings
//! - `audit`: append-only audit log
//! - `logging`: diagnostic logger setup
//! - `display` / `export`: terminal tables and CSV/JSON/YAML output
//! - `cli`: command handlers for the `adhesion` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use adhesion::config::paths::AdhesionPaths;
//! use adhesion::services::{AdhesionOutcome, AdhesionService};
//! use adhesion::storage::Storage;
//!
//! let storage = Storage::new(AdhesionPaths::new()?)?;
//! storage.load_all()?;
//! match AdhesionService::new(&storage.companies).adhere("20123456789")? {
//!     AdhesionOutcome::Adhered(company) => println!("{}", company),
//!     other => eprintln!("{:?}", other),
//! }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod ports;
pub mod services;
pub mod storage;

pub use error::{AdhesionError, AdhesionResult};
