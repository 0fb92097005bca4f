//! Report export for adhesion-cli
//!
//! Company reports can be rendered in several formats:
//! - Table: terminal output (see [`crate::display`])
//! - CSV: one row per company (spreadsheet-compatible)
//! - JSON / YAML: the rows plus report metadata

pub mod csv;
pub mod json;
pub mod yaml;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Company;

pub use self::csv::export_companies_csv;
pub use json::{export_report_json, CompanyReport, ReportKind, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Table,
    Csv,
    Json,
    Yaml,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Table => write!(f, "table"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Flat, serializable view of a company
///
/// `id` is the full uuid so exported rows can be matched back to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub id: String,
    pub tax_id: String,
    pub legal_name: String,
    pub adhesion_date: Option<NaiveDate>,
}

impl From<&Company> for CompanyRecord {
    fn from(company: &Company) -> Self {
        Self {
            id: company
                .id()
                .map(|id| id.as_uuid().to_string())
                .unwrap_or_default(),
            tax_id: company.tax_id().to_string(),
            legal_name: company.legal_name().to_string(),
            adhesion_date: company.adhesion_date(),
        }
    }
}
