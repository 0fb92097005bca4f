//! JSON export of company reports, with metadata

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AdhesionError, AdhesionResult};
use crate::models::{Company, DateRange};

use super::CompanyRecord;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Which trailing-month report produced the rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Adhered,
    Transfers,
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Adhered => write!(f, "Companies adhered last month"),
            ReportKind::Transfers => write!(f, "Companies with transfers last month"),
        }
    }
}

/// A company report ready for export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyReport {
    pub schema_version: String,

    pub generated_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub report: ReportKind,

    pub period_start: chrono::NaiveDate,

    pub period_end: chrono::NaiveDate,

    pub company_count: usize,

    pub companies: Vec<CompanyRecord>,
}

impl CompanyReport {
    pub fn new(report: ReportKind, period: DateRange, companies: &[Company]) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            report,
            period_start: period.start,
            period_end: period.end,
            company_count: companies.len(),
            companies: companies.iter().map(CompanyRecord::from).collect(),
        }
    }
}

/// Write the report as pretty-printed JSON
pub fn export_report_json<W: Write>(report: &CompanyReport, writer: &mut W) -> AdhesionResult<()> {
    serde_json::to_writer_pretty(&mut *writer, report)
        .map_err(|e| AdhesionError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| AdhesionError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_json_report_shape() {
        let period = DateRange::last_month_from(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        let companies = vec![Company::new(
            None,
            "20123456789",
            "Acme",
            NaiveDate::from_ymd_opt(2024, 2, 10),
        )
        .unwrap()];
        let report = CompanyReport::new(ReportKind::Adhered, period, &companies);

        let mut buffer = Vec::new();
        export_report_json(&report, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["report"], "adhered");
        assert_eq!(value["period_start"], "2024-02-01");
        assert_eq!(value["period_end"], "2024-02-29");
        assert_eq!(value["company_count"], 1);
        assert_eq!(value["companies"][0]["adhesion_date"], "2024-02-10");
    }
}
