//! YAML export of company reports

use std::io::Write;

use crate::error::{AdhesionError, AdhesionResult};

use super::json::CompanyReport;

/// Write the report as YAML, preceded by a comment header
pub fn export_report_yaml<W: Write>(report: &CompanyReport, writer: &mut W) -> AdhesionResult<()> {
    writeln!(writer, "# {}", report.report).map_err(|e| AdhesionError::Export(e.to_string()))?;
    writeln!(
        writer,
        "# Period: {} to {}",
        report.period_start, report.period_end
    )
    .map_err(|e| AdhesionError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| AdhesionError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, report).map_err(|e| AdhesionError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ReportKind;
    use crate::models::{Company, DateRange};
    use chrono::NaiveDate;

    #[test]
    fn test_yaml_report_round_trips() {
        let period = DateRange::last_month_from(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        let companies = vec![Company::register("20123456789", "Acme").unwrap()];
        let report = CompanyReport::new(ReportKind::Transfers, period, &companies);

        let mut buffer = Vec::new();
        export_report_yaml(&report, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("# Companies with transfers last month\n"));
        assert!(text.contains("# Period: 2024-02-01 to 2024-02-29"));

        let parsed: CompanyReport = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed.report, ReportKind::Transfers);
        assert_eq!(parsed.companies[0].tax_id, "20123456789");
    }
}
