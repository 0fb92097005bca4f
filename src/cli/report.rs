//! Report CLI commands

use std::io::Write;

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_company_list;
use crate::error::{AdhesionError, AdhesionResult};
use crate::export::{
    export_companies_csv, export_report_json, export_report_yaml, CompanyReport, ExportFormat,
    ReportKind,
};
use crate::models::{Company, DateRange};
use crate::services::ReportService;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Companies adhered during the previous calendar month
    Adhered {
        /// Output format (defaults to the configured export format)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
    },
    /// Companies with transfers during the previous calendar month
    Transfers {
        /// Output format (defaults to the configured export format)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> AdhesionResult<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_report(
        storage,
        settings,
        cmd,
        chrono::Local::now().date_naive(),
        &mut out,
    )
}

/// Query and print a report; `today` fixes both the queried and printed period
fn run_report<W: Write>(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
    today: NaiveDate,
    out: &mut W,
) -> AdhesionResult<()> {
    let service = ReportService::new(&storage.companies, storage);
    let period = DateRange::last_month_from(today);

    let (kind, format, companies) = match cmd {
        ReportCommands::Adhered { format } => (
            ReportKind::Adhered,
            format,
            service.companies_adhered_last_month_as_of(today)?,
        ),
        ReportCommands::Transfers { format } => (
            ReportKind::Transfers,
            format,
            service.companies_with_transfers_last_month_as_of(today)?,
        ),
    };

    write_report(
        out,
        kind,
        period,
        &companies,
        format.unwrap_or(settings.export_format),
        &settings.date_format,
    )
}

fn write_report<W: Write>(
    out: &mut W,
    kind: ReportKind,
    period: DateRange,
    companies: &[Company],
    format: ExportFormat,
    date_format: &str,
) -> AdhesionResult<()> {
    match format {
        ExportFormat::Table => {
            writeln!(out, "{} ({})", kind, period)
                .and_then(|_| writeln!(out, "{}", format_company_list(companies, date_format)))
                .map_err(|e| AdhesionError::Export(e.to_string()))
        }
        ExportFormat::Csv => export_companies_csv(companies, out),
        ExportFormat::Json => export_report_json(&CompanyReport::new(kind, period, companies), out),
        ExportFormat::Yaml => export_report_yaml(&CompanyReport::new(kind, period, companies), out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AdhesionPaths;
    use crate::ports::CompanyRepository;
    use tempfile::TempDir;

    fn render(format: ExportFormat, companies: &[Company]) -> String {
        let period = DateRange::last_month_from(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        let mut buffer = Vec::new();
        write_report(
            &mut buffer,
            ReportKind::Adhered,
            period,
            companies,
            format,
            "%Y-%m-%d",
        )
        .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_table_report_with_no_companies() {
        let output = render(ExportFormat::Table, &[]);
        assert_eq!(
            output,
            "Companies adhered last month (2024-02-01 to 2024-02-29)\nNo companies found.\n"
        );
    }

    #[test]
    fn test_json_report_is_parseable() {
        let companies = vec![Company::register("20123456789", "Acme").unwrap()];
        let value: serde_json::Value =
            serde_json::from_str(&render(ExportFormat::Json, &companies)).unwrap();
        assert_eq!(value["company_count"], 1);
    }

    #[test]
    fn test_csv_report_has_header() {
        assert!(render(ExportFormat::Csv, &[]).starts_with("id,tax_id"));
    }

    fn adhered_json(storage: &Storage, today: NaiveDate) -> serde_json::Value {
        let mut buffer = Vec::new();
        run_report(
            storage,
            &Settings::default(),
            ReportCommands::Adhered {
                format: Some(ExportFormat::Json),
            },
            today,
            &mut buffer,
        )
        .unwrap();
        serde_json::from_slice(&buffer).unwrap()
    }

    #[test]
    fn test_printed_period_matches_queried_period() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::new(AdhesionPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        storage.load_all().unwrap();
        storage
            .companies
            .save(
                Company::new(
                    None,
                    "20123456789",
                    "Acme",
                    NaiveDate::from_ymd_opt(2024, 2, 29),
                )
                .unwrap(),
            )
            .unwrap();

        let march_first = adhered_json(&storage, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(march_first["period_start"], "2024-02-01");
        assert_eq!(march_first["period_end"], "2024-02-29");
        assert_eq!(march_first["company_count"], 1);

        let april_first = adhered_json(&storage, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(april_first["period_start"], "2024-03-01");
        assert_eq!(april_first["company_count"], 0);
    }
}
