//! Company display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Company;

#[derive(Tabled)]
struct CompanyRow {
    #[tabled(rename = "Tax ID")]
    tax_id: String,
    #[tabled(rename = "Legal Name")]
    legal_name: String,
    #[tabled(rename = "Adhered")]
    adhered: String,
}

/// Format companies as a table, dates rendered with `date_format`
pub fn format_company_list(companies: &[Company], date_format: &str) -> String {
    if companies.is_empty() {
        return "No companies found.".to_string();
    }

    let rows = companies.iter().map(|c| CompanyRow {
        tax_id: c.tax_id().to_string(),
        legal_name: c.legal_name().to_string(),
        adhered: c
            .adhesion_date()
            .map(|d| d.format(date_format).to_string())
            .unwrap_or_else(|| "-".to_string()),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n{} companies", table, companies.len())
}

/// Format a single company's details
pub fn format_company_details(company: &Company, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Company: {}\n", company.legal_name()));
    output.push_str(&format!("  Tax ID:   {}\n", company.tax_id()));
    if let Some(id) = company.id() {
        output.push_str(&format!("  ID:       {}\n", id));
    }
    match company.adhesion_date() {
        Some(date) => output.push_str(&format!("  Adhered:  {}\n", date.format(date_format))),
        None => output.push_str("  Adhered:  not yet\n"),
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_list() {
        assert_eq!(format_company_list(&[], "%Y-%m-%d"), "No companies found.");
    }

    #[test]
    fn test_list_contains_rows() {
        let companies = vec![
            Company::new(None, "20123456789", "Acme", NaiveDate::from_ymd_opt(2024, 2, 10))
                .unwrap(),
            Company::register("30712345678", "Beta").unwrap(),
        ];

        let output = format_company_list(&companies, "%d/%m/%Y");
        assert!(output.contains("Tax ID"));
        assert!(output.contains("20123456789"));
        assert!(output.contains("10/02/2024"));
        assert!(output.ends_with("2 companies"));
    }

    #[test]
    fn test_details_for_pending_company() {
        let company = Company::register("30712345678", "Beta").unwrap();
        let output = format_company_details(&company, "%Y-%m-%d");
        assert!(output.starts_with("Company: Beta\n"));
        assert!(output.contains("not yet"));
        assert!(!output.contains("ID:       "));
    }
}
