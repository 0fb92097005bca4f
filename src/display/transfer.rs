//! Transfer display formatting

use rust_decimal::Decimal;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{Company, Transfer};

#[derive(Tabled)]
struct TransferRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Debit")]
    debit: String,
    #[tabled(rename = "Credit")]
    credit: String,
}

/// Format a company's transfers as a table with a total line
pub fn format_transfer_list(company: &Company, transfers: &[Transfer], date_format: &str) -> String {
    if transfers.is_empty() {
        return format!("No transfers found for {}.", company);
    }

    let rows = transfers.iter().map(|t| TransferRow {
        date: t.transfer_date().format(date_format).to_string(),
        amount: format!("{:.2}", t.amount()),
        debit: t.debit_account().to_string(),
        credit: t.credit_account().to_string(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .modify(Columns::single(1), Alignment::right());

    let total: Decimal = transfers.iter().map(|t| t.amount()).sum();
    format!(
        "Transfers for {}\n{}\n{} transfers, total {:.2}",
        company,
        table,
        transfers.len(),
        total
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CompanyId;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn company() -> Company {
        Company::register("20123456789", "Acme")
            .unwrap()
            .with_id(CompanyId::generate())
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_transfer_list(&company(), &[], "%Y-%m-%d"),
            "No transfers found for Acme (20123456789)."
        );
    }

    #[test]
    fn test_list_with_total() {
        let company = company();
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let transfers: Vec<_> = ["1000.5", "20"]
            .iter()
            .map(|amount| {
                Transfer::new_as_of(
                    &company,
                    Decimal::from_str(amount).unwrap(),
                    "ACC-1",
                    "ACC-2",
                    NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                    today,
                )
                .unwrap()
            })
            .collect();

        let output = format_transfer_list(&company, &transfers, "%Y-%m-%d");
        assert!(output.contains("1000.50"));
        assert!(output.contains("2024-02-01"));
        assert!(output.ends_with("2 transfers, total 1020.50"));
    }
}
