//! Transfer CLI commands

use chrono::NaiveDate;
use clap::Subcommand;
use rust_decimal::Decimal;

use crate::config::settings::Settings;
use crate::display::format_transfer_list;
use crate::error::AdhesionResult;
use crate::services::TransferService;
use crate::storage::Storage;

/// Transfer subcommands
#[derive(Subcommand)]
pub enum TransferCommands {
    /// Register a transfer for a company
    Register {
        /// Tax id of the owning company
        tax_id: String,
        /// Amount, at most two decimal places (e.g. 1000.50)
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
        /// Debit account
        debit: String,
        /// Credit account
        credit: String,
        /// Transfer date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// List a company's transfers
    List {
        /// Tax id
        tax_id: String,
    },
}

/// Handle a transfer command
pub fn handle_transfer_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransferCommands,
) -> AdhesionResult<()> {
    let service = TransferService::new(storage);

    match cmd {
        TransferCommands::Register {
            tax_id,
            amount,
            debit,
            credit,
            date,
        } => {
            let transfer = service.register(&tax_id, amount, &debit, &credit, date)?;
            println!("Registered transfer: {}", transfer);
        }
        TransferCommands::List { tax_id } => {
            let (company, transfers) = service.list_for_company(&tax_id)?;
            println!(
                "{}",
                format_transfer_list(&company, &transfers, &settings.date_format)
            );
        }
    }

    Ok(())
}
