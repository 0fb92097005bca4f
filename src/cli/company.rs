//! Company CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_company_details, format_company_list};
use crate::error::AdhesionResult;
use crate::services::CompanyService;
use crate::storage::Storage;

/// Company subcommands
#[derive(Subcommand)]
pub enum CompanyCommands {
    /// Register a new company
    Register {
        /// 11-digit tax id (CUIT)
        tax_id: String,
        /// Legal name
        legal_name: String,
    },
    /// Show company details
    Show {
        /// Tax id
        tax_id: String,
    },
    /// List all companies
    List,
    /// Change a company's legal name
    Rename {
        /// Tax id
        tax_id: String,
        /// New legal name
        legal_name: String,
    },
}

/// Handle a company command
pub fn handle_company_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CompanyCommands,
) -> AdhesionResult<()> {
    let service = CompanyService::new(storage);

    match cmd {
        CompanyCommands::Register { tax_id, legal_name } => {
            let company = service.register(&tax_id, &legal_name)?;
            println!("Registered company: {}", company);
        }
        CompanyCommands::Show { tax_id } => {
            let company = service.get(&tax_id)?;
            print!("{}", format_company_details(&company, &settings.date_format));
        }
        CompanyCommands::List => {
            let companies = service.list()?;
            println!("{}", format_company_list(&companies, &settings.date_format));
        }
        CompanyCommands::Rename { tax_id, legal_name } => {
            let company = service.rename(&tax_id, &legal_name)?;
            println!("Renamed company: {}", company);
        }
    }

    Ok(())
}
