use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use adhesion::cli::{
    exit_code, handle_adhere_command, handle_audit_command, handle_company_command,
    handle_report_command, handle_transfer_command,
};
use adhesion::config::{paths::AdhesionPaths, settings::Settings};
use adhesion::error::AdhesionError;
use adhesion::logging::{init_logging, parse_level};
use adhesion::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "adhesion",
    version,
    about = "Company adhesion tracking and trailing-month reporting",
    long_about = "adhesion-cli registers companies by tax id, records their one-time \
                  adhesion and their transfers, and reports which companies adhered \
                  or moved funds during the previous calendar month."
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Company management commands
    #[command(subcommand)]
    Company(adhesion::cli::CompanyCommands),

    /// Adhere a company by tax id
    Adhere {
        /// 11-digit tax id (CUIT)
        tax_id: String,
    },

    /// Transfer management commands
    #[command(subcommand)]
    Transfer(adhesion::cli::TransferCommands),

    /// Last-month reports
    #[command(subcommand)]
    Report(adhesion::cli::ReportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize data directories and default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        let code = err
            .downcast_ref::<AdhesionError>()
            .map(exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let paths = AdhesionPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        parse_level(&settings.log_level)?
    };
    init_logging(level);

    let mut storage = Storage::new(paths.clone())?;
    storage.set_audit_enabled(settings.audit_enabled);
    storage.load_all()?;

    match cli.command {
        Some(Commands::Company(cmd)) => handle_company_command(&storage, &settings, cmd)?,
        Some(Commands::Adhere { tax_id }) => handle_adhere_command(&storage, &settings, &tax_id)?,
        Some(Commands::Transfer(cmd)) => handle_transfer_command(&storage, &settings, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        Some(Commands::Init) => {
            println!("Initializing adhesion-cli at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Register a company with 'adhesion company register <tax_id> <name>'.");
        }
        Some(Commands::Config) => {
            println!("adhesion-cli Configuration");
            println!("==========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Log level:      {}", settings.log_level);
            println!("  Date format:    {}", settings.date_format);
            println!("  Export format:  {}", settings.export_format);
            println!("  Audit enabled:  {}", settings.audit_enabled);
        }
        None => {
            println!("adhesion-cli - company adhesion tracking");
            println!();
            println!("Run 'adhesion --help' for usage information.");
        }
    }

    Ok(())
}
