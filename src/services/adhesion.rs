//! Adhesion use case
//!
//! Looks a company up by tax id and stamps its adhesion date. Unknown tax
//! ids and repeated adhesions are ordinary outcomes, not faults; only
//! storage failures surface as errors.

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::error::AdhesionResult;
use crate::models::Company;
use crate::ports::CompanyRepository;

/// Result of an adhesion attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdhesionOutcome {
    /// The company was adhered and saved
    Adhered(Company),
    /// No company carries the requested tax id
    NotFound { tax_id: String },
    /// The company was adhered earlier; nothing was saved
    AlreadyAdhered { message: String },
}

/// Service running the adhesion use case against a company repository
pub struct AdhesionService<'a> {
    companies: &'a dyn CompanyRepository,
}

impl<'a> AdhesionService<'a> {
    pub fn new(companies: &'a dyn CompanyRepository) -> Self {
        Self { companies }
    }

    /// Adhere the company with `tax_id` as of the local date
    pub fn adhere(&self, tax_id: &str) -> AdhesionResult<AdhesionOutcome> {
        self.adhere_on(tax_id, chrono::Local::now().date_naive())
    }

    /// Adhere the company with `tax_id`, stamping `today`
    pub fn adhere_on(&self, tax_id: &str, today: NaiveDate) -> AdhesionResult<AdhesionOutcome> {
        info!("Starting adhesion for tax id {}", tax_id);

        let company = match self.companies.find_by_tax_id(tax_id)? {
            Some(company) => company,
            None => {
                warn!("Company with tax id {} not found", tax_id);
                return Ok(AdhesionOutcome::NotFound {
                    tax_id: tax_id.to_string(),
                });
            }
        };
        debug!("Found company {}", company);

        let adhered = match company.adhere_on(today) {
            Ok(adhered) => adhered,
            Err(already) => {
                warn!("Company {} already adhered: {}", tax_id, already);
                return Ok(AdhesionOutcome::AlreadyAdhered {
                    message: already.to_string(),
                });
            }
        };

        let saved = self.companies.save(adhered)?;
        info!("Company {} adhered on {}", tax_id, today);
        Ok(AdhesionOutcome::Adhered(saved))
    }
}
