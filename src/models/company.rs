//! Company model
//!
//! A company is identified by its tax id (CUIT) and may be adhered exactly
//! once. Every value of [`Company`] satisfies its invariants: construction,
//! deserialization and every update operation validate before a value is
//! produced, so a half-updated company can never be observed.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CompanyId;

/// Maximum legal name length, in characters
pub const MAX_LEGAL_NAME_CHARS: usize = 255;

static TAX_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{11}$").expect("valid tax id regex"));

/// A company that may enroll into the banking relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCompany")]
pub struct Company {
    id: Option<CompanyId>,
    tax_id: String,
    legal_name: String,
    adhesion_date: Option<NaiveDate>,
}

/// Unvalidated wire shape; every decode goes through [`Company::new`]
#[derive(Deserialize)]
struct RawCompany {
    id: Option<CompanyId>,
    tax_id: String,
    legal_name: String,
    adhesion_date: Option<NaiveDate>,
}

impl TryFrom<RawCompany> for Company {
    type Error = CompanyValidationError;

    fn try_from(raw: RawCompany) -> Result<Self, Self::Error> {
        Company::new(raw.id, &raw.tax_id, raw.legal_name, raw.adhesion_date)
    }
}

impl Company {
    /// Create a validated company
    ///
    /// Rules are checked in a fixed order so the first violation is always
    /// the one reported: blank tax id, tax id format, blank legal name,
    /// legal name length. The tax id is stored trimmed.
    pub fn new(
        id: Option<CompanyId>,
        tax_id: &str,
        legal_name: impl Into<String>,
        adhesion_date: Option<NaiveDate>,
    ) -> Result<Self, CompanyValidationError> {
        let tax_id = validate_tax_id(tax_id)?;
        let legal_name = legal_name.into();
        validate_legal_name(&legal_name)?;

        Ok(Self {
            id,
            tax_id,
            legal_name,
            adhesion_date,
        })
    }

    /// Create a company that has not been persisted or adhered yet
    pub fn register(
        tax_id: &str,
        legal_name: impl Into<String>,
    ) -> Result<Self, CompanyValidationError> {
        Self::new(None, tax_id, legal_name, None)
    }

    pub fn id(&self) -> Option<CompanyId> {
        self.id
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    pub fn legal_name(&self) -> &str {
        &self.legal_name
    }

    pub fn adhesion_date(&self) -> Option<NaiveDate> {
        self.adhesion_date
    }

    /// Returns whether the company has already adhered
    pub fn is_adhered(&self) -> bool {
        self.adhesion_date.is_some()
    }

    /// Adhere today (local calendar date)
    pub fn adhere(&self) -> Result<Self, AlreadyAdhered> {
        self.adhere_on(chrono::Local::now().date_naive())
    }

    /// Adhere on the given date
    ///
    /// Fails without touching the company when it is already adhered; the
    /// error carries the original adhesion date.
    pub fn adhere_on(&self, today: NaiveDate) -> Result<Self, AlreadyAdhered> {
        if let Some(since) = self.adhesion_date {
            return Err(AlreadyAdhered { since });
        }

        Ok(Self {
            adhesion_date: Some(today),
            ..self.clone()
        })
    }

    /// Return a copy with a new tax id, re-validated
    pub fn with_tax_id(&self, tax_id: &str) -> Result<Self, CompanyValidationError> {
        let tax_id = validate_tax_id(tax_id)?;
        Ok(Self {
            tax_id,
            ..self.clone()
        })
    }

    /// Return a copy with a new legal name, re-validated
    pub fn with_legal_name(
        &self,
        legal_name: impl Into<String>,
    ) -> Result<Self, CompanyValidationError> {
        let legal_name = legal_name.into();
        validate_legal_name(&legal_name)?;
        Ok(Self {
            legal_name,
            ..self.clone()
        })
    }

    /// Stamp the storage identity
    pub fn with_id(self, id: CompanyId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.legal_name, self.tax_id)
    }
}

fn validate_tax_id(tax_id: &str) -> Result<String, CompanyValidationError> {
    let trimmed = tax_id.trim();
    if trimmed.is_empty() {
        return Err(CompanyValidationError::BlankTaxId);
    }
    if !TAX_ID_RE.is_match(trimmed) {
        return Err(CompanyValidationError::MalformedTaxId);
    }
    Ok(trimmed.to_string())
}

fn validate_legal_name(legal_name: &str) -> Result<(), CompanyValidationError> {
    if legal_name.trim().is_empty() {
        return Err(CompanyValidationError::BlankLegalName);
    }
    let len = legal_name.chars().count();
    if len > MAX_LEGAL_NAME_CHARS {
        return Err(CompanyValidationError::LegalNameTooLong(len));
    }
    Ok(())
}

/// Validation errors for companies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyValidationError {
    BlankTaxId,
    MalformedTaxId,
    BlankLegalName,
    LegalNameTooLong(usize),
}

impl fmt::Display for CompanyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankTaxId => write!(f, "Tax id cannot be empty"),
            Self::MalformedTaxId => write!(f, "Tax id must have exactly 11 digits"),
            Self::BlankLegalName => write!(f, "Legal name cannot be empty"),
            Self::LegalNameTooLong(len) => write!(
                f,
                "Legal name too long ({} chars, max {})",
                len, MAX_LEGAL_NAME_CHARS
            ),
        }
    }
}

impl std::error::Error for CompanyValidationError {}

/// Raised when adhering a company that is already adhered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlreadyAdhered {
    pub since: NaiveDate,
}

impl fmt::Display for AlreadyAdhered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Company already adhered since {}",
            self.since.format("%Y-%m-%d")
        )
    }
}

impl std::error::Error for AlreadyAdhered {}
