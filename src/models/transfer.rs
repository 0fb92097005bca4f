//! Transfer model
//!
//! A transfer moves funds between two accounts on behalf of a company. It
//! refers to its company by id only; the company is looked up through the
//! repository when needed.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::company::Company;
use super::ids::{CompanyId, TransferId};

/// Maximum account identifier length (IBAN length bound)
pub const MAX_ACCOUNT_CHARS: usize = 34;

/// Maximum number of fractional digits in an amount
pub const MAX_AMOUNT_SCALE: u32 = 2;

/// A funds transfer between two accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    id: Option<TransferId>,
    company_id: CompanyId,
    amount: Decimal,
    debit_account: String,
    credit_account: String,
    transfer_date: NaiveDate,
}

impl Transfer {
    /// Create a validated transfer dated no later than today
    pub fn new(
        company: &Company,
        amount: Decimal,
        debit_account: impl Into<String>,
        credit_account: impl Into<String>,
        transfer_date: NaiveDate,
    ) -> Result<Self, TransferValidationError> {
        Self::new_as_of(
            company,
            amount,
            debit_account,
            credit_account,
            transfer_date,
            chrono::Local::now().date_naive(),
        )
    }

    /// Create a validated transfer, judging future dates against `today`
    ///
    /// Rules are checked in order: company identity, amount sign, amount
    /// scale, debit account, credit account, account distinctness, date.
    pub fn new_as_of(
        company: &Company,
        amount: Decimal,
        debit_account: impl Into<String>,
        credit_account: impl Into<String>,
        transfer_date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self, TransferValidationError> {
        let company_id = company
            .id()
            .ok_or(TransferValidationError::UnpersistedCompany)?;
        let transfer = Self {
            id: None,
            company_id,
            amount,
            debit_account: debit_account.into(),
            credit_account: credit_account.into(),
            transfer_date,
        };
        transfer.validate(today)?;
        Ok(transfer)
    }

    pub fn id(&self) -> Option<TransferId> {
        self.id
    }

    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn debit_account(&self) -> &str {
        &self.debit_account
    }

    pub fn credit_account(&self) -> &str {
        &self.credit_account
    }

    pub fn transfer_date(&self) -> NaiveDate {
        self.transfer_date
    }

    /// Validate every rule against the given date
    pub fn validate(&self, today: NaiveDate) -> Result<(), TransferValidationError> {
        validate_amount(self.amount)?;
        validate_accounts(&self.debit_account, &self.credit_account)?;
        validate_transfer_date(self.transfer_date, today)
    }

    /// Return a copy owned by another persisted company
    pub fn with_company(&self, company: &Company) -> Result<Self, TransferValidationError> {
        let company_id = company
            .id()
            .ok_or(TransferValidationError::UnpersistedCompany)?;
        Ok(Self {
            company_id,
            ..self.clone()
        })
    }

    /// Return a copy with a new amount, re-validated
    pub fn with_amount(&self, amount: Decimal) -> Result<Self, TransferValidationError> {
        validate_amount(amount)?;
        Ok(Self {
            amount,
            ..self.clone()
        })
    }

    /// Return a copy with a new debit account
    ///
    /// Distinctness against the credit account is re-checked.
    pub fn with_debit_account(
        &self,
        debit_account: impl Into<String>,
    ) -> Result<Self, TransferValidationError> {
        let debit_account = debit_account.into();
        validate_accounts(&debit_account, &self.credit_account)?;
        Ok(Self {
            debit_account,
            ..self.clone()
        })
    }

    /// Return a copy with a new credit account
    ///
    /// Distinctness against the debit account is re-checked.
    pub fn with_credit_account(
        &self,
        credit_account: impl Into<String>,
    ) -> Result<Self, TransferValidationError> {
        let credit_account = credit_account.into();
        validate_accounts(&self.debit_account, &credit_account)?;
        Ok(Self {
            credit_account,
            ..self.clone()
        })
    }

    /// Return a copy with a new transfer date, judged against today
    pub fn with_transfer_date(
        &self,
        transfer_date: NaiveDate,
    ) -> Result<Self, TransferValidationError> {
        validate_transfer_date(transfer_date, chrono::Local::now().date_naive())?;
        Ok(Self {
            transfer_date,
            ..self.clone()
        })
    }

    /// Stamp the storage identity
    pub fn with_id(self, id: TransferId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} -> {}",
            self.transfer_date.format("%Y-%m-%d"),
            self.amount,
            self.debit_account,
            self.credit_account
        )
    }
}

fn validate_amount(amount: Decimal) -> Result<(), TransferValidationError> {
    if amount <= Decimal::ZERO {
        return Err(TransferValidationError::NonPositiveAmount(amount));
    }
    if amount.scale() > MAX_AMOUNT_SCALE {
        return Err(TransferValidationError::AmountScale(amount.scale()));
    }
    Ok(())
}

fn validate_accounts(debit: &str, credit: &str) -> Result<(), TransferValidationError> {
    validate_account(debit, AccountSide::Debit)?;
    validate_account(credit, AccountSide::Credit)?;
    if debit == credit {
        return Err(TransferValidationError::SameAccount);
    }
    Ok(())
}

fn validate_account(account: &str, side: AccountSide) -> Result<(), TransferValidationError> {
    if account.trim().is_empty() {
        return Err(TransferValidationError::BlankAccount(side));
    }
    let len = account.chars().count();
    if len > MAX_ACCOUNT_CHARS {
        return Err(TransferValidationError::AccountTooLong(side, len));
    }
    Ok(())
}

fn validate_transfer_date(
    transfer_date: NaiveDate,
    today: NaiveDate,
) -> Result<(), TransferValidationError> {
    if transfer_date > today {
        return Err(TransferValidationError::FutureDate(transfer_date));
    }
    Ok(())
}

/// Which side of the transfer an account sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSide {
    Debit,
    Credit,
}

impl fmt::Display for AccountSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => write!(f, "Debit"),
            Self::Credit => write!(f, "Credit"),
        }
    }
}

/// Validation errors for transfers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferValidationError {
    UnpersistedCompany,
    NonPositiveAmount(Decimal),
    AmountScale(u32),
    BlankAccount(AccountSide),
    AccountTooLong(AccountSide, usize),
    SameAccount,
    FutureDate(NaiveDate),
}

impl fmt::Display for TransferValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnpersistedCompany => {
                write!(f, "Transfer must reference a registered company")
            }
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::AmountScale(scale) => write!(
                f,
                "Amount cannot have more than {} decimal places (got {})",
                MAX_AMOUNT_SCALE, scale
            ),
            Self::BlankAccount(side) => write!(f, "{} account cannot be empty", side),
            Self::AccountTooLong(side, len) => write!(
                f,
                "{} account too long ({} chars, max {})",
                side, len, MAX_ACCOUNT_CHARS
            ),
            Self::SameAccount => write!(f, "Debit and credit accounts must be different"),
            Self::FutureDate(date) => write!(
                f,
                "Transfer date cannot be in the future ({})",
                date.format("%Y-%m-%d")
            ),
        }
    }
}

impl std::error::Error for TransferValidationError {}
