//! CSV export of company rows

use std::io::Write;

use crate::error::{AdhesionError, AdhesionResult};
use crate::models::Company;

use super::CompanyRecord;

/// Write companies as CSV with a header row
pub fn export_companies_csv<W: Write>(companies: &[Company], writer: W) -> AdhesionResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    if companies.is_empty() {
        csv_writer
            .write_record(["id", "tax_id", "legal_name", "adhesion_date"])
            .map_err(|e| AdhesionError::Export(e.to_string()))?;
    }

    for company in companies {
        csv_writer
            .serialize(CompanyRecord::from(company))
            .map_err(|e| AdhesionError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| AdhesionError::Export(e.to_string()))?;
    Ok(())
}
