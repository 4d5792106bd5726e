//! Validation utilities

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::types::*;

/// Validate a currency record before it enters a source
pub fn validate_currency(currency: &Currency) -> ReconResult<()> {
    validate_reference(currency.id, "Currency ID")?;
    validate_currency_code(&currency.code)?;

    if currency.name.trim().is_empty() {
        return Err(ReconError::Validation(
            "Currency name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validate that a currency code is usable for lookup and filtering
pub fn validate_currency_code(code: &str) -> ReconResult<()> {
    if code.trim().is_empty() {
        return Err(ReconError::Validation(
            "Currency code cannot be empty".to_string(),
        ));
    }

    if code.len() > 8 {
        return Err(ReconError::Validation(
            "Currency code cannot exceed 8 characters".to_string(),
        ));
    }

    if !code.chars().all(|c| c.is_alphanumeric()) {
        return Err(ReconError::Validation(
            "Currency code can only contain alphanumeric characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate a commitment row before it enters a source
pub fn validate_commitment(commitment: &Commitment) -> ReconResult<()> {
    validate_reference(commitment.id, "Commitment ID")?;
    validate_reference(commitment.project_id, "Project ID")?;
    validate_reference(commitment.client_id, "Client ID")?;
    validate_reference(commitment.currency_id, "Currency ID")?;

    if let Some(amount) = &commitment.committed_amount {
        if *amount < BigDecimal::from(0) {
            return Err(ReconError::Validation(
                "Committed amount cannot be negative".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validate a payment row before it enters a source
pub fn validate_payment(payment: &Payment) -> ReconResult<()> {
    validate_reference(payment.id, "Payment ID")?;
    validate_reference(payment.commitment_id, "Commitment ID")?;
    validate_reference(payment.currency_id, "Currency ID")?;
    Ok(())
}

/// Validate that an entity reference is not the nil UUID
pub fn validate_reference(id: Uuid, field: &str) -> ReconResult<()> {
    if id.is_nil() {
        return Err(ReconError::Validation(format!("{} cannot be nil", field)));
    }
    Ok(())
}

/// Report payments whose commitment reference matches no known commitment.
///
/// Such payments never contribute to any breakdown; listing them supports
/// data-quality audits on a tenant's books.
pub fn find_orphan_payments<'a>(
    payments: &'a [Payment],
    commitments: &[Commitment],
) -> Vec<&'a Payment> {
    payments
        .iter()
        .filter(|p| !commitments.iter().any(|c| c.id == p.commitment_id))
        .collect()
}
