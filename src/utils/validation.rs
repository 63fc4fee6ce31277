//! Validation utilities

use bigdecimal::BigDecimal;

use crate::types::*;

/// Validate that a mutation amount is strictly positive
pub fn validate_positive_amount(amount: &BigDecimal) -> LedgerResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(LedgerError::InvalidAmount)
    } else {
        Ok(())
    }
}

/// Validate that an account number is well formed
pub fn validate_account_number(number: &str) -> LedgerResult<()> {
    if number.trim().is_empty() {
        return Err(LedgerError::Validation(
            "account number cannot be empty".to_string(),
        ));
    }

    if number.len() > 30 {
        return Err(LedgerError::Validation(
            "account number cannot exceed 30 characters".to_string(),
        ));
    }

    if !number
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(LedgerError::Validation(
            "account number can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_amounts() {
        assert!(validate_positive_amount(&BigDecimal::from(1)).is_ok());
        assert!(matches!(
            validate_positive_amount(&BigDecimal::from(0)),
            Err(LedgerError::InvalidAmount)
        ));
        assert!(matches!(
            validate_positive_amount(&BigDecimal::from(-5)),
            Err(LedgerError::InvalidAmount)
        ));
    }

    #[test]
    fn rejects_malformed_account_numbers() {
        assert!(validate_account_number("ACC-001").is_ok());
        assert!(validate_account_number("").is_err());
        assert!(validate_account_number("   ").is_err());
        assert!(validate_account_number(&"9".repeat(31)).is_err());
        assert!(validate_account_number("ACC 001").is_err());
    }
}
