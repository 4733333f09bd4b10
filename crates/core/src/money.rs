//! Monetary helpers shared by the ledgers.
//!
//! Amounts are `rust_decimal::Decimal` in the shop's currency (rupees).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{DomainError, DomainResult};

/// Reject zero or negative amounts for grants and payments.
pub fn ensure_positive(amount: Decimal, what: &str) -> DomainResult<()> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::validation(format!("{what} must be positive")));
    }
    Ok(())
}

/// Clamp a balance at zero.
pub fn clamp_non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

/// Whole-rupee display string, e.g. `₹1250`.
///
/// Half values round away from zero.
pub fn rupees(amount: Decimal) -> String {
    let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("₹{}", whole.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupees_rounds_half_away_from_zero() {
        assert_eq!(rupees(Decimal::new(125050, 2)), "₹1251");
        assert_eq!(rupees(Decimal::new(6000, 0)), "₹6000");
        assert_eq!(rupees(Decimal::ZERO), "₹0");
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(Decimal::ONE, "amount").is_ok());
        assert!(matches!(
            ensure_positive(Decimal::ZERO, "amount"),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            ensure_positive(Decimal::NEGATIVE_ONE, "payment"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn clamp_non_negative_floors_at_zero() {
        assert_eq!(clamp_non_negative(Decimal::new(-5, 0)), Decimal::ZERO);
        assert_eq!(clamp_non_negative(Decimal::new(5, 0)), Decimal::new(5, 0));
    }
}
