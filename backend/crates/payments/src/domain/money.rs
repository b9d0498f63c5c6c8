//! Money conversion helpers
//!
//! Fees are stored in rupees as decimals; the gateway deals only in
//! integer paise. The conversion refuses amounts that do not land on a
//! whole paisa so nothing is silently rounded.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{PaymentsError, PaymentsResult};

/// Rupees to paise (1 rupee = 100 paise).
pub fn to_paise(rupees: Decimal) -> PaymentsResult<i64> {
    if rupees <= Decimal::ZERO {
        return Err(PaymentsError::Validation(
            "amount must be positive".to_string(),
        ));
    }

    let paise = rupees * Decimal::from(100);
    if !paise.fract().is_zero() {
        return Err(PaymentsError::Validation(
            "amount has sub-paisa precision".to_string(),
        ));
    }

    paise
        .to_i64()
        .ok_or_else(|| PaymentsError::Validation("amount out of range".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_whole_rupees() {
        assert_eq!(to_paise(Decimal::from(1500)).unwrap(), 150_000);
    }

    #[test]
    fn test_rupees_and_paise() {
        assert_eq!(to_paise(Decimal::new(150050, 2)).unwrap(), 150_050);
    }

    #[test]
    fn test_rejects_sub_paisa() {
        assert!(to_paise(Decimal::new(1500505, 3)).is_err());
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(to_paise(Decimal::ZERO).is_err());
        assert!(to_paise(Decimal::from(-10)).is_err());
    }
}
