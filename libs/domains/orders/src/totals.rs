//! Declared-total validation.
//!
//! The order header carries a client-declared total; it must agree with the
//! sum of `price * quantity` over the line items. Comparison allows a fixed
//! absolute tolerance of 0.01, a compatibility constant rather than anything
//! derived from the money scale.

use rust_decimal::Decimal;

use crate::error::{OrderError, OrderResult};
use crate::models::CreateOrderLineItem;

/// Maximum allowed |computed - declared| for validation to pass.
pub fn tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

/// Sum of `price * quantity` over the supplied line items.
pub fn line_total(items: &[CreateOrderLineItem]) -> Decimal {
    items
        .iter()
        .map(|item| item.price * Decimal::from(item.quantity))
        .sum()
}

/// Validate a declared total against the line items.
///
/// Returns the computed total on success so callers that treat it as
/// authoritative don't sum twice. No side effects.
pub fn validate_declared_total(
    items: &[CreateOrderLineItem],
    declared: Decimal,
) -> OrderResult<Decimal> {
    let computed = line_total(items);

    if (computed - declared).abs() > tolerance() {
        return Err(OrderError::TotalMismatch { computed, declared });
    }

    Ok(computed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: &str, quantity: i32) -> CreateOrderLineItem {
        CreateOrderLineItem {
            product_id: 1,
            quantity,
            price: price.parse().unwrap(),
        }
    }

    #[test]
    fn test_matching_total_passes() {
        // 99.99 * 2 + 149.99 = 349.97
        let items = vec![item("99.99", 2), item("149.99", 1)];
        let computed = validate_declared_total(&items, "349.97".parse().unwrap()).unwrap();
        assert_eq!(computed, "349.97".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_mismatched_total_reports_both_values() {
        let items = vec![item("99.99", 2), item("149.99", 1)];
        let err = validate_declared_total(&items, "350.50".parse().unwrap()).unwrap_err();

        match err {
            OrderError::TotalMismatch { computed, declared } => {
                assert_eq!(computed, "349.97".parse::<Decimal>().unwrap());
                assert_eq!(declared, "350.50".parse::<Decimal>().unwrap());
            }
            other => panic!("expected TotalMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_difference_of_exactly_tolerance_passes() {
        let items = vec![item("10.00", 1)];
        assert!(validate_declared_total(&items, "10.01".parse().unwrap()).is_ok());
        assert!(validate_declared_total(&items, "9.99".parse().unwrap()).is_ok());
    }

    #[test]
    fn test_difference_just_beyond_tolerance_fails() {
        let items = vec![item("10.00", 1)];
        assert!(validate_declared_total(&items, "10.011".parse().unwrap()).is_err());
        assert!(validate_declared_total(&items, "9.989".parse().unwrap()).is_err());
    }

    #[test]
    fn test_empty_item_set_sums_to_zero() {
        assert_eq!(line_total(&[]), Decimal::ZERO);
    }
}
