//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are stored and serialized as `f64`; every sum, product and
//! comparison goes through `Decimal` and is rounded half-up to cents.

use crate::utils::AppError;
use rust_decimal::prelude::*;
use shared::error::ErrorCode;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per item
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i64 = 9999;
/// Maximum allowed payment amount
pub const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a unit price (menu price or order line price)
pub fn validate_price(value: f64, field_name: &str) -> Result<(), AppError> {
    require_finite(value, field_name)?;
    if value < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::MenuInvalidPrice,
            format!("{} must be non-negative, got {}", field_name, value),
        ));
    }
    if value > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::MenuInvalidPrice,
            format!(
                "{} exceeds maximum allowed ({}), got {}",
                field_name, MAX_PRICE, value
            ),
        ));
    }
    Ok(())
}

/// Validate a line quantity
pub fn validate_quantity(quantity: i64) -> Result<(), AppError> {
    if quantity <= 0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("quantity must be positive, got {}", quantity),
        ));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!(
                "quantity exceeds maximum allowed ({}), got {}",
                MAX_QUANTITY, quantity
            ),
        ));
    }
    Ok(())
}

/// Validate a payment or bill amount
pub fn validate_amount(value: f64, field_name: &str) -> Result<(), AppError> {
    require_finite(value, field_name)?;
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{} must be non-negative, got {}",
            field_name, value
        )));
    }
    if value > MAX_PAYMENT_AMOUNT {
        return Err(AppError::validation(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field_name, MAX_PAYMENT_AMOUNT, value
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round(value).to_f64().unwrap_or_default()
}

#[inline]
fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a stored amount to cents
pub fn round_money(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// `price * quantity`, rounded to cents
pub fn line_total(price: f64, quantity: i64) -> f64 {
    to_f64(to_decimal(price) * Decimal::from(quantity))
}

/// Sum of `(price, quantity)` lines, rounded once at the end
pub fn order_total<I>(lines: I) -> f64
where
    I: IntoIterator<Item = (f64, i64)>,
{
    let total: Decimal = lines
        .into_iter()
        .map(|(price, quantity)| to_decimal(price) * Decimal::from(quantity))
        .sum();
    to_f64(total)
}

/// Sum already-rounded amounts
pub fn sum_amounts<I>(amounts: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let total: Decimal = amounts.into_iter().map(to_decimal).sum();
    to_f64(total)
}

/// Whether `received` covers `required`, compared at cent precision
pub fn is_payment_sufficient(received: f64, required: f64) -> bool {
    round(to_decimal(received)) >= round(to_decimal(required))
}

/// Change to hand back; never negative
pub fn change_due(received: f64, required: f64) -> f64 {
    let change = round(to_decimal(received)) - round(to_decimal(required));
    to_f64(change.max(Decimal::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_decimal_precision() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        assert_eq!(sum_amounts([0.1, 0.2]), 0.3);
    }

    #[test]
    fn test_line_and_order_totals() {
        assert_eq!(line_total(19.99, 3), 59.97);
        assert_eq!(order_total([(19.99, 3), (0.1, 7), (45.0, 1)]), 105.67);
        assert_eq!(order_total(std::iter::empty()), 0.0);
    }

    #[test]
    fn test_half_up_rounding() {
        assert_eq!(round_money(2.345), 2.35);
        assert_eq!(round_money(2.344), 2.34);
    }

    #[test]
    fn test_payment_sufficiency_and_change() {
        assert!(is_payment_sufficient(100.0, 99.99));
        assert!(is_payment_sufficient(99.99, 99.99));
        assert!(!is_payment_sufficient(99.98, 99.99));
        assert_eq!(change_due(100.0, 87.35), 12.65);
        assert_eq!(change_due(50.0, 87.35), 0.0);
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(0.0, "price").is_ok());
        assert!(validate_price(12.5, "price").is_ok());
        assert_eq!(
            validate_price(-1.0, "price").unwrap_err().code,
            ErrorCode::MenuInvalidPrice
        );
        assert!(validate_price(f64::NAN, "price").is_err());
        assert!(validate_price(MAX_PRICE + 1.0, "price").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(10.0, "received_amount").is_ok());
        assert!(validate_amount(f64::INFINITY, "received_amount").is_err());
        assert!(validate_amount(-0.5, "received_amount").is_err());
    }
}
