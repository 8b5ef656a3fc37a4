//! Money types
//!
//! Domain primitives for unit prices and accumulated revenue. Amounts are
//! exact decimals so that summation order never changes a report.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

/// Decimal places used whenever money is rendered in a report
pub const REPORT_SCALE: u32 = 2;

/// Errors that can occur when building or accumulating money values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("Price must not be negative (got {0})")]
    Negative(Decimal),

    #[error("Amount exceeds the representable decimal range")]
    Overflow,

    #[error("Invalid amount format: {0}")]
    ParseError(String),
}

/// Unit price of a catalog product.
///
/// # Invariants
/// - Value is zero or positive
/// - Any number of fractional digits the decimal type can hold
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use sales_report::domain::Price;
///
/// let price: Price = "10.005".parse().unwrap();
/// assert_eq!(price.value(), Decimal::new(10005, 3));
/// assert_eq!(price.to_string(), "10.01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(MoneyError::Negative(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, or `Overflow` if it leaves the decimal range
    pub fn times(&self, quantity: u64) -> Result<Decimal, MoneyError> {
        self.0
            .checked_mul(Decimal::from(quantity))
            .ok_or(MoneyError::Overflow)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_report_string(self.0))
    }
}

impl FromStr for Price {
    type Err = MoneyError;

    /// Accepts plain decimals (`45.1234`) and scientific notation (`1.5E2`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // rust_decimal reads `_` as a digit separator
        if s.contains('_') {
            return Err(MoneyError::ParseError(format!("invalid decimal: {s:?}")));
        }
        let decimal = Decimal::from_str(s)
            .or_else(|_| Decimal::from_scientific(s))
            .map_err(|e| MoneyError::ParseError(e.to_string()))?;
        Price::new(decimal)
    }
}

/// Running revenue total for one salesperson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Revenue(Decimal);

impl Revenue {
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Add `quantity` units at `price`, leaving `self` untouched on overflow
    pub fn credit(&mut self, price: &Price, quantity: u64) -> Result<(), MoneyError> {
        let line_total = price.times(quantity)?;
        self.0 = self.0.checked_add(line_total).ok_or(MoneyError::Overflow)?;
        Ok(())
    }
}

impl fmt::Display for Revenue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_report_string(self.0))
    }
}

/// Render with exactly two fractional digits, rounding half away from zero
pub fn to_report_string(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(REPORT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_zero_allowed() {
        let price = Price::new(Decimal::ZERO);
        assert!(price.is_ok());
    }

    #[test]
    fn test_price_negative_rejected() {
        let price = Price::new(Decimal::new(-1, 2));
        assert!(matches!(price, Err(MoneyError::Negative(_))));
    }

    #[test]
    fn test_price_from_str_long_fraction() {
        let price: Price = "45.12345678901234".parse().unwrap();
        assert_eq!(price.value(), Decimal::from_str("45.12345678901234").unwrap());
        assert_eq!(price.to_string(), "45.12");
    }

    #[test]
    fn test_price_from_scientific() {
        let price: Price = "1.5E2".parse().unwrap();
        assert_eq!(price.value(), Decimal::new(150, 0));
    }

    #[test]
    fn test_price_rejects_embedded_space() {
        let price = "12 .5".parse::<Price>();
        assert!(matches!(price, Err(MoneyError::ParseError(_))));
    }

    #[test]
    fn test_price_rejects_digit_separator() {
        assert!(matches!(Price::from_str("1_0.5"), Err(MoneyError::ParseError(_))));
        assert!(matches!(Price::from_str("1e1_0"), Err(MoneyError::ParseError(_))));
    }

    #[test]
    fn test_revenue_credit() {
        let mut revenue = Revenue::zero();
        let price = Price::new(Decimal::new(1000, 2)).unwrap();

        revenue.credit(&price, 3).unwrap();
        revenue.credit(&price, 2).unwrap();

        assert_eq!(revenue.value(), Decimal::new(50, 0));
        assert_eq!(revenue.to_string(), "50.00");
    }

    #[test]
    fn test_revenue_overflow_keeps_total() {
        let mut revenue = Revenue::zero();
        let price = Price::new(Decimal::MAX).unwrap();

        revenue.credit(&price, 1).unwrap();
        let result = revenue.credit(&price, 1);

        assert!(matches!(result, Err(MoneyError::Overflow)));
        assert_eq!(revenue.value(), Decimal::MAX);
    }

    #[test]
    fn test_report_string_rounds_half_up() {
        assert_eq!(to_report_string(Decimal::new(1005, 3)), "1.01");
        assert_eq!(to_report_string(Decimal::new(1004, 3)), "1.00");
        assert_eq!(to_report_string(Decimal::new(7, 0)), "7.00");
        assert_eq!(to_report_string(Decimal::ZERO), "0.00");
    }
}
