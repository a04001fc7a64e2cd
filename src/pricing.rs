//! Pricing

use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use thiserror::Error;

/// Errors that can occur while presenting an amount.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The currency code is not a known ISO 4217 code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Price of `quantity` units at `price` each.
pub fn line_total(price: Decimal, quantity: u32) -> Decimal {
    price * Decimal::from(quantity)
}

/// Sum of `price × quantity` over every line.
pub fn total_price<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, u32)>,
{
    lines
        .into_iter()
        .map(|(price, quantity)| line_total(price, quantity))
        .sum()
}

/// Format an amount for display in the given ISO currency.
///
/// Totals are kept unrounded everywhere else; this is the only place where
/// currency conventions (symbol, minor units, separators) are applied.
///
/// # Errors
///
/// Returns [`PricingError::UnknownCurrency`] if `currency` is not an ISO code.
pub fn format_amount(amount: Decimal, currency: &str) -> Result<String, PricingError> {
    let currency = iso::find(currency)
        .ok_or_else(|| PricingError::UnknownCurrency(currency.to_string()))?;

    Ok(Money::from_decimal(amount, currency).to_string())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(Decimal::new(1250, 2), 3), Decimal::new(3750, 2));
    }

    #[test]
    fn test_total_price() {
        let lines = [(Decimal::new(1000, 2), 2), (Decimal::new(550, 2), 1)];

        assert_eq!(total_price(lines), Decimal::new(2550, 2));
    }

    #[test]
    fn test_total_price_empty() {
        assert_eq!(total_price([]), Decimal::ZERO);
    }

    #[test]
    fn test_total_price_keeps_sub_minor_precision() {
        let lines = [(Decimal::new(3333, 3), 3)];

        assert_eq!(total_price(lines), Decimal::new(9999, 3));
    }

    #[test]
    fn test_format_amount() -> TestResult {
        let formatted = format_amount(Decimal::new(123_450, 2), "USD")?;

        assert!(
            formatted.contains("1,234.50"),
            "expected grouped amount, got {formatted}"
        );

        Ok(())
    }

    #[test]
    fn test_format_amount_unknown_currency() {
        assert_eq!(
            format_amount(Decimal::ONE, "ZZZ"),
            Err(PricingError::UnknownCurrency("ZZZ".to_string()))
        );
    }
}
