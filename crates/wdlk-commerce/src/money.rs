//! Price amounts and their display formatting.
//!
//! The backend sends amounts as decimal strings ("1299.90"). They are parsed
//! into an integer count of minor units so rounding happens exactly once,
//! at the display precision.

use serde::{Deserialize, Serialize};
use std::fmt;
use wdlk_core::CurrencyConfig;

use crate::error::CommerceError;

/// A monetary amount in minor units at a fixed precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in units of `10^-precision`.
    pub amount_minor: i64,
    /// Number of decimal digits carried.
    pub precision: u32,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, precision: u32) -> Self {
        Self {
            amount_minor,
            precision,
        }
    }

    /// Parse a decimal string, rounding half away from zero to `precision`.
    ///
    /// ```
    /// use wdlk_commerce::Money;
    /// let price = Money::parse("49.995", 2).unwrap();
    /// assert_eq!(price.amount_minor, 5000);
    /// ```
    pub fn parse(value: &str, precision: u32) -> Result<Self, CommerceError> {
        let invalid = || CommerceError::InvalidAmount(value.to_string());

        let trimmed = value.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction)
        {
            return Err(invalid());
        }

        let scale = 10_i64
            .checked_pow(precision)
            .ok_or(CommerceError::Overflow)?;

        let mut whole_units: i64 = 0;
        for digit in whole.bytes() {
            whole_units = whole_units
                .checked_mul(10)
                .and_then(|v| v.checked_add((digit - b'0') as i64))
                .ok_or(CommerceError::Overflow)?;
        }

        let digits = fraction.as_bytes();
        let mut fraction_units: i64 = 0;
        for i in 0..precision as usize {
            let digit = digits.get(i).map(|d| (d - b'0') as i64).unwrap_or(0);
            fraction_units = fraction_units * 10 + digit;
        }
        let round_up = digits
            .get(precision as usize)
            .is_some_and(|d| *d >= b'5');

        let mut amount = whole_units
            .checked_mul(scale)
            .and_then(|a| a.checked_add(fraction_units))
            .ok_or(CommerceError::Overflow)?;
        if round_up {
            amount = amount.checked_add(1).ok_or(CommerceError::Overflow)?;
        }

        Ok(Self::new(if negative { -amount } else { amount }, precision))
    }

    /// Create a zero amount.
    pub fn zero(precision: u32) -> Self {
        Self::new(0, precision)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Format using the decimal mark, group separator and symbol of `config`.
    ///
    /// The amount is shown at its own precision; parse at the configured
    /// precision to display with it.
    pub fn format(&self, config: &CurrencyConfig) -> String {
        let scale = 10_u64.checked_pow(self.precision).unwrap_or(u64::MAX);
        let abs = self.amount_minor.unsigned_abs();
        let whole = abs / scale;
        let fraction = abs % scale;

        let mut out = String::new();
        if self.is_negative() {
            out.push('-');
        }
        out.push_str(&config.symbol);
        out.push_str(&group_thousands(whole, config.separator));
        if self.precision > 0 {
            out.push(config.decimal);
            out.push_str(&format!(
                "{:0width$}",
                fraction,
                width = self.precision as usize
            ));
        }
        out
    }

    /// Add another amount at the same precision.
    pub fn checked_add(&self, other: &Money) -> Result<Money, CommerceError> {
        if self.precision != other.precision {
            return Err(CommerceError::InvalidAmount(format!(
                "precision mismatch: {} vs {}",
                self.precision, other.precision
            )));
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.precision))
            .ok_or(CommerceError::Overflow)
    }

    /// Multiply by a quantity.
    pub fn checked_mul(&self, factor: i64) -> Result<Money, CommerceError> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.precision))
            .ok_or(CommerceError::Overflow)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(&CurrencyConfig::default()))
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Format a decimal amount string for display.
///
/// ```
/// use wdlk_commerce::format_currency;
/// use wdlk_core::CurrencyConfig;
///
/// assert_eq!(format_currency("1299.9", &CurrencyConfig::default()).unwrap(), "1,299.90");
/// assert_eq!(format_currency("1299.9", &CurrencyConfig::euro()).unwrap(), "€1.299,90");
/// ```
pub fn format_currency(value: &str, config: &CurrencyConfig) -> Result<String, CommerceError> {
    Ok(Money::parse(value, config.precision)?.format(config))
}

/// A backend price: decimal amount string plus ISO currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub amount: String,
    pub currency_code: String,
}

impl Price {
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    /// Parse the amount at `precision`.
    pub fn money(&self, precision: u32) -> Result<Money, CommerceError> {
        Money::parse(&self.amount, precision)
    }

    /// Amount formatted with `config`, followed by the currency code.
    pub fn display(&self, config: &CurrencyConfig) -> Result<String, CommerceError> {
        Ok(format!(
            "{} {}",
            format_currency(&self.amount, config)?,
            self.currency_code
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fraction() {
        assert_eq!(Money::parse("49.99", 2).unwrap(), Money::new(4999, 2));
        assert_eq!(Money::parse("49.9", 2).unwrap(), Money::new(4990, 2));
        assert_eq!(Money::parse("49", 2).unwrap(), Money::new(4900, 2));
        assert_eq!(Money::parse(".5", 2).unwrap(), Money::new(50, 2));
        assert_eq!(Money::parse("7.", 0).unwrap(), Money::new(7, 0));
        assert_eq!(Money::parse(" 0010.00 ", 2).unwrap(), Money::new(1000, 2));
        assert_eq!(Money::parse("000", 2).unwrap(), Money::zero(2));
    }

    #[test]
    fn test_parse_rounds_half_away_from_zero() {
        assert_eq!(Money::parse("1.005", 2).unwrap().amount_minor, 101);
        assert_eq!(Money::parse("1.004", 2).unwrap().amount_minor, 100);
        assert_eq!(Money::parse("-1.005", 2).unwrap().amount_minor, -101);
        assert_eq!(Money::parse("2.5", 0).unwrap().amount_minor, 3);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for value in ["", "-", ".", "abc", "1,299.00", "1.2.3", "12e3", "--1"] {
            assert_eq!(
                Money::parse(value, 2),
                Err(CommerceError::InvalidAmount(value.to_string())),
                "{value:?}"
            );
        }
    }

    #[test]
    fn test_parse_overflow() {
        assert_eq!(
            Money::parse("99999999999999999999", 2),
            Err(CommerceError::Overflow)
        );
    }

    #[test]
    fn test_format_default() {
        let config = CurrencyConfig::default();
        assert_eq!(Money::new(129990, 2).format(&config), "1,299.90");
        assert_eq!(Money::new(5, 2).format(&config), "0.05");
        assert_eq!(Money::new(123456789, 0).format(&config), "123,456,789");
        assert_eq!(Money::new(-100000, 2).format(&config), "-1,000.00");
    }

    #[test]
    fn test_format_euro() {
        let config = CurrencyConfig::euro();
        assert_eq!(format_currency("89", &config).unwrap(), "\u{20ac}89,00");
        assert_eq!(
            format_currency("-1234567.891", &config).unwrap(),
            "-\u{20ac}1.234.567,89"
        );
    }

    #[test]
    fn test_format_precision_and_symbol() {
        let config = CurrencyConfig::default().with_symbol("$").with_precision(0);
        assert_eq!(format_currency("1999.5", &config).unwrap(), "$2,000");
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::new(1000, 2);
        let b = Money::new(250, 2);
        assert_eq!(a.checked_add(&b).unwrap(), Money::new(1250, 2));
        assert_eq!(b.checked_mul(3).unwrap(), Money::new(750, 2));
        assert!(a.checked_add(&Money::new(1, 0)).is_err());
        assert_eq!(
            Money::new(i64::MAX, 2).checked_mul(2),
            Err(CommerceError::Overflow)
        );
    }

    #[test]
    fn test_price_display() {
        let price = Price::new("129.00", "EUR");
        assert_eq!(price.display(&CurrencyConfig::default()).unwrap(), "129.00 EUR");
        assert_eq!(price.money(2).unwrap(), Money::new(12900, 2));
    }

    #[test]
    fn test_price_wire_format() {
        let price: Price =
            serde_json::from_str(r#"{"amount": "10.0", "currencyCode": "EUR"}"#).unwrap();
        assert_eq!(price, Price::new("10.0", "EUR"));
    }
}
