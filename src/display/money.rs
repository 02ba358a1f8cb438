//! Localized currency formatting
//!
//! Renders cents as a currency string the way the presentation layer expects:
//! currency symbol, locale thousands and decimal separators, and between
//! `min_fraction_digits` and `max_fraction_digits` fraction digits.

use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::models::Money;

/// Locale used when the caller does not specify one
pub const DEFAULT_LOCALE: &str = "es-MX";

/// Where the currency symbol goes relative to the number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    /// `$1,234.50`
    Prefix,
    /// `1.234,50 €`
    Suffix,
}

/// Separator and symbol conventions for one locale/currency pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub position: SymbolPosition,
    pub group_separator: String,
    pub decimal_separator: String,
    /// Integer digits needed beyond the first group before grouping applies
    pub min_grouping_digits: usize,
    pub min_fraction_digits: u32,
    pub max_fraction_digits: u32,
}

impl CurrencyFormat {
    /// Conventions for a BCP 47 locale tag and ISO 4217 currency code
    ///
    /// Supported locales: `es-MX`, `en-US`, `es-ES`, `de-DE`.
    pub fn new(currency: &str, locale: &str) -> FinanceResult<Self> {
        let currency = currency.trim().to_ascii_uppercase();
        let locale = locale.trim();

        let (position, group, decimal, min_grouping) = match locale {
            "es-MX" | "en-US" => (SymbolPosition::Prefix, ",", ".", 1),
            "es-ES" => (SymbolPosition::Suffix, ".", ",", 2),
            "de-DE" => (SymbolPosition::Suffix, ".", ",", 1),
            other => {
                return Err(FinanceError::Config(format!(
                    "unsupported locale '{}'",
                    other
                )))
            }
        };

        Ok(Self {
            symbol: currency_symbol(&currency, locale),
            position,
            group_separator: group.to_string(),
            decimal_separator: decimal.to_string(),
            min_grouping_digits: min_grouping,
            min_fraction_digits: 0,
            max_fraction_digits: 2,
        })
    }

    /// Mexican pesos in the es-MX locale
    pub fn mxn() -> Self {
        Self {
            symbol: "$".to_string(),
            position: SymbolPosition::Prefix,
            group_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            min_grouping_digits: 1,
            min_fraction_digits: 0,
            max_fraction_digits: 2,
        }
    }

    /// Set the fraction digit bounds; `min` is capped at `max`
    pub fn with_fraction_digits(mut self, min: u32, max: u32) -> Self {
        self.max_fraction_digits = max;
        self.min_fraction_digits = min.min(max);
        self
    }

    /// Render an amount with these conventions
    pub fn format(&self, amount: Money) -> FinanceResult<String> {
        let amount = amount.ensure_safe()?;
        let number = self.format_number(amount.cents().unsigned_abs());
        let nonzero = number.chars().any(|c| c.is_ascii_digit() && c != '0');
        let sign = if amount.is_negative() && nonzero { "-" } else { "" };

        Ok(match self.position {
            SymbolPosition::Prefix => format!("{}{}{}", sign, self.symbol, number),
            SymbolPosition::Suffix => format!("{}{}\u{a0}{}", sign, number, self.symbol),
        })
    }

    fn format_number(&self, cents: u64) -> String {
        // Cents carry at most two fraction digits; round half-up to the shown precision
        let shown = self.max_fraction_digits.min(2);
        let divisor = 10u64.pow(2 - shown);
        let scaled = if divisor > 1 { (cents + divisor / 2) / divisor } else { cents };
        let unit = 10u64.pow(shown);

        let integral = group_digits(
            &(scaled / unit).to_string(),
            &self.group_separator,
            self.min_grouping_digits,
        );

        let mut fraction = if shown > 0 {
            format!("{:0width$}", scaled % unit, width = shown as usize)
        } else {
            String::new()
        };
        while fraction.len() > self.min_fraction_digits as usize && fraction.ends_with('0') {
            fraction.pop();
        }
        while fraction.len() < self.min_fraction_digits as usize {
            fraction.push('0');
        }

        if fraction.is_empty() {
            integral
        } else {
            format!("{}{}{}", integral, self.decimal_separator, fraction)
        }
    }
}

fn currency_symbol(currency: &str, locale: &str) -> String {
    match (currency, locale) {
        ("MXN", "es-MX") | ("USD", "en-US") => "$".to_string(),
        ("MXN", _) => "MX$".to_string(),
        ("USD", "es-MX") => "USD".to_string(),
        ("USD", _) => "US$".to_string(),
        ("EUR", _) => "€".to_string(),
        (code, _) => code.to_string(),
    }
}

fn group_digits(digits: &str, separator: &str, min_grouping_digits: usize) -> String {
    if digits.len() < 3 + min_grouping_digits {
        return digits.to_string();
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(c);
    }
    grouped
}

/// Format cents as a localized currency string
///
/// # Examples
/// ```
/// use finance_core::display::format_money;
/// use finance_core::models::Money;
/// assert_eq!(format_money(Money::from_cents(123450), "MXN", "es-MX").unwrap(), "$1,234.5");
/// ```
pub fn format_money(amount: Money, currency: &str, locale: &str) -> FinanceResult<String> {
    CurrencyFormat::new(currency, locale)?.format(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mxn(cents: i64) -> String {
        CurrencyFormat::mxn().format(Money::from_cents(cents)).unwrap()
    }

    #[test]
    fn test_es_mx_defaults() {
        assert_eq!(mxn(123456), "$1,234.56");
        assert_eq!(mxn(123450), "$1,234.5");
        assert_eq!(mxn(123400), "$1,234");
        assert_eq!(mxn(5), "$0.05");
        assert_eq!(mxn(0), "$0");
        assert_eq!(mxn(-4210), "-$42.1");
        assert_eq!(mxn(98765432199), "$987,654,321.99");
    }

    #[test]
    fn test_fraction_digit_bounds() {
        let two = CurrencyFormat::mxn().with_fraction_digits(2, 2);
        assert_eq!(two.format(Money::from_cents(123400)).unwrap(), "$1,234.00");
        assert_eq!(two.format(Money::from_cents(50)).unwrap(), "$0.50");

        let whole = CurrencyFormat::mxn().with_fraction_digits(0, 0);
        assert_eq!(whole.format(Money::from_cents(123450)).unwrap(), "$1,235");
        assert_eq!(whole.format(Money::from_cents(123449)).unwrap(), "$1,234");
        assert_eq!(whole.format(Money::from_cents(-49)).unwrap(), "$0");

        let one = CurrencyFormat::mxn().with_fraction_digits(1, 1);
        assert_eq!(one.format(Money::from_cents(105)).unwrap(), "$1.1");
    }

    #[test]
    fn test_other_locales() {
        assert_eq!(format_money(Money::from_cents(123456), "USD", "en-US").unwrap(), "$1,234.56");
        assert_eq!(
            format_money(Money::from_cents(123456), "EUR", "de-DE").unwrap(),
            "1.234,56\u{a0}€"
        );
        // es-ES does not group four-digit amounts
        assert_eq!(
            format_money(Money::from_cents(123456), "EUR", "es-ES").unwrap(),
            "1234,56\u{a0}€"
        );
        assert_eq!(
            format_money(Money::from_cents(1234567), "EUR", "es-ES").unwrap(),
            "12.345,67\u{a0}€"
        );
        assert_eq!(format_money(Money::from_cents(1000), "USD", "es-MX").unwrap(), "USD10");
    }

    #[test]
    fn test_unsupported_locale() {
        assert!(matches!(
            format_money(Money::from_cents(100), "MXN", "xx-YY"),
            Err(FinanceError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_unsafe_amount() {
        let err = CurrencyFormat::mxn()
            .format(Money::from_cents(crate::models::MAX_SAFE_CENTS + 1))
            .unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1", ",", 1), "1");
        assert_eq!(group_digits("123", ",", 1), "123");
        assert_eq!(group_digits("1234", ",", 1), "1,234");
        assert_eq!(group_digits("1234567", ",", 1), "1,234,567");
        assert_eq!(group_digits("1234", ".", 2), "1234");
        assert_eq!(group_digits("12345", ".", 2), "12.345");
    }
}
