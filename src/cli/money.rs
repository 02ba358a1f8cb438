//! CLI commands for the money engine

use crate::config::Settings;
use crate::display::CurrencyFormat;
use crate::error::FinanceResult;
use crate::models::{percentage, Money, PercentOptions, RecurrenceFrequency};

/// `finance parse <amount>`: major units to cents
pub fn run_parse(amount: &str) -> FinanceResult<String> {
    Ok(Money::parse(amount)?.cents().to_string())
}

/// `finance format <cents>`: cents to a localized currency string
pub fn run_format(
    settings: &Settings,
    cents: i64,
    locale: Option<&str>,
    currency: Option<&str>,
) -> FinanceResult<String> {
    let format = CurrencyFormat::new(
        currency.unwrap_or(&settings.currency),
        locale.unwrap_or(&settings.locale),
    )?
    .with_fraction_digits(settings.min_fraction_digits, settings.max_fraction_digits);

    format.format(Money::try_from_cents(cents)?)
}

/// `finance percent <part> <total>`
pub fn run_percent(
    settings: &Settings,
    part: i64,
    total: i64,
    no_clamp: bool,
    decimals: Option<u32>,
) -> FinanceResult<String> {
    let options = PercentOptions {
        clamp: !no_clamp,
        decimals: decimals.unwrap_or(settings.percent_decimals),
    };
    let value = percentage(Money::try_from_cents(part)?, Money::try_from_cents(total)?, options)?;
    Ok(value.to_string())
}

/// `finance convert <cents> <frequency>`: monthly and yearly equivalents
pub fn run_convert(settings: &Settings, cents: i64, frequency: &str) -> FinanceResult<String> {
    let frequency: RecurrenceFrequency = frequency.parse()?;
    let amount = Money::try_from_cents(cents)?;
    let monthly = frequency.to_monthly_cents(amount)?;
    let yearly = frequency.to_yearly_cents(amount)?;
    let format = settings.currency_format()?;

    Ok(format!(
        "{:<8} {:>14} {:>16}\n{:<8} {:>14} {:>16}",
        "monthly",
        monthly.cents(),
        format.format(monthly)?,
        "yearly",
        yearly.cents(),
        format.format(yearly)?
    ))
}
