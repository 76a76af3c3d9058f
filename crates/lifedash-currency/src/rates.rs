//! Rate tables and cross-rate conversion.

use std::collections::BTreeMap;

use lifedash_core::format::format_number;
use serde::Serialize;
use thiserror::Error;

/// Units of each currency per one unit of the common base (USD).
pub type Rates = BTreeMap<String, f64>;

const FALLBACK_RATES: &[(&str, f64)] = &[
    ("USD", 1.0),
    ("EUR", 0.93),
    ("GBP", 0.79),
    ("JPY", 151.72),
    ("CAD", 1.36),
    ("AUD", 1.51),
    ("CHF", 0.91),
    ("CNY", 7.24),
    ("INR", 83.12),
    ("BRL", 5.06),
    ("RUB", 92.5),
    ("KRW", 1345.2),
    ("SGD", 1.35),
    ("NZD", 1.63),
    ("MXN", 16.82),
    ("HKD", 7.82),
    ("TRY", 32.15),
    ("ZAR", 18.45),
    ("SEK", 10.42),
    ("NOK", 10.65),
    ("DKK", 6.92),
    ("PLN", 3.94),
    ("THB", 35.67),
    ("IDR", 15650.0),
    ("HUF", 354.2),
    ("CZK", 22.94),
    ("ILS", 3.67),
    ("CLP", 912.5),
    ("PHP", 56.78),
    ("AED", 3.67),
    ("COP", 3950.0),
    ("SAR", 3.75),
    ("MYR", 4.65),
    ("RON", 4.62),
    ("LKR", 310.25),
    ("NGN", 1450.0),
    ("VND", 25000.0),
    ("PKR", 278.5),
    ("EGP", 48.2),
    ("BGN", 1.82),
    ("HRK", 7.02),
    ("QAR", 3.64),
    ("KWD", 0.31),
    ("ISK", 138.5),
    ("KES", 128.3),
    ("BHD", 0.376),
    ("ARS", 880.0),
    ("PEN", 3.72),
    ("UAH", 39.5),
];

/// Approximate USD-based rates used when no provider answers.
pub fn fallback_rates() -> Rates {
    FALLBACK_RATES
        .iter()
        .map(|(code, rate)| (code.to_string(), *rate))
        .collect()
}

fn usable(rate: f64) -> Option<f64> {
    (rate.is_finite() && rate > 0.0).then_some(rate)
}

/// Rate for `code`: the live table first, then the fallback table, then 1.
pub fn rate_for(code: &str, rates: &Rates) -> f64 {
    rates
        .get(code)
        .copied()
        .and_then(usable)
        .or_else(|| {
            FALLBACK_RATES
                .iter()
                .find(|(c, _)| *c == code)
                .map(|(_, r)| *r)
        })
        .unwrap_or(1.0)
}

/// `amount / rate(from) * rate(to)`.
pub fn convert(amount: f64, from: &str, to: &str, rates: &Rates) -> f64 {
    amount / rate_for(from, rates) * rate_for(to, rates)
}

/// Value of one `from` in `to`.
pub fn unit_rate(from: &str, to: &str, rates: &Rates) -> f64 {
    rate_for(to, rates) / rate_for(from, rates)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Enter an amount")]
    Empty,
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("Amount cannot be negative")]
    Negative,
}

/// Parse a user-entered amount. Commas used as thousands separators are
/// accepted.
pub fn parse_amount(input: &str) -> Result<f64, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    let amount: f64 = trimmed
        .replace(',', "")
        .parse()
        .map_err(|_| AmountError::NotANumber(trimmed.to_string()))?;
    if !amount.is_finite() {
        return Err(AmountError::NotANumber(trimmed.to_string()));
    }
    if amount < 0.0 {
        return Err(AmountError::Negative);
    }
    Ok(amount)
}

/// One conversion: what to convert and between which currencies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

impl Conversion {
    pub fn new(amount: f64, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            amount,
            from: from.into().to_uppercase(),
            to: to.into().to_uppercase(),
        }
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }

    pub fn result(&self, rates: &Rates) -> f64 {
        convert(self.amount, &self.from, &self.to, rates)
    }

    /// "100 USD = 93 EUR"
    pub fn summary(&self, rates: &Rates) -> String {
        format!(
            "{} {} = {} {}",
            format_number(self.amount, 3),
            self.from,
            format_number(self.result(rates), 4),
            self.to
        )
    }

    /// "1 USD = 0.930000 EUR"
    pub fn unit_summary(&self, rates: &Rates) -> String {
        format!(
            "1 {} = {:.6} {}",
            self.from,
            unit_rate(&self.from, &self.to, rates),
            self.to
        )
    }
}
