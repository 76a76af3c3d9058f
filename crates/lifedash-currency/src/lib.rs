//! Currency converter: rate-provider race, fallback table, cross-rate
//! conversion and the currency catalog.

pub mod catalog;
pub mod provider;
pub mod rates;

pub use catalog::{currency, currency_for_country, default_target, search, Currency, CURRENCIES};
pub use provider::{CurrencySource, HttpRateProvider, RateProvider};
pub use rates::{convert, fallback_rates, parse_amount, unit_rate, AmountError, Conversion, Rates};
