//! Exchange-rate providers and the first-answer-wins race across them.

use std::future::Future;

use lifedash_cache::{Domain, PanelSource};
use lifedash_core::http;
use lifedash_core::{EndpointsConfig, FetchError};
use reqwest::Client;
use serde::Deserialize;

use crate::rates::{fallback_rates, Rates};

/// One upstream source of USD-based rates.
pub trait RateProvider: Send + Sync {
    fn name(&self) -> &str;

    /// A non-empty rate table, or an error.
    fn latest(&self) -> impl Future<Output = Result<Rates, FetchError>> + Send;
}

/// Providers disagree on the field name; accept either.
#[derive(Debug, Deserialize)]
struct RatesBody {
    #[serde(default)]
    rates: Option<Rates>,
    #[serde(default)]
    conversion_rates: Option<Rates>,
}

impl RatesBody {
    fn into_rates(self) -> Option<Rates> {
        self.rates
            .filter(|r| !r.is_empty())
            .or(self.conversion_rates)
            .filter(|r| !r.is_empty())
    }
}

/// A JSON endpoint returning `{ "rates": {...} }` or
/// `{ "conversion_rates": {...} }`.
#[derive(Debug, Clone)]
pub struct HttpRateProvider {
    name: &'static str,
    client: Client,
    url: String,
}

impl HttpRateProvider {
    pub fn new(name: &'static str, client: Client, url: impl Into<String>) -> Self {
        Self {
            name,
            client,
            url: url.into(),
        }
    }

    /// open.er-api.com
    pub fn er_api(client: Client, base_url: &str) -> Self {
        Self::new(
            "open.er-api.com",
            client,
            format!("{}/v6/latest/USD", base_url.trim_end_matches('/')),
        )
    }

    /// exchangerate.host
    pub fn exchangerate_host(client: Client, base_url: &str) -> Self {
        Self::new(
            "exchangerate.host",
            client,
            format!("{}/latest?base=USD", base_url.trim_end_matches('/')),
        )
    }

    /// exchangerate-api.com
    pub fn exchangerate_api(client: Client, base_url: &str) -> Self {
        Self::new(
            "exchangerate-api.com",
            client,
            format!("{}/v4/latest/USD", base_url.trim_end_matches('/')),
        )
    }

    /// The fixed provider order.
    pub fn defaults(client: Client, endpoints: &EndpointsConfig) -> Vec<Self> {
        vec![
            Self::er_api(client.clone(), &endpoints.er_api),
            Self::exchangerate_host(client.clone(), &endpoints.exchangerate_host),
            Self::exchangerate_api(client, &endpoints.exchangerate_api),
        ]
    }
}

impl RateProvider for HttpRateProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn latest(&self) -> Result<Rates, FetchError> {
        let body: RatesBody = http::get_json(&self.client, &self.url).await?;
        body.into_rates()
            .ok_or_else(|| FetchError::UnexpectedShape(format!("{} returned no rates", self.name)))
    }
}

/// Tries each provider in order and keeps the first non-empty table. Falls
/// back to the fixed approximate table when every provider fails.
pub struct CurrencySource<P = HttpRateProvider> {
    providers: Vec<P>,
}

impl<P: RateProvider> CurrencySource<P> {
    pub fn new(providers: Vec<P>) -> Self {
        Self { providers }
    }

    pub async fn race(&self) -> Result<Rates, FetchError> {
        let mut last_error = FetchError::InvalidRequest("no rate providers configured".into());
        for provider in &self.providers {
            match provider.latest().await {
                Ok(rates) => {
                    tracing::info!("Exchange rates from {} ({} currencies)", provider.name(), rates.len());
                    return Ok(rates);
                }
                Err(e) => {
                    tracing::warn!("Rate provider {} failed: {}", provider.name(), e);
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}

impl<P: RateProvider> PanelSource for CurrencySource<P> {
    type Payload = Rates;

    fn domain(&self) -> Domain {
        Domain::Currency
    }

    async fn fetch(&self) -> Result<Rates, FetchError> {
        self.race().await
    }

    fn synthesize(&self) -> Option<Rates> {
        Some(fallback_rates())
    }
}
