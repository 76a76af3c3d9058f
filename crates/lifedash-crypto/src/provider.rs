//! CoinGecko market client and the crypto panel source.

use lifedash_cache::{Domain, PanelSource};
use lifedash_core::http;
use lifedash_core::FetchError;
use reqwest::Client;
use tracing::instrument;

use crate::types::{fallback_coins, CoinMarket};

const MARKETS_QUERY: &str = "vs_currency=usd&order=market_cap_desc&per_page=20&page=1&sparkline=true&price_change_percentage=24h";

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Top 20 coins by market cap, with 7-day sparklines.
    #[instrument(skip(self), level = "info")]
    pub async fn markets(&self) -> Result<Vec<CoinMarket>, FetchError> {
        let url = format!("{}/api/v3/coins/markets?{}", self.base_url, MARKETS_QUERY);
        let coins: Vec<CoinMarket> = http::get_json(&self.client, &url).await?;
        if coins.is_empty() {
            return Err(FetchError::UnexpectedShape("empty market list".into()));
        }
        tracing::debug!("Fetched {} coins", coins.len());
        Ok(coins)
    }
}

#[derive(Debug, Clone)]
pub struct CryptoSource {
    client: CoinGeckoClient,
}

impl CryptoSource {
    pub fn new(client: CoinGeckoClient) -> Self {
        Self { client }
    }
}

impl PanelSource for CryptoSource {
    type Payload = Vec<CoinMarket>;

    fn domain(&self) -> Domain {
        Domain::Crypto
    }

    async fn fetch(&self) -> Result<Vec<CoinMarket>, FetchError> {
        self.client.markets().await
    }

    fn synthesize(&self) -> Option<Vec<CoinMarket>> {
        Some(fallback_coins())
    }
}
