//! Nager.Date client and the holiday panel source.

use lifedash_cache::{Domain, PanelSource};
use lifedash_core::http;
use lifedash_core::FetchError;
use reqwest::Client;
use tracing::instrument;

use crate::fallback::fallback_holidays;
use crate::types::{is_valid_country_code, Holiday};

#[derive(Debug, Clone)]
pub struct NagerClient {
    client: Client,
    base_url: String,
}

impl NagerClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Public holidays for `country` in `year`.
    #[instrument(skip(self), level = "info")]
    pub async fn public_holidays(&self, year: i32, country: &str) -> Result<Vec<Holiday>, FetchError> {
        if !is_valid_country_code(country) {
            return Err(FetchError::InvalidRequest(format!(
                "invalid country code '{}'",
                country
            )));
        }

        let url = format!(
            "{}/api/v3/PublicHolidays/{}/{}",
            self.base_url,
            year,
            country.to_ascii_uppercase()
        );
        let holidays: Vec<Holiday> = http::get_json(&self.client, &url).await?;
        if holidays.is_empty() {
            return Err(FetchError::UnexpectedShape("no holidays returned".into()));
        }
        tracing::debug!("Fetched {} holidays for {}", holidays.len(), country);
        Ok(holidays)
    }
}

/// This year's holidays for one country.
#[derive(Debug, Clone)]
pub struct HolidaySource {
    client: NagerClient,
    country: String,
    year: i32,
}

impl HolidaySource {
    pub fn new(client: NagerClient, country: impl Into<String>, year: i32) -> Self {
        Self {
            client,
            country: country.into(),
            year,
        }
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

impl PanelSource for HolidaySource {
    type Payload = Vec<Holiday>;

    fn domain(&self) -> Domain {
        Domain::Holidays
    }

    async fn fetch(&self) -> Result<Vec<Holiday>, FetchError> {
        self.client.public_holidays(self.year, &self.country).await
    }

    fn synthesize(&self) -> Option<Vec<Holiday>> {
        Some(fallback_holidays(&self.country, self.year))
    }
}
