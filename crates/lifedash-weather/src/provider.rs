//! Open-Meteo forecast client and the weather panel source.

use lifedash_cache::{Domain, PanelSource};
use lifedash_core::http;
use lifedash_core::FetchError;
use lifedash_location::{Coordinates, LocationFix};
use reqwest::Client;
use tracing::instrument;

use crate::types::Forecast;

const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,relative_humidity_2m,precipitation,weather_code,wind_speed_10m,is_day";
const HOURLY_FIELDS: &str = "temperature_2m,precipitation_probability,weather_code";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,sunrise,sunset";

#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn forecast_url(&self, coordinates: Coordinates, timezone: &str) -> String {
        format!(
            "{}/v1/forecast?latitude={}&longitude={}&current={}&hourly={}&daily={}&timezone={}",
            self.base_url,
            coordinates.latitude,
            coordinates.longitude,
            CURRENT_FIELDS,
            HOURLY_FIELDS,
            DAILY_FIELDS,
            urlencoding::encode(timezone)
        )
    }

    #[instrument(skip(self), level = "info")]
    pub async fn forecast(
        &self,
        coordinates: Coordinates,
        timezone: &str,
    ) -> Result<Forecast, FetchError> {
        let forecast: Forecast =
            http::get_json(&self.client, &self.forecast_url(coordinates, timezone)).await?;
        tracing::debug!(
            "Forecast has {} days, {} hours",
            forecast.daily.time.len(),
            forecast.hourly.as_ref().map_or(0, |h| h.time.len())
        );
        Ok(forecast)
    }
}

/// Weather for one location fix. Has no synthesized tier.
#[derive(Debug, Clone)]
pub struct WeatherSource {
    client: OpenMeteoClient,
    coordinates: Option<Coordinates>,
    timezone: String,
}

impl WeatherSource {
    pub fn new(client: OpenMeteoClient, fix: &LocationFix) -> Self {
        Self {
            client,
            coordinates: fix.coordinates(),
            timezone: fix.timezone.clone(),
        }
    }
}

impl PanelSource for WeatherSource {
    type Payload = Forecast;

    fn domain(&self) -> Domain {
        Domain::Weather
    }

    async fn fetch(&self) -> Result<Forecast, FetchError> {
        let coordinates = self
            .coordinates
            .ok_or_else(|| FetchError::InvalidRequest("location has no coordinates".into()))?;
        self.client.forecast(coordinates, &self.timezone).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use lifedash_cache::{FallbackLoader, MemoryStore, Provenance, ReadingCache, SystemClock};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample() -> serde_json::Value {
        serde_json::json!({
            "utc_offset_seconds": 0,
            "current": {
                "temperature_2m": 18.2, "apparent_temperature": 17.0,
                "relative_humidity_2m": 60.0, "precipitation": 0.0,
                "weather_code": 0, "wind_speed_10m": 11.5, "is_day": 1
            },
            "daily": {
                "time": ["2025-05-01"], "temperature_2m_max": [21.0],
                "temperature_2m_min": [9.0], "weather_code": [0],
                "sunrise": ["2025-05-01T05:36"], "sunset": ["2025-05-01T19:45"]
            }
        })
    }

    fn fix() -> LocationFix {
        let mut fix = LocationFix::unknown("Europe/London");
        fix.loc = "51.5074,-0.1278".into();
        fix
    }

    fn source(server: &MockServer) -> WeatherSource {
        let client = http::build_client(Duration::from_secs(2)).unwrap();
        WeatherSource::new(OpenMeteoClient::new(client, server.uri()), &fix())
    }

    fn loader() -> FallbackLoader {
        FallbackLoader::new(ReadingCache::new(
            Arc::new(MemoryStore::new()),
            Arc::new(SystemClock),
        ))
    }

    #[tokio::test]
    async fn test_forecast_request_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .and(query_param("latitude", "51.5074"))
            .and(query_param("longitude", "-0.1278"))
            .and(query_param("timezone", "Europe/London"))
            .and(query_param("daily", DAILY_FIELDS))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample()))
            .expect(1)
            .mount(&server)
            .await;

        let forecast = source(&server).fetch().await.unwrap();
        assert_eq!(forecast.current.weather_code, 0);
        assert!(forecast.hourly.is_none());
    }

    #[tokio::test]
    async fn test_cached_forecast_served_after_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample()))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/forecast"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let loader = loader();
        let source = source(&server);
        assert_eq!(loader.load(&source).await.unwrap().provenance, Provenance::Live);

        let second = loader.load(&source).await.unwrap();
        assert_eq!(second.provenance, Provenance::Cached);
        assert_eq!(
            second.notice(Domain::Weather).as_deref(),
            Some("Using cached weather data")
        );
    }

    #[tokio::test]
    async fn test_no_cache_no_estimate_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = loader().load(&source(&server)).await.unwrap_err();
        assert_eq!(err.user_message(), "Failed to load weather data");
    }
}
