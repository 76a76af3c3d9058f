//! WAQI station feed client and the air-quality panel source.

use lifedash_cache::{Domain, PanelSource};
use lifedash_core::http;
use lifedash_core::FetchError;
use lifedash_location::{Coordinates, LocationFix};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use crate::pollutant::Pollutant;
use crate::reading::AirQualityReading;

/// WAQI's public demo token.
const DEMO_TOKEN: &str = "demo";

#[derive(Debug, Deserialize)]
struct WaqiResponse {
    status: String,
    /// An object on success, an error string otherwise
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Clone)]
pub struct WaqiClient {
    client: Client,
    base_url: String,
}

impl WaqiClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Nearest-station feed. Returns the raw AQI, the per-pollutant values the
    /// station reports, and the station name.
    #[instrument(skip(self), level = "info")]
    pub async fn station_feed(&self, coordinates: Coordinates) -> Result<StationFeed, FetchError> {
        let url = format!(
            "{}/feed/geo:{};{}/?token={}",
            self.base_url, coordinates.latitude, coordinates.longitude, DEMO_TOKEN
        );
        let body: WaqiResponse = http::get_json(&self.client, &url).await?;
        StationFeed::from_response(body)
    }
}

/// The fields of a WAQI feed the panel uses.
#[derive(Debug, Clone, PartialEq)]
pub struct StationFeed {
    pub aqi: f64,
    pub station: Option<String>,
    iaqi: Value,
}

impl StationFeed {
    fn from_response(body: WaqiResponse) -> Result<Self, FetchError> {
        if body.status != "ok" {
            return Err(FetchError::UnexpectedShape(format!(
                "station feed status '{}'",
                body.status
            )));
        }
        // Stations without a current reading report "-"
        let aqi = body
            .data
            .get("aqi")
            .and_then(Value::as_f64)
            .ok_or_else(|| FetchError::UnexpectedShape("station feed has no numeric aqi".into()))?;

        Ok(Self {
            aqi,
            station: body
                .data
                .pointer("/city/name")
                .and_then(Value::as_str)
                .map(str::to_string),
            iaqi: body.data.get("iaqi").cloned().unwrap_or(Value::Null),
        })
    }

    pub fn reported(&self, pollutant: Pollutant) -> Option<f64> {
        self.iaqi
            .get(pollutant.key())
            .and_then(|entry| entry.get("v"))
            .and_then(Value::as_f64)
    }
}

/// Air quality for one location fix. Estimates from the city name when the
/// station feed and cache are both unavailable.
pub struct AirSource {
    client: WaqiClient,
    coordinates: Option<Coordinates>,
    city: String,
    rng: Mutex<StdRng>,
}

impl AirSource {
    pub fn new(client: WaqiClient, fix: &LocationFix) -> Self {
        Self {
            client,
            coordinates: fix.coordinates(),
            city: fix.city.clone(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Fix the jitter sequence, for reproducible output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }
}

impl PanelSource for AirSource {
    type Payload = AirQualityReading;

    fn domain(&self) -> Domain {
        Domain::AirQuality
    }

    async fn fetch(&self) -> Result<AirQualityReading, FetchError> {
        let coordinates = self
            .coordinates
            .ok_or_else(|| FetchError::InvalidRequest("location has no coordinates".into()))?;
        let feed = self.client.station_feed(coordinates).await?;

        let mut rng = self.rng.lock();
        let mut reading =
            AirQualityReading::from_station(feed.aqi, |p| feed.reported(p), &mut *rng);
        reading.station = feed.station;
        tracing::debug!("Station AQI {} mapped to level {}", feed.aqi, reading.level);
        Ok(reading)
    }

    fn synthesize(&self) -> Option<AirQualityReading> {
        Some(AirQualityReading::estimate_for_city(&self.city))
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

    use crate::aqi::AqiLevel;

    fn boston() -> LocationFix {
        let mut fix = LocationFix::unknown("America/New_York");
        fix.city = "Boston".into();
        fix.loc = "42.36,-71.06".into();
        fix
    }

    fn source(server: &MockServer) -> AirSource {
        let client = http::build_client(Duration::from_secs(2)).unwrap();
        AirSource::new(WaqiClient::new(client, server.uri()), &boston()).with_seed(1)
    }

    fn loader() -> FallbackLoader {
        FallbackLoader::new(ReadingCache::new(
            Arc::new(MemoryStore::new()),
            Arc::new(SystemClock),
        ))
    }

    #[tokio::test]
    async fn test_station_feed_mapped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed/geo:42.36;-71.06/"))
            .and(query_param("token", "demo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "data": {
                    "aqi": 320,
                    "city": { "name": "Boston - Kenmore Square" },
                    "iaqi": { "pm25": { "v": 210.0 }, "o3": { "v": 44 } }
                }
            })))
            .mount(&server)
            .await;

        let reading = source(&server).fetch().await.unwrap();
        assert_eq!(reading.level, AqiLevel::VeryPoor);
        assert_eq!(reading.pm25, 210.0);
        assert_eq!(reading.o3, 44.0);
        assert_eq!(reading.station.as_deref(), Some("Boston - Kenmore Square"));
        // Not reported, so filled from the Very Poor base of 300 ± 20%
        assert!(reading.pm10 >= 240.0 && reading.pm10 <= 360.0);
    }

    #[tokio::test]
    async fn test_error_status_is_shape_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "error",
                "data": "Unknown station"
            })))
            .mount(&server)
            .await;

        let err = source(&server).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::UnexpectedShape(_)));
    }

    #[tokio::test]
    async fn test_dash_aqi_is_shape_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "data": { "aqi": "-" }
            })))
            .mount(&server)
            .await;

        assert!(source(&server).fetch().await.is_err());
    }

    #[tokio::test]
    async fn test_offline_without_cache_estimates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let loaded = loader().load(&source(&server)).await.unwrap();
        assert_eq!(loaded.provenance, Provenance::Estimated);
        assert_eq!(loaded.payload.level, AqiLevel::Fair);
        assert_eq!(
            loaded.notice(Domain::AirQuality).as_deref(),
            Some("Using estimated air quality data")
        );
    }
}
