//! Establishes the session's `LocationFix`.
//!
//! IP lookup first for a coarse fix, then a bounded wait for the device.
//! A device fix is reverse-geocoded and merged over the IP data. The
//! resolver never fails: with nothing available it returns the
//! `LocationFix::unknown` placeholder.

use std::time::Duration;

use lifedash_core::{http, Config, FetchError, LocationError};

use crate::device::{ConfiguredLocator, DeviceLocator};
use crate::geocode::Geocoder;
use crate::ipinfo::IpInfoClient;
use crate::timezone::{estimate_timezone, local_timezone_name};
use crate::types::{Coordinates, LocationFix, PlaceCandidate, ReversePlace};

pub struct LocationResolver<D> {
    ipinfo: IpInfoClient,
    geocoder: Geocoder,
    device: D,
    device_timeout: Duration,
    default_timezone: String,
}

impl LocationResolver<ConfiguredLocator> {
    /// Build a resolver from configuration, with the device locator it
    /// describes.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let client = http::build_client(config.http.timeout())?;
        Ok(Self::new(
            IpInfoClient::new(
                client.clone(),
                config.endpoints.ipinfo.clone(),
                config.location.ipinfo_token.clone(),
            ),
            Geocoder::new(client, config.endpoints.nominatim.clone()),
            ConfiguredLocator::from_config(&config.location),
            config.location.device_timeout(),
        ))
    }
}

impl<D: DeviceLocator> LocationResolver<D> {
    pub fn new(
        ipinfo: IpInfoClient,
        geocoder: Geocoder,
        device: D,
        device_timeout: Duration,
    ) -> Self {
        Self {
            ipinfo,
            geocoder,
            device,
            device_timeout,
            default_timezone: local_timezone_name(),
        }
    }

    /// Zone name used when no lookup provides one.
    pub fn with_default_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.default_timezone = timezone.into();
        self
    }

    pub fn geocoder(&self) -> &Geocoder {
        &self.geocoder
    }

    pub async fn resolve(&self) -> LocationFix {
        let ip_fix = match self.ipinfo.lookup(&self.default_timezone).await {
            Ok(fix) => Some(fix),
            Err(e) => {
                tracing::warn!("IP location lookup failed: {}", e);
                None
            }
        };

        let device = match self.device_coordinates().await {
            Ok(coords) => Some(coords),
            Err(e) => {
                tracing::info!("Device location not used: {}", e);
                None
            }
        };

        let fix = match (ip_fix, device) {
            (ip_fix, Some(coords)) => {
                let place = match self.geocoder.reverse(coords).await {
                    Ok(place) => place,
                    Err(e) => {
                        tracing::warn!("Reverse geocoding failed: {}", e);
                        ReversePlace::default()
                    }
                };
                let base = ip_fix.unwrap_or_else(|| {
                    let mut fix = LocationFix::unknown(self.default_timezone.clone());
                    fix.timezone = estimate_timezone(coords.longitude, &fix.country);
                    fix
                });
                merge_device_fix(base, coords, place)
            }
            (Some(ip_fix), None) => ip_fix,
            (None, None) => {
                tracing::warn!("No location source available; using placeholder");
                LocationFix::unknown(self.default_timezone.clone())
            }
        };

        tracing::info!(
            "Location resolved: {} ({}, accurate: {})",
            fix.place_name(),
            fix.country,
            fix.is_accurate
        );
        fix
    }

    /// Forward search for the location picker.
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, FetchError> {
        self.geocoder.search(query).await
    }

    async fn device_coordinates(&self) -> Result<Coordinates, LocationError> {
        tokio::time::timeout(self.device_timeout, self.device.locate())
            .await
            .map_err(|_| LocationError::Timeout)?
    }
}

/// Device coordinates always win; geocoded names win when present; network
/// metadata (IP, ISP, country, timezone) is kept from the IP lookup.
fn merge_device_fix(base: LocationFix, coords: Coordinates, place: ReversePlace) -> LocationFix {
    LocationFix {
        city: place.city.unwrap_or(base.city.clone()),
        region: place.region.unwrap_or(base.region.clone()),
        loc: coords.to_loc(),
        is_accurate: true,
        ..base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::device::{FixedLocator, NoDeviceLocator};

    /// Never answers, to exercise the bounded wait.
    struct HangingLocator;

    impl DeviceLocator for HangingLocator {
        async fn locate(&self) -> Result<Coordinates, LocationError> {
            std::future::pending().await
        }
    }

    fn resolver<D: DeviceLocator>(server: &MockServer, device: D) -> LocationResolver<D> {
        let client = http::build_client(Duration::from_secs(2)).unwrap();
        LocationResolver::new(
            IpInfoClient::new(client.clone(), server.uri(), None),
            Geocoder::new(client, server.uri()),
            device,
            Duration::from_millis(200),
        )
        .with_default_timezone("Etc/Test")
    }

    async fn mount_ipinfo(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ip": "203.0.113.7",
                "city": "Cambridge",
                "region": "Massachusetts",
                "country": "US",
                "loc": "42.37,-71.11",
                "timezone": "America/New_York",
                "org": "AS7922 Comcast Cable"
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_ip_only_when_device_unavailable() {
        let server = MockServer::start().await;
        mount_ipinfo(&server).await;

        let fix = resolver(&server, NoDeviceLocator).resolve().await;
        assert_eq!(fix.city, "Cambridge");
        assert_eq!(fix.loc, "42.37,-71.11");
        assert!(!fix.is_accurate);
    }

    #[tokio::test]
    async fn test_device_fix_merged_over_ip() {
        let server = MockServer::start().await;
        mount_ipinfo(&server).await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "address": { "city": "Boston", "state": "Massachusetts", "country": "United States" }
            })))
            .mount(&server)
            .await;

        let device = FixedLocator::new(Coordinates::new(42.3601, -71.0589));
        let fix = resolver(&server, device).resolve().await;

        assert_eq!(fix.city, "Boston");
        assert_eq!(fix.loc, "42.3601,-71.0589");
        assert!(fix.is_accurate);
        assert_eq!(fix.ip, "203.0.113.7");
        assert_eq!(fix.org, "AS7922 Comcast Cable");
        assert_eq!(fix.timezone, "America/New_York");
    }

    #[tokio::test]
    async fn test_geocode_failure_keeps_ip_names_with_device_coords() {
        let server = MockServer::start().await;
        mount_ipinfo(&server).await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let device = FixedLocator::new(Coordinates::new(42.3601, -71.0589));
        let fix = resolver(&server, device).resolve().await;

        assert_eq!(fix.city, "Cambridge");
        assert_eq!(fix.loc, "42.3601,-71.0589");
        assert!(fix.is_accurate);
    }

    #[tokio::test]
    async fn test_device_timeout_falls_back_to_ip() {
        let server = MockServer::start().await;
        mount_ipinfo(&server).await;

        let fix = resolver(&server, HangingLocator).resolve().await;
        assert_eq!(fix.city, "Cambridge");
        assert!(!fix.is_accurate);
    }

    #[tokio::test]
    async fn test_everything_failing_yields_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fix = resolver(&server, NoDeviceLocator).resolve().await;
        assert!(fix.is_unknown());
        assert_eq!(fix.loc, "0,0");
        assert_eq!(fix.timezone, "Etc/Test");
    }

    #[tokio::test]
    async fn test_device_without_ip_still_resolves() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "address": { "city": "Colombo", "state": "Western Province" }
            })))
            .mount(&server)
            .await;

        let device = FixedLocator::new(Coordinates::new(6.9271, 79.8612));
        let fix = resolver(&server, device).resolve().await;

        assert_eq!(fix.city, "Colombo");
        assert_eq!(fix.ip, "Unknown");
        assert!(fix.is_accurate);
        assert_eq!(fix.timezone, "UTC+05:00");
    }
}
