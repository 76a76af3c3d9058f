//! Reverse and forward geocoding against Nominatim (OpenStreetMap).
//! Free and keyless; a descriptive user agent is required by its usage policy.

use lifedash_core::http;
use lifedash_core::FetchError;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::timezone::estimate_timezone;
use crate::types::{Coordinates, PlaceCandidate, ReversePlace};

const SEARCH_LIMIT: usize = 10;

#[derive(Debug, Deserialize)]
struct NominatimReverse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
    address: Option<NominatimAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    suburb: Option<String>,
    state: Option<String>,
    county: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
}

impl NominatimAddress {
    /// Prefer city > town > village > suburb for the primary place name.
    fn place(&self) -> Option<String> {
        [&self.city, &self.town, &self.village, &self.suburb]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .cloned()
    }

    fn region(&self) -> Option<String> {
        [&self.state, &self.county]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .cloned()
    }
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Place names for a coordinate pair. Fields the service does not know
    /// come back as `None` so the caller can keep what it already has.
    #[instrument(skip(self), level = "info")]
    pub async fn reverse(&self, coordinates: Coordinates) -> Result<ReversePlace, FetchError> {
        let url = format!(
            "{}/reverse?format=json&lat={}&lon={}&zoom=18&addressdetails=1",
            self.base_url, coordinates.latitude, coordinates.longitude
        );

        let body: NominatimReverse = http::get_json(&self.client, &url).await?;
        let addr = body.address.unwrap_or_default();

        let place = ReversePlace {
            city: addr.place(),
            region: addr.state.filter(|s| !s.is_empty()),
        };
        tracing::info!("Reverse geocoded to: {:?}", place.city);
        Ok(place)
    }

    /// Free-text place search. Only results naming a city, a region and a
    /// country are returned. A blank query returns no candidates without
    /// contacting the service.
    #[instrument(skip(self), level = "info")]
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, FetchError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}/search?q={}&format=json&addressdetails=1&limit={}",
            self.base_url,
            urlencoding::encode(query),
            SEARCH_LIMIT
        );

        let results: Vec<NominatimPlace> = http::get_json(&self.client, &url).await?;
        let candidates: Vec<PlaceCandidate> =
            results.into_iter().filter_map(to_candidate).collect();

        tracing::debug!("Search '{}' matched {} places", query, candidates.len());
        Ok(candidates)
    }
}

fn to_candidate(place: NominatimPlace) -> Option<PlaceCandidate> {
    let addr = place.address?;
    let city = addr.place()?;
    let region = addr.region()?;
    addr.country.as_ref().filter(|c| !c.is_empty())?;
    let country = addr
        .country_code
        .as_deref()
        .filter(|c| !c.is_empty())?
        .to_uppercase();

    let latitude = place.lat.parse::<f64>().ok()?;
    let longitude = place.lon.parse::<f64>().ok()?;
    let coordinates = Coordinates::new(latitude, longitude);

    Some(PlaceCandidate {
        timezone: estimate_timezone(longitude, &country),
        city,
        region,
        country,
        loc: coordinates.to_loc(),
        display_name: place.display_name,
    })
}
