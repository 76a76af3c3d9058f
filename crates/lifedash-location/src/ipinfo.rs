//! Coarse location from the public IP address.

use lifedash_core::http;
use lifedash_core::FetchError;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::types::{LocationFix, UNKNOWN};

#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    #[serde(default)]
    ip: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    loc: Option<String>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    org: Option<String>,
    #[serde(default)]
    postal: Option<String>,
}

/// Client for an ipinfo.io-compatible endpoint.
#[derive(Debug, Clone)]
pub struct IpInfoClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl IpInfoClient {
    pub fn new(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    fn url(&self) -> String {
        match &self.token {
            Some(token) => format!(
                "{}/json?token={}",
                self.base_url,
                urlencoding::encode(token)
            ),
            None => format!("{}/json", self.base_url),
        }
    }

    /// Look up the caller's public IP. Missing fields become "Unknown"; a
    /// response with no usable coordinates is rejected.
    #[instrument(skip(self), level = "info")]
    pub async fn lookup(&self, default_timezone: &str) -> Result<LocationFix, FetchError> {
        let body: IpInfoResponse = http::get_json(&self.client, &self.url()).await?;

        let loc = body
            .loc
            .filter(|loc| crate::types::Coordinates::parse(loc).is_some())
            .ok_or_else(|| FetchError::UnexpectedShape("IP lookup returned no coordinates".into()))?;

        let or_unknown = |v: Option<String>| {
            v.filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string())
        };

        let fix = LocationFix {
            ip: or_unknown(body.ip),
            city: or_unknown(body.city),
            region: or_unknown(body.region),
            country: or_unknown(body.country),
            loc,
            timezone: body
                .timezone
                .filter(|tz| !tz.is_empty())
                .unwrap_or_else(|| default_timezone.to_string()),
            org: or_unknown(body.org),
            postal: body.postal.filter(|p| !p.is_empty()),
            is_accurate: false,
        };

        tracing::info!("IP location: {}, {}", fix.city, fix.country);
        Ok(fix)
    }
}
