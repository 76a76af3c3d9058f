//! Generic fetch-with-fallback-and-cache loader.
//!
//! Every panel plugs a `PanelSource` into the same ladder:
//! 1. Live fetch (cached on success)
//! 2. Cached reading within the domain's freshness window
//! 3. Synthesized estimate, when the domain can produce one
//!
//! Each tier is tried only when every tier above it is unavailable.

use std::future::Future;

use chrono::{DateTime, Utc};
use lifedash_core::FetchError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reading::{Domain, ReadingCache};

/// One data domain's inputs to the fallback ladder.
pub trait PanelSource: Send + Sync {
    type Payload: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    fn domain(&self) -> Domain;

    /// Fetch a live payload. Implementations bound the call with a timeout.
    fn fetch(&self) -> impl Future<Output = Result<Self::Payload, FetchError>> + Send;

    /// Produce a plausible payload without network or cache. Must be
    /// deterministic in its inputs where the domain allows it.
    fn synthesize(&self) -> Option<Self::Payload> {
        None
    }
}

/// Where a loaded payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Live,
    Cached,
    Estimated,
}

impl Provenance {
    /// User-visible disclaimer for degraded tiers.
    pub fn notice(&self, domain: Domain) -> Option<String> {
        match self {
            Provenance::Live => None,
            Provenance::Cached => Some(format!("Using cached {} data", domain.label())),
            Provenance::Estimated => Some(format!("Using estimated {} data", domain.label())),
        }
    }

    pub fn is_degraded(&self) -> bool {
        !matches!(self, Provenance::Live)
    }
}

#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub payload: T,
    pub provenance: Provenance,
    /// When the payload was captured (fetch time, cache stamp, or synthesis time)
    pub captured_at: DateTime<Utc>,
    /// The live-fetch failure that pushed us down the ladder, if any
    pub fetch_error: Option<FetchError>,
}

impl<T> Loaded<T> {
    pub fn notice(&self, domain: Domain) -> Option<String> {
        self.provenance.notice(domain)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        Loaded {
            payload: f(self.payload),
            provenance: self.provenance,
            captured_at: self.captured_at,
            fetch_error: self.fetch_error,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("No {domain} data available: {source}")]
    Unavailable {
        domain: Domain,
        #[source]
        source: FetchError,
    },
}

impl LoadError {
    pub fn user_message(&self) -> String {
        match self {
            LoadError::Unavailable { domain, .. } => {
                format!("Failed to load {} data", domain.label())
            }
        }
    }
}

/// Runs the fallback ladder for any `PanelSource`.
#[derive(Clone)]
pub struct FallbackLoader {
    cache: ReadingCache,
}

impl FallbackLoader {
    pub fn new(cache: ReadingCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &ReadingCache {
        &self.cache
    }

    pub async fn load<S: PanelSource>(&self, source: &S) -> Result<Loaded<S::Payload>, LoadError> {
        let domain = source.domain();

        match source.fetch().await {
            Ok(payload) => {
                tracing::info!("Loaded live {} data", domain);
                if let Err(e) = self.cache.put(domain, &payload) {
                    tracing::warn!("Failed to cache {}: {}", domain, e);
                }
                Ok(Loaded {
                    payload,
                    provenance: Provenance::Live,
                    captured_at: self.cache.now(),
                    fetch_error: None,
                })
            }
            Err(e) => {
                tracing::warn!("Live {} fetch failed: {}", domain, e);
                self.fallback(source, e)
            }
        }
    }

    /// Tiers 2 and 3 of the ladder, given the live failure.
    pub fn fallback<S: PanelSource>(
        &self,
        source: &S,
        error: FetchError,
    ) -> Result<Loaded<S::Payload>, LoadError> {
        let domain = source.domain();

        if let Some(reading) = self.cache.fresh::<S::Payload>(domain) {
            tracing::info!("Serving cached {} data", domain);
            let captured_at = reading.captured_at();
            return Ok(Loaded {
                payload: reading.payload,
                provenance: Provenance::Cached,
                captured_at,
                fetch_error: Some(error),
            });
        }

        if let Some(payload) = source.synthesize() {
            tracing::info!("Serving estimated {} data", domain);
            return Ok(Loaded {
                payload,
                provenance: Provenance::Estimated,
                captured_at: self.cache.now(),
                fetch_error: Some(error),
            });
        }

        tracing::warn!("No {} data available from any tier", domain);
        Err(LoadError::Unavailable {
            domain,
            source: error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_differ_per_tier() {
        assert_eq!(Provenance::Live.notice(Domain::Crypto), None);
        assert_eq!(
            Provenance::Cached.notice(Domain::AirQuality).as_deref(),
            Some("Using cached air quality data")
        );
        assert_eq!(
            Provenance::Estimated.notice(Domain::AirQuality).as_deref(),
            Some("Using estimated air quality data")
        );
    }

    #[test]
    fn test_load_error_message_names_domain() {
        let err = LoadError::Unavailable {
            domain: Domain::Weather,
            source: FetchError::Timeout,
        };
        assert_eq!(err.user_message(), "Failed to load weather data");
    }

    #[test]
    fn test_loaded_map_keeps_provenance() {
        let loaded = Loaded {
            payload: 2,
            provenance: Provenance::Cached,
            captured_at: Utc::now(),
            fetch_error: Some(FetchError::Timeout),
        };
        let mapped = loaded.map(|n| n * 10);
        assert_eq!(mapped.payload, 20);
        assert_eq!(mapped.provenance, Provenance::Cached);
        assert!(mapped.fetch_error.is_some());
    }
}
