//! Time-stamped cache entries, one per data domain.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use lifedash_core::StorageError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::store::KvStore;

/// The data domains that own a cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Weather,
    AirQuality,
    Crypto,
    Currency,
    Speed,
    Holidays,
}

impl Domain {
    pub const ALL: [Domain; 6] = [
        Domain::Weather,
        Domain::AirQuality,
        Domain::Crypto,
        Domain::Currency,
        Domain::Speed,
        Domain::Holidays,
    ];

    /// Fixed storage key for this domain's cached reading.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Weather => "weather-data",
            Self::AirQuality => "air-quality-data",
            Self::Crypto => "crypto-data",
            Self::Currency => "currency-rates",
            Self::Speed => "speed-test-data",
            Self::Holidays => "holiday-data",
        }
    }

    /// Maximum age at which a cached reading is still served.
    pub fn freshness_window(&self) -> Duration {
        match self {
            Self::Crypto | Self::Currency => Duration::hours(1),
            Self::Weather | Self::AirQuality => Duration::hours(6),
            Self::Speed | Self::Holidays => Duration::hours(24),
        }
    }

    /// Lower-case label used in user-facing notices.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::AirQuality => "air quality",
            Self::Crypto => "crypto",
            Self::Currency => "exchange rate",
            Self::Speed => "speed test",
            Self::Holidays => "holiday",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A payload plus the instant it was captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedReading<T> {
    pub domain: Domain,
    /// Capture time in milliseconds since the Unix epoch
    pub timestamp: i64,
    pub payload: T,
}

impl<T> CachedReading<T> {
    pub fn new(domain: Domain, captured_at: DateTime<Utc>, payload: T) -> Self {
        Self {
            domain,
            timestamp: captured_at.timestamp_millis(),
            payload,
        }
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.captured_at()
    }

    /// Accepted iff `now - captured_at < window` for this reading's domain.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.age(now) < self.domain.freshness_window()
    }
}

/// Reads and writes `CachedReading`s through a `KvStore`, judging freshness
/// against an injected clock.
#[derive(Clone)]
pub struct ReadingCache {
    store: Arc<dyn KvStore>,
    clock: Arc<dyn Clock>,
}

impl ReadingCache {
    pub fn new(store: Arc<dyn KvStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Store `payload` as the domain's latest reading, stamped with now.
    pub fn put<T: Serialize>(&self, domain: Domain, payload: &T) -> Result<(), StorageError> {
        let reading = CachedReading::new(domain, self.clock.now(), payload);
        let json = serde_json::to_string(&reading)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(domain.key(), &json)
    }

    /// The domain's reading, only if still within its freshness window.
    pub fn fresh<T: DeserializeOwned>(&self, domain: Domain) -> Option<CachedReading<T>> {
        let reading = self.latest::<T>(domain)?;
        let now = self.clock.now();
        if reading.is_fresh(now) {
            Some(reading)
        } else {
            tracing::debug!(
                "Cached {} is stale ({} min old)",
                domain,
                reading.age(now).num_minutes()
            );
            None
        }
    }

    /// The domain's reading regardless of age. Unreadable entries count as
    /// absent.
    pub fn latest<T: DeserializeOwned>(&self, domain: Domain) -> Option<CachedReading<T>> {
        let raw = match self.store.get(domain.key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Cache read for {} failed: {}", domain, e);
                return None;
            }
        };

        match serde_json::from_str::<CachedReading<T>>(&raw) {
            Ok(reading) if reading.domain == domain => Some(reading),
            Ok(_) => {
                tracing::debug!("Cached entry under {} belongs to another domain", domain);
                None
            }
            Err(e) => {
                tracing::debug!("Cached {} could not be decoded: {}", domain, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::store::MemoryStore;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap()
    }

    fn cache_with_clock() -> (ReadingCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start()));
        let cache = ReadingCache::new(Arc::new(MemoryStore::new()), clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_windows_per_domain() {
        assert_eq!(Domain::Crypto.freshness_window(), Duration::hours(1));
        assert_eq!(Domain::Currency.freshness_window(), Duration::hours(1));
        assert_eq!(Domain::Weather.freshness_window(), Duration::hours(6));
        assert_eq!(Domain::AirQuality.freshness_window(), Duration::hours(6));
        assert_eq!(Domain::Speed.freshness_window(), Duration::hours(24));
    }

    #[test]
    fn test_keys_are_distinct() {
        let mut keys: Vec<_> = Domain::ALL.iter().map(Domain::key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), Domain::ALL.len());
    }

    #[test]
    fn test_fresh_within_window() {
        let (cache, clock) = cache_with_clock();
        cache.put(Domain::Crypto, &vec![1, 2, 3]).unwrap();

        clock.advance(Duration::minutes(59));
        let reading: CachedReading<Vec<i32>> = cache.fresh(Domain::Crypto).unwrap();
        assert_eq!(reading.payload, vec![1, 2, 3]);
        assert_eq!(reading.captured_at(), start());
    }

    #[test]
    fn test_rejected_at_exact_window() {
        let (cache, clock) = cache_with_clock();
        cache.put(Domain::Crypto, &"x").unwrap();

        clock.advance(Duration::hours(1));
        assert!(cache.fresh::<String>(Domain::Crypto).is_none());
        // Still readable when age does not matter
        assert!(cache.latest::<String>(Domain::Crypto).is_some());
    }

    #[test]
    fn test_window_boundaries_for_each_domain() {
        for domain in Domain::ALL {
            let (cache, clock) = cache_with_clock();
            cache.put(domain, &42u32).unwrap();
            let window = domain.freshness_window();

            clock.set(start() + window - Duration::milliseconds(1));
            assert!(cache.fresh::<u32>(domain).is_some(), "{} just inside", domain);

            clock.set(start() + window);
            assert!(cache.fresh::<u32>(domain).is_none(), "{} at boundary", domain);
        }
    }

    #[test]
    fn test_corrupt_entry_is_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set(Domain::Weather.key(), "{not json").unwrap();
        let cache = ReadingCache::new(store, Arc::new(ManualClock::new(start())));
        assert!(cache.latest::<serde_json::Value>(Domain::Weather).is_none());
    }

    #[test]
    fn test_payload_shape_mismatch_is_absent() {
        let (cache, _) = cache_with_clock();
        cache.put(Domain::Weather, &"a string").unwrap();
        assert!(cache.fresh::<Vec<f64>>(Domain::Weather).is_none());
    }
}
