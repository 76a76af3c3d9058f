//! Per-panel load state.

use chrono::{DateTime, Utc};
use lifedash_cache::{CachedReading, Domain, LoadError, Loaded, Provenance};

/// What one panel currently holds. `data` survives a failed refresh so the
/// last good payload stays on screen next to the error.
#[derive(Debug, Clone)]
pub struct PanelState<T> {
    domain: Domain,
    pub loading: bool,
    pub refreshing: bool,
    pub data: Option<T>,
    pub provenance: Option<Provenance>,
    pub notice: Option<String>,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> PanelState<T> {
    /// A panel that has not started loading yet.
    pub fn idle(domain: Domain) -> Self {
        Self {
            domain,
            loading: false,
            refreshing: false,
            data: None,
            provenance: None,
            notice: None,
            error: None,
            updated_at: None,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Mark a load as started. A panel that already shows data is
    /// refreshing rather than loading.
    pub fn begin(&mut self) {
        if self.data.is_some() {
            self.refreshing = true;
        } else {
            self.loading = true;
        }
        self.error = None;
    }

    /// The loading skeleton is shown only while nothing is available yet.
    pub fn show_skeleton(&self) -> bool {
        self.loading && self.data.is_none()
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.refreshing
    }

    fn finish(&mut self) {
        self.loading = false;
        self.refreshing = false;
    }

    /// Apply a fallback-loader outcome.
    pub fn apply(&mut self, result: Result<Loaded<T>, LoadError>) {
        self.finish();
        match result {
            Ok(loaded) => {
                self.notice = loaded.notice(self.domain);
                self.provenance = Some(loaded.provenance);
                self.updated_at = Some(loaded.captured_at);
                self.data = Some(loaded.payload);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!("{} panel failed: {}", self.domain, e);
                self.error = Some(e.user_message());
            }
        }
    }

    /// Apply a cache-only lookup. An empty slot leaves the panel empty
    /// without an error.
    pub fn apply_cached(&mut self, reading: Option<CachedReading<T>>) {
        self.finish();
        if let Some(reading) = reading {
            self.updated_at = Some(reading.captured_at());
            self.provenance = Some(Provenance::Cached);
            self.data = Some(reading.payload);
        }
    }

    /// The load ended without an outcome. Any previous data is kept.
    pub fn abort(&mut self) {
        self.finish();
        self.error = Some(format!("Failed to load {} data", self.domain.label()));
    }

    /// Store a payload produced locally just now.
    pub fn set_live(&mut self, payload: T, at: DateTime<Utc>) {
        self.finish();
        self.data = Some(payload);
        self.provenance = Some(Provenance::Live);
        self.notice = None;
        self.error = None;
        self.updated_at = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lifedash_core::FetchError;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap()
    }

    fn loaded(payload: u32, provenance: Provenance) -> Loaded<u32> {
        Loaded {
            payload,
            provenance,
            captured_at: at(),
            fetch_error: None,
        }
    }

    #[test]
    fn test_skeleton_only_without_data() {
        let mut state = PanelState::<u32>::idle(Domain::Crypto);
        assert!(!state.show_skeleton());

        state.begin();
        assert!(state.show_skeleton());

        state.apply(Ok(loaded(1, Provenance::Live)));
        assert!(!state.show_skeleton());

        state.begin();
        assert!(state.refreshing);
        assert!(!state.loading);
        assert!(!state.show_skeleton());
    }

    #[test]
    fn test_degraded_notice() {
        let mut state = PanelState::idle(Domain::Currency);
        state.begin();
        state.apply(Ok(loaded(7, Provenance::Cached)));
        assert_eq!(state.notice.as_deref(), Some("Using cached exchange rate data"));
        assert_eq!(state.updated_at, Some(at()));

        state.apply(Ok(loaded(8, Provenance::Live)));
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_error_keeps_last_data() {
        let mut state = PanelState::idle(Domain::Weather);
        state.apply(Ok(loaded(3, Provenance::Live)));
        state.begin();
        state.apply(Err(LoadError::Unavailable {
            domain: Domain::Weather,
            source: FetchError::Timeout,
        }));

        assert_eq!(state.error.as_deref(), Some("Failed to load weather data"));
        assert_eq!(state.data, Some(3));
        assert!(!state.is_busy());
    }

    #[test]
    fn test_abort_clears_busy_and_keeps_data() {
        let mut state = PanelState::idle(Domain::AirQuality);
        state.apply(Ok(loaded(2, Provenance::Live)));
        state.begin();
        state.abort();

        assert!(!state.is_busy());
        assert_eq!(state.data, Some(2));
        assert_eq!(state.error.as_deref(), Some("Failed to load air quality data"));
    }

    #[test]
    fn test_empty_cache_is_not_an_error() {
        let mut state = PanelState::<u32>::idle(Domain::Speed);
        state.begin();
        state.apply_cached(None);
        assert!(state.data.is_none());
        assert!(state.error.is_none());
        assert!(!state.loading);
    }
}
