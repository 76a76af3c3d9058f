//! The three-phase test run and its 24-hour result cache.

use std::time::Duration;

use lifedash_cache::{CachedReading, Domain, ReadingCache};
use lifedash_core::{SpeedConfig, StorageError, MAX_STEP_DELAY_SCALE};
use rand::Rng;
use serde::Serialize;
use tracing::instrument;

use crate::result::SpeedResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Ping,
    Download,
    Upload,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Ping, Phase::Download, Phase::Upload];

    pub fn stage(&self) -> &'static str {
        match self {
            Phase::Ping => "Testing ping...",
            Phase::Download => "Testing download speed...",
            Phase::Upload => "Testing upload speed...",
        }
    }

    /// Inclusive progress span covered by this phase.
    pub fn span(&self) -> (u8, u8) {
        match self {
            Phase::Ping => (0, 20),
            Phase::Download => (20, 60),
            Phase::Upload => (60, 100),
        }
    }

    /// Unscaled wait between progress steps.
    pub fn step_delay(&self) -> Duration {
        match self {
            Phase::Ping => Duration::from_millis(50),
            Phase::Download | Phase::Upload => Duration::from_millis(100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub phase: Phase,
    pub percent: u8,
}

impl Progress {
    pub fn stage(&self) -> &'static str {
        self.phase.stage()
    }
}

/// Runs the simulated test. `step_delay_scale` multiplies every step delay;
/// zero runs the phases without sleeping. Scales are clamped to
/// `0..=MAX_STEP_DELAY_SCALE`.
#[derive(Debug, Clone)]
pub struct SpeedTest {
    step_delay_scale: f64,
}

impl Default for SpeedTest {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SpeedTest {
    pub fn new(step_delay_scale: f64) -> Self {
        Self {
            step_delay_scale: if step_delay_scale.is_finite() {
                step_delay_scale.clamp(0.0, MAX_STEP_DELAY_SCALE)
            } else {
                1.0
            },
        }
    }

    pub fn from_config(config: &SpeedConfig) -> Self {
        Self::new(config.step_delay_scale)
    }

    fn delay(&self, phase: Phase) -> Duration {
        phase.step_delay().mul_f64(self.step_delay_scale)
    }

    /// Walk Ping → Download → Upload, reporting every percent step through
    /// `on_progress`, then draw the result for `country`.
    #[instrument(skip(self, rng, on_progress), level = "info")]
    pub async fn run<R, F>(&self, country: &str, rng: &mut R, mut on_progress: F) -> SpeedResult
    where
        R: Rng + Send + ?Sized,
        F: FnMut(Progress) + Send,
    {
        for phase in Phase::ALL {
            let (start, end) = phase.span();
            let delay = self.delay(phase);
            tracing::debug!("{}", phase.stage());
            for percent in start..=end {
                on_progress(Progress { phase, percent });
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }

        let result = SpeedResult::simulate(country, rng);
        tracing::info!(
            "Speed test done: {:.1}/{:.1} Mbps, {} ms",
            result.download,
            result.upload,
            result.ping
        );
        result
    }
}

/// Stores completed runs under the speed-test domain.
#[derive(Clone)]
pub struct SpeedHistory {
    cache: ReadingCache,
}

impl SpeedHistory {
    pub fn new(cache: ReadingCache) -> Self {
        Self { cache }
    }

    /// The last run, if it happened within the past 24 hours.
    pub fn last_fresh(&self) -> Option<CachedReading<SpeedResult>> {
        self.cache.fresh(Domain::Speed)
    }

    pub fn record(&self, result: &SpeedResult) -> Result<(), StorageError> {
        self.cache.put(Domain::Speed, result)
    }
}
