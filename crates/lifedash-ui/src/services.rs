//! Panel backends: every load runs on its own task and reports back over an
//! mpsc channel.

use std::future::Future;
use std::sync::Arc;

use chrono::Datelike;
use lifedash_air::{AirQualityReading, AirSource, WaqiClient};
use lifedash_cache::{CachedReading, Domain, FallbackLoader, LoadError, Loaded, ReadingCache};
use lifedash_core::{http, Config, FetchError};
use lifedash_crypto::{CoinGeckoClient, CoinMarket, CryptoSource};
use lifedash_currency::{CurrencySource, HttpRateProvider, Rates};
use lifedash_holidays::{Holiday, HolidaySource, NagerClient};
use lifedash_location::LocationFix;
use lifedash_speed::{SpeedHistory, SpeedResult, SpeedTest};
use lifedash_weather::{Forecast, OpenMeteoClient, WeatherSource};
use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Panel {
    Weather,
    AirQuality,
    Crypto,
    Currency,
    Speed,
    Holidays,
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::Weather,
        Panel::AirQuality,
        Panel::Crypto,
        Panel::Currency,
        Panel::Speed,
        Panel::Holidays,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Panel::Weather => "Weather",
            Panel::AirQuality => "Air Quality",
            Panel::Crypto => "Crypto Market",
            Panel::Currency => "Currency Converter",
            Panel::Speed => "Internet Speed",
            Panel::Holidays => "Holiday Countdown",
        }
    }

    pub fn domain(&self) -> Domain {
        match self {
            Panel::Weather => Domain::Weather,
            Panel::AirQuality => Domain::AirQuality,
            Panel::Crypto => Domain::Crypto,
            Panel::Currency => Domain::Currency,
            Panel::Speed => Domain::Speed,
            Panel::Holidays => Domain::Holidays,
        }
    }

    /// Panels whose data changes with the location fix.
    pub fn follows_location(&self) -> bool {
        matches!(self, Panel::Weather | Panel::AirQuality | Panel::Holidays)
    }
}

pub type PanelResult<T> = Result<Loaded<T>, LoadError>;

/// Messages sent from panel tasks back to the dashboard
#[derive(Debug)]
pub enum PanelMessage {
    Weather(PanelResult<Forecast>),
    AirQuality(PanelResult<AirQualityReading>),
    Crypto(PanelResult<Vec<CoinMarket>>),
    Currency(PanelResult<Rates>),
    /// The speed test has no live source; only the last run is looked up
    Speed(Option<CachedReading<SpeedResult>>),
    Holidays(PanelResult<Vec<Holiday>>),
    /// The load task died before producing an outcome
    Lost(Panel),
}

impl PanelMessage {
    pub fn panel(&self) -> Panel {
        match self {
            PanelMessage::Weather(_) => Panel::Weather,
            PanelMessage::AirQuality(_) => Panel::AirQuality,
            PanelMessage::Crypto(_) => Panel::Crypto,
            PanelMessage::Currency(_) => Panel::Currency,
            PanelMessage::Speed(_) => Panel::Speed,
            PanelMessage::Holidays(_) => Panel::Holidays,
            PanelMessage::Lost(panel) => *panel,
        }
    }
}

/// Clients for every panel plus the shared fallback loader.
pub struct PanelServices {
    loader: FallbackLoader,
    weather: OpenMeteoClient,
    air: WaqiClient,
    crypto: CoinGeckoClient,
    rates: Vec<HttpRateProvider>,
    holidays: NagerClient,
    speed: SpeedTest,
    history: SpeedHistory,
    air_seed: Option<u64>,
}

impl PanelServices {
    pub fn from_config(config: &Config, cache: ReadingCache) -> Result<Self, FetchError> {
        let client = http::build_client(config.http.timeout())?;
        let endpoints = &config.endpoints;

        Ok(Self {
            loader: FallbackLoader::new(cache.clone()),
            weather: OpenMeteoClient::new(client.clone(), &endpoints.open_meteo),
            air: WaqiClient::new(client.clone(), &endpoints.waqi),
            crypto: CoinGeckoClient::new(client.clone(), &endpoints.coingecko),
            holidays: NagerClient::new(client.clone(), &endpoints.nager),
            rates: HttpRateProvider::defaults(client, endpoints),
            speed: SpeedTest::from_config(&config.speed),
            history: SpeedHistory::new(cache),
            air_seed: None,
        })
    }

    /// Fix the air-quality jitter sequence.
    pub fn with_air_seed(mut self, seed: u64) -> Self {
        self.air_seed = Some(seed);
        self
    }

    pub fn cache(&self) -> &ReadingCache {
        self.loader.cache()
    }

    pub fn speed_test(&self) -> &SpeedTest {
        &self.speed
    }

    pub fn speed_history(&self) -> &SpeedHistory {
        &self.history
    }

    /// Run one panel's loader to completion.
    pub async fn load(&self, panel: Panel, fix: &LocationFix) -> PanelMessage {
        match panel {
            Panel::Weather => {
                let source = WeatherSource::new(self.weather.clone(), fix);
                PanelMessage::Weather(self.loader.load(&source).await)
            }
            Panel::AirQuality => {
                let mut source = AirSource::new(self.air.clone(), fix);
                if let Some(seed) = self.air_seed {
                    source = source.with_seed(seed);
                }
                PanelMessage::AirQuality(self.loader.load(&source).await)
            }
            Panel::Crypto => {
                let source = CryptoSource::new(self.crypto.clone());
                PanelMessage::Crypto(self.loader.load(&source).await)
            }
            Panel::Currency => {
                let source = CurrencySource::new(self.rates.clone());
                PanelMessage::Currency(self.loader.load(&source).await)
            }
            Panel::Speed => PanelMessage::Speed(self.history.last_fresh()),
            Panel::Holidays => {
                let year = self.cache().now().year();
                let source = HolidaySource::new(self.holidays.clone(), fix.country.clone(), year);
                PanelMessage::Holidays(self.loader.load(&source).await)
            }
        }
    }
}

/// Request one panel load asynchronously.
/// Sends the panel's message on the channel when complete.
pub fn request_load(
    tx: &UnboundedSender<PanelMessage>,
    services: Arc<PanelServices>,
    panel: Panel,
    fix: LocationFix,
) {
    tracing::debug!("Loading {:?} panel", panel);
    spawn_reported(tx, panel, async move { services.load(panel, &fix).await });
}

/// Run `load` on its own task and send its message. A task that panics or
/// is cancelled still reports, as `PanelMessage::Lost`.
pub(crate) fn spawn_reported<F>(tx: &UnboundedSender<PanelMessage>, panel: Panel, load: F)
where
    F: Future<Output = PanelMessage> + Send + 'static,
{
    let tx = tx.clone();
    let task = tokio::spawn(load);
    tokio::spawn(async move {
        let message = match task.await {
            Ok(message) => message,
            Err(e) => {
                tracing::error!("{:?} panel load aborted: {}", panel, e);
                PanelMessage::Lost(panel)
            }
        };
        if tx.send(message).is_err() {
            tracing::debug!("Dashboard dropped before {:?} finished", panel);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_domains_are_distinct() {
        let mut keys: Vec<&str> = Panel::ALL.iter().map(|p| p.domain().key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), Panel::ALL.len());
    }

    #[test]
    fn test_location_dependent_panels() {
        let follows: Vec<Panel> = Panel::ALL
            .into_iter()
            .filter(Panel::follows_location)
            .collect();
        assert_eq!(follows, [Panel::Weather, Panel::AirQuality, Panel::Holidays]);
    }
}
