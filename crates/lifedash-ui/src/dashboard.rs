//! Dashboard orchestration: one location fix, one state per panel.
//!
//! Panel loads are independent tasks. Their messages are applied in arrival
//! order, so when two loads for the same panel overlap the one that finishes
//! last wins.

use std::sync::Arc;

use lifedash_air::AirQualityReading;
use lifedash_cache::Favorites;
use lifedash_core::StorageError;
use lifedash_crypto::CoinMarket;
use lifedash_currency::{default_target, Conversion, Rates};
use lifedash_holidays::Holiday;
use lifedash_location::{LocationFix, PlaceCandidate};
use lifedash_speed::{Progress, SpeedResult};
use lifedash_weather::Forecast;
use rand::Rng;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::services::{request_load, Panel, PanelMessage, PanelServices};
use crate::state::PanelState;

pub struct Dashboard {
    services: Arc<PanelServices>,
    fix: Option<LocationFix>,
    pub weather: PanelState<Forecast>,
    pub air: PanelState<AirQualityReading>,
    pub crypto: PanelState<Vec<CoinMarket>>,
    pub currency: PanelState<Rates>,
    pub speed: PanelState<SpeedResult>,
    pub holidays: PanelState<Vec<Holiday>>,
    pub speed_progress: Option<Progress>,
    favorites: Favorites,
    conversion: Conversion,
    holidays_enabled: bool,
    in_flight: usize,
    tx: UnboundedSender<PanelMessage>,
    rx: UnboundedReceiver<PanelMessage>,
}

impl Dashboard {
    pub fn new(services: Arc<PanelServices>, favorites: Favorites, default_from: &str) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            services,
            fix: None,
            weather: PanelState::idle(Panel::Weather.domain()),
            air: PanelState::idle(Panel::AirQuality.domain()),
            crypto: PanelState::idle(Panel::Crypto.domain()),
            currency: PanelState::idle(Panel::Currency.domain()),
            speed: PanelState::idle(Panel::Speed.domain()),
            holidays: PanelState::idle(Panel::Holidays.domain()),
            speed_progress: None,
            favorites,
            conversion: Conversion::new(1.0, default_from, lifedash_currency::catalog::DEFAULT_TO),
            holidays_enabled: false,
            in_flight: 0,
            tx,
            rx,
        }
    }

    /// Include the holiday countdown panel.
    pub fn with_holidays(mut self, enabled: bool) -> Self {
        self.holidays_enabled = enabled;
        self
    }

    pub fn location(&self) -> Option<&LocationFix> {
        self.fix.as_ref()
    }

    /// Install the resolved fix. The conversion target follows the country's
    /// currency.
    pub fn set_location(&mut self, fix: LocationFix) {
        self.conversion.to = default_target(&fix.country).to_string();
        self.fix = Some(fix);
    }

    pub fn panels(&self) -> Vec<Panel> {
        Panel::ALL
            .into_iter()
            .filter(|p| *p != Panel::Holidays || self.holidays_enabled)
            .collect()
    }

    pub fn is_enabled(&self, panel: Panel) -> bool {
        panel != Panel::Holidays || self.holidays_enabled
    }

    /// Start every enabled panel. Nothing loads before a fix exists.
    pub fn load_all(&mut self) -> usize {
        if self.fix.is_none() {
            tracing::warn!("load_all called before the location was resolved");
            return 0;
        }
        let panels = self.panels();
        panels.iter().filter(|p| self.refresh(**p)).count()
    }

    /// Re-run one panel's loader. Returns false when the panel cannot load
    /// yet or is disabled.
    pub fn refresh(&mut self, panel: Panel) -> bool {
        if !self.is_enabled(panel) {
            return false;
        }
        let Some(fix) = self.fix.clone() else {
            return false;
        };

        self.begin(panel);
        self.in_flight += 1;
        request_load(&self.tx, Arc::clone(&self.services), panel, fix);
        true
    }

    /// Replace the fix with a searched place and reload what depends on it.
    pub fn relocate(&mut self, candidate: &PlaceCandidate) -> usize {
        let fix = match &self.fix {
            Some(current) => current.relocate(candidate),
            None => LocationFix::unknown(candidate.timezone.clone()).relocate(candidate),
        };
        tracing::info!("Relocated to {}", fix.place_name());
        self.set_location(fix);

        Panel::ALL
            .into_iter()
            .filter(Panel::follows_location)
            .filter(|p| self.refresh(*p))
            .count()
    }

    fn begin(&mut self, panel: Panel) {
        match panel {
            Panel::Weather => self.weather.begin(),
            Panel::AirQuality => self.air.begin(),
            Panel::Crypto => self.crypto.begin(),
            Panel::Currency => self.currency.begin(),
            Panel::Speed => self.speed.begin(),
            Panel::Holidays => self.holidays.begin(),
        }
    }

    /// Apply one panel message.
    pub fn apply(&mut self, message: PanelMessage) -> Panel {
        let panel = message.panel();
        match message {
            PanelMessage::Weather(result) => self.weather.apply(result),
            PanelMessage::AirQuality(result) => self.air.apply(result),
            PanelMessage::Crypto(result) => self.crypto.apply(result),
            PanelMessage::Currency(result) => self.currency.apply(result),
            PanelMessage::Speed(reading) => self.speed.apply_cached(reading),
            PanelMessage::Holidays(result) => self.holidays.apply(result),
            PanelMessage::Lost(panel) => self.abort(panel),
        }
        panel
    }

    fn abort(&mut self, panel: Panel) {
        match panel {
            Panel::Weather => self.weather.abort(),
            Panel::AirQuality => self.air.abort(),
            Panel::Crypto => self.crypto.abort(),
            Panel::Currency => self.currency.abort(),
            Panel::Speed => self.speed.abort(),
            Panel::Holidays => self.holidays.abort(),
        }
    }

    /// Wait for the next panel to finish and apply it.
    pub async fn next(&mut self) -> Option<Panel> {
        if self.in_flight == 0 {
            return None;
        }
        let message = self.rx.recv().await?;
        self.in_flight -= 1;
        Some(self.apply(message))
    }

    /// Wait until every started load has been applied.
    pub async fn settle(&mut self) {
        while self.next().await.is_some() {}
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn toggle_favorite(&mut self, coin_id: &str) -> Result<bool, StorageError> {
        self.favorites.toggle(coin_id)
    }

    pub fn conversion(&self) -> &Conversion {
        &self.conversion
    }

    pub fn conversion_mut(&mut self) -> &mut Conversion {
        &mut self.conversion
    }

    /// Run the simulated speed test for the current country and cache the
    /// result. `on_progress` sees every step.
    pub async fn run_speed_test<R, F>(&mut self, rng: &mut R, mut on_progress: F) -> SpeedResult
    where
        R: Rng + Send + ?Sized,
        F: FnMut(Progress) + Send,
    {
        let services = Arc::clone(&self.services);
        let country = self
            .fix
            .as_ref()
            .map(|f| f.country.clone())
            .unwrap_or_default();

        self.speed.begin();
        let progress = &mut self.speed_progress;
        let result = services
            .speed_test()
            .run(&country, rng, |p| {
                *progress = Some(p);
                on_progress(p);
            })
            .await;
        self.speed_progress = None;

        if let Err(e) = services.speed_history().record(&result) {
            tracing::warn!("Failed to cache speed test result: {}", e);
        }
        self.speed.set_live(result, services.cache().now());
        result
    }
}
