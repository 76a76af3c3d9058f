//! Render-ready snapshot of the dashboard. Derived on every render and
//! never stored.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use lifedash_air::AirQualityView;
use lifedash_cache::Provenance;
use lifedash_crypto::CryptoView;
use lifedash_currency::{currency, Conversion, Rates};
use lifedash_holidays::Countdown;
use lifedash_location::{country_name, LocationFix};
use lifedash_speed::SpeedView;
use lifedash_weather::WeatherView;
use serde::Serialize;

use crate::dashboard::Dashboard;
use crate::services::Panel;
use crate::state::PanelState;

/// One panel's chrome plus its derived body.
#[derive(Debug, Clone, Serialize)]
pub struct PanelView<V> {
    pub panel: Panel,
    pub title: &'static str,
    pub skeleton: bool,
    pub refreshing: bool,
    pub notice: Option<String>,
    pub error: Option<String>,
    /// "08:00 UTC"
    pub updated: Option<String>,
    pub body: Option<V>,
}

impl<V> PanelView<V> {
    fn from_state<T>(panel: Panel, state: &PanelState<T>, derive: impl FnOnce(&T) -> V) -> Self {
        Self {
            panel,
            title: panel.title(),
            skeleton: state.show_skeleton(),
            refreshing: state.refreshing,
            notice: state.notice.clone(),
            error: state.error.clone(),
            updated: state.updated_at.map(|t| t.format("%H:%M UTC").to_string()),
            body: state.data.as_ref().map(derive),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationView {
    /// "Boston, Massachusetts"
    pub place: String,
    pub country: String,
    pub ip: String,
    pub isp: String,
    pub timezone: String,
    pub coordinates: String,
    pub accurate: bool,
}

impl LocationView {
    pub fn new(fix: &LocationFix) -> Self {
        Self {
            place: format!("{}, {}", fix.city, fix.region),
            country: country_name(&fix.country),
            ip: fix.ip.clone(),
            isp: lifedash_speed::isp_name(Some(&fix.org)),
            timezone: fix.timezone.clone(),
            coordinates: fix.loc.clone(),
            accurate: fix.is_accurate,
        }
    }
}

/// The header clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockView {
    /// "09:41:05 AM"
    pub time: String,
    /// "Thu, May 1"
    pub date: String,
}

impl ClockView {
    pub fn at(now: DateTime<FixedOffset>) -> Self {
        Self {
            time: now.format("%I:%M:%S %p").to_string(),
            date: now.format("%a, %b %-d").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyView {
    pub from: String,
    pub from_name: String,
    pub to: String,
    pub to_name: String,
    /// "100 USD = 93 EUR"
    pub summary: String,
    /// "1 USD = 0.930000 EUR"
    pub unit_summary: String,
}

impl CurrencyView {
    pub fn new(conversion: &Conversion, rates: &Rates) -> Self {
        let name = |code: &str| currency(code).map_or_else(|| code.to_string(), |c| c.name.to_string());
        Self {
            from: conversion.from.clone(),
            from_name: name(&conversion.from),
            to: conversion.to.clone(),
            to_name: name(&conversion.to),
            summary: conversion.summary(rates),
            unit_summary: conversion.unit_summary(rates),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HolidayView {
    pub name: String,
    pub local_name: String,
    /// "Thursday, December 25"
    pub date: String,
    pub days_remaining: i64,
    pub progress: f64,
    pub from_fallback: bool,
}

impl HolidayView {
    fn new(countdown: &Countdown) -> Self {
        Self {
            name: countdown.holiday.name.clone(),
            local_name: countdown.holiday.local_name.clone(),
            date: countdown.date_text(),
            days_remaining: countdown.days_remaining,
            progress: countdown.progress(),
            from_fallback: countdown.from_fallback,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub clock: ClockView,
    pub location: Option<LocationView>,
    pub weather: PanelView<WeatherView>,
    pub air: PanelView<AirQualityView>,
    pub crypto: PanelView<CryptoView>,
    pub currency: PanelView<CurrencyView>,
    pub speed: PanelView<SpeedView>,
    pub speed_progress: Option<(String, u8)>,
    pub holidays: Option<PanelView<HolidayView>>,
}

impl DashboardView {
    /// Snapshot `dashboard` as seen at `now`, with the clock shown at
    /// `offset` from UTC.
    pub fn build(dashboard: &Dashboard, now: DateTime<Utc>, offset: FixedOffset) -> Self {
        let today: NaiveDate = now.with_timezone(&offset).date_naive();
        let fix = dashboard.location();
        let country = fix.map(|f| f.country.clone()).unwrap_or_default();
        let org = fix.map(|f| f.org.clone());
        let favorites = dashboard.favorites().ids().to_vec();
        let conversion = dashboard.conversion().clone();

        Self {
            clock: ClockView::at(now.with_timezone(&offset)),
            location: fix.map(LocationView::new),
            weather: PanelView::from_state(Panel::Weather, &dashboard.weather, |f| {
                WeatherView::from_forecast(f, now)
            }),
            air: PanelView::from_state(Panel::AirQuality, &dashboard.air, |r| {
                AirQualityView::from_reading(r, today)
            }),
            crypto: PanelView::from_state(Panel::Crypto, &dashboard.crypto, |coins| {
                CryptoView::new(coins, &favorites)
            }),
            currency: PanelView::from_state(Panel::Currency, &dashboard.currency, |rates| {
                CurrencyView::new(&conversion, rates)
            }),
            speed: PanelView::from_state(Panel::Speed, &dashboard.speed, |result| {
                let tested_at = dashboard.speed.updated_at.unwrap_or(now);
                SpeedView::new(result, org.as_deref(), tested_at)
            }),
            speed_progress: dashboard
                .speed_progress
                .map(|p| (p.stage().to_string(), p.percent)),
            holidays: dashboard.is_enabled(Panel::Holidays).then(|| {
                let estimated = dashboard.holidays.provenance == Some(Provenance::Estimated);
                PanelView::from_state(Panel::Holidays, &dashboard.holidays, |list| {
                    let mut view = HolidayView::new(&Countdown::compute(list, &country, today));
                    view.from_fallback |= estimated;
                    view
                })
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_clock_format() {
        let offset = FixedOffset::east_opt(-4 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2025, 5, 1, 21, 41, 5).unwrap();
        let clock = ClockView::at(now);
        assert_eq!(clock.time, "09:41:05 PM");
        assert_eq!(clock.date, "Thu, May 1");
    }

    #[test]
    fn test_location_view() {
        let fix = LocationFix {
            ip: "203.0.113.9".into(),
            city: "Colombo".into(),
            region: "Western Province".into(),
            country: "LK".into(),
            loc: "6.9271,79.8612".into(),
            timezone: "Asia/Colombo".into(),
            org: "AS9329 Sri Lanka Telecom".into(),
            postal: None,
            is_accurate: true,
        };
        let view = LocationView::new(&fix);
        assert_eq!(view.place, "Colombo, Western Province");
        assert_eq!(view.country, "Sri Lanka");
        assert_eq!(view.isp, "Sri Lanka Telecom");
        assert!(view.accurate);
    }

    #[test]
    fn test_currency_view() {
        let mut rates = Rates::new();
        rates.insert("USD".into(), 1.0);
        rates.insert("EUR".into(), 0.93);
        let view = CurrencyView::new(&Conversion::new(100.0, "USD", "EUR"), &rates);
        assert_eq!(view.summary, "100 USD = 93 EUR");
        assert_eq!(view.from_name, "US Dollar");
        assert_eq!(view.to_name, "Euro");
    }

    #[test]
    fn test_panel_view_chrome() {
        let mut state = PanelState::idle(Panel::Crypto.domain());
        state.begin();
        let view = PanelView::from_state(Panel::Crypto, &state, |v: &u32| *v);
        assert!(view.skeleton);
        assert!(view.body.is_none());

        state.apply(Ok(lifedash_cache::Loaded {
            payload: 4,
            provenance: Provenance::Estimated,
            captured_at: Utc.with_ymd_and_hms(2025, 5, 1, 8, 5, 0).unwrap(),
            fetch_error: None,
        }));
        let view = PanelView::from_state(Panel::Crypto, &state, |v: &u32| v * 2);
        assert_eq!(view.body, Some(8));
        assert_eq!(view.updated.as_deref(), Some("08:05 UTC"));
        assert_eq!(view.notice.as_deref(), Some("Using estimated crypto data"));
    }
}
