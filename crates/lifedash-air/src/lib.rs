//! Air-quality panel: WAQI station feed, 1–5 AQI scale, pollutant bands
//! and a deterministic city-based estimate for offline use.

pub mod aqi;
pub mod pollutant;
pub mod provider;
pub mod reading;
pub mod view;

pub use aqi::AqiLevel;
pub use pollutant::{Pollutant, PollutantLevel};
pub use provider::{AirSource, StationFeed, WaqiClient};
pub use reading::AirQualityReading;
pub use view::{AirQualityView, HistoryPoint, PollutantRow, GAUGE_CIRCUMFERENCE};
