//! Weather panel: Open-Meteo current conditions, hourly and daily forecast.

pub mod provider;
pub mod types;
pub mod view;

pub use provider::{OpenMeteoClient, WeatherSource};
pub use types::{describe_wmo_code, Forecast, WeatherCondition};
pub use view::{DayView, HourView, WeatherView};
