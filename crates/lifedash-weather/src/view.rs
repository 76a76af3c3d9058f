//! Display model derived from a `Forecast`. Recomputed on every render.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::types::{describe_wmo_code, Forecast, WeatherCondition};

const HOURS_SHOWN: usize = 24;
const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentView {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub wind_speed: f64,
    pub is_day: bool,
    pub condition: WeatherCondition,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourView {
    /// Local time as reported, e.g. "2025-05-01T14:00"
    pub time: String,
    /// "2 PM"
    pub label: String,
    pub temperature: f64,
    pub precipitation_chance: Option<f64>,
    pub condition: WeatherCondition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayView {
    pub date: String,
    /// "Thu, May 1"
    pub label: String,
    pub high: f64,
    pub low: f64,
    pub condition: WeatherCondition,
    pub description: &'static str,
    /// "05:36"
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherView {
    pub current: CurrentView,
    pub hourly: Vec<HourView>,
    pub daily: Vec<DayView>,
}

impl WeatherView {
    pub fn from_forecast(forecast: &Forecast, now: DateTime<Utc>) -> Self {
        let c = &forecast.current;
        let current = CurrentView {
            temperature: c.temperature_2m,
            feels_like: c.apparent_temperature,
            humidity: c.relative_humidity_2m,
            precipitation: c.precipitation,
            wind_speed: c.wind_speed_10m,
            is_day: c.is_day != 0,
            condition: WeatherCondition::from_wmo_code(c.weather_code),
            description: describe_wmo_code(c.weather_code),
        };

        Self {
            current,
            hourly: next_hours(forecast, now),
            daily: daily_rows(forecast),
        }
    }
}

/// Up to 24 hourly entries starting at the first one strictly after `now`.
/// If none is later than `now` the slice starts at the beginning.
pub fn next_hours(forecast: &Forecast, now: DateTime<Utc>) -> Vec<HourView> {
    let Some(hourly) = &forecast.hourly else {
        return Vec::new();
    };

    let local_now = now.naive_utc() + Duration::seconds(i64::from(forecast.utc_offset_seconds));
    let start = hourly
        .time
        .iter()
        .position(|t| parse_local(t).is_some_and(|t| t > local_now))
        .unwrap_or(0);

    hourly
        .time
        .iter()
        .enumerate()
        .skip(start)
        .take(HOURS_SHOWN)
        .filter_map(|(i, time)| {
            let temperature = *hourly.temperature_2m.get(i)?;
            let code = *hourly.weather_code.get(i)?;
            Some(HourView {
                time: time.clone(),
                label: parse_local(time)
                    .map(|t| t.format("%-I %p").to_string())
                    .unwrap_or_else(|| time.clone()),
                temperature,
                precipitation_chance: hourly.precipitation_probability.get(i).copied().flatten(),
                condition: WeatherCondition::from_wmo_code(code),
            })
        })
        .collect()
}

/// One row per forecast day; days with missing columns are skipped.
pub fn daily_rows(forecast: &Forecast) -> Vec<DayView> {
    let d = &forecast.daily;
    d.time
        .iter()
        .enumerate()
        .filter_map(|(i, date)| {
            let code = *d.weather_code.get(i)?;
            Some(DayView {
                date: date.clone(),
                label: NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .map(|day| day.format("%a, %b %-d").to_string())
                    .unwrap_or_else(|_| date.clone()),
                high: *d.temperature_2m_max.get(i)?,
                low: *d.temperature_2m_min.get(i)?,
                condition: WeatherCondition::from_wmo_code(code),
                description: describe_wmo_code(code),
                sunrise: clock_time(d.sunrise.get(i)?),
                sunset: clock_time(d.sunset.get(i)?),
            })
        })
        .collect()
}

fn parse_local(time: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(time, LOCAL_FORMAT).ok()
}

fn clock_time(time: &str) -> String {
    parse_local(time)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| time.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CurrentBlock, DailyBlock, HourlyBlock};
    use chrono::TimeZone;

    fn forecast(hours: usize) -> Forecast {
        let time: Vec<String> = (0..hours)
            .map(|h| format!("2025-05-{:02}T{:02}:00", 1 + h / 24, h % 24))
            .collect();
        Forecast {
            utc_offset_seconds: -4 * 3600,
            current: CurrentBlock {
                temperature_2m: 18.4,
                apparent_temperature: 17.1,
                relative_humidity_2m: 61.0,
                precipitation: 0.2,
                weather_code: 61,
                wind_speed_10m: 12.0,
                is_day: 0,
            },
            daily: DailyBlock {
                time: vec!["2025-05-01".into(), "2025-05-02".into()],
                temperature_2m_max: vec![21.0, 23.5],
                temperature_2m_min: vec![9.0, 11.2],
                weather_code: vec![3, 95],
                sunrise: vec!["2025-05-01T05:36".into(), "2025-05-02T05:35".into()],
                sunset: vec!["2025-05-01T19:45".into(), "2025-05-02T19:46".into()],
            },
            hourly: Some(HourlyBlock {
                temperature_2m: (0..hours).map(|h| h as f64).collect(),
                precipitation_probability: (0..hours).map(|_| Some(10.0)).collect(),
                weather_code: vec![0; hours],
                time,
            }),
        }
    }

    #[test]
    fn test_current_view() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap();
        let view = WeatherView::from_forecast(&forecast(48), now);
        assert_eq!(view.current.description, "Rain");
        assert_eq!(view.current.condition, WeatherCondition::Rain);
        assert!(!view.current.is_day);
    }

    #[test]
    fn test_hourly_starts_after_local_now() {
        // 12:30 UTC is 08:30 at UTC-4, so the first shown hour is 09:00 local
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 12, 30, 0).unwrap();
        let hours = next_hours(&forecast(48), now);
        assert_eq!(hours.len(), 24);
        assert_eq!(hours[0].time, "2025-05-01T09:00");
        assert_eq!(hours[0].label, "9 AM");
        assert_eq!(hours[23].time, "2025-05-02T08:00");
    }

    #[test]
    fn test_hourly_truncates_at_end_of_data() {
        let now = Utc.with_ymd_and_hms(2025, 5, 1, 20, 0, 0).unwrap();
        // 16:00 local; 7 hours (17..23) remain
        let hours = next_hours(&forecast(24), now);
        assert_eq!(hours.len(), 7);
    }

    #[test]
    fn test_hourly_missing_block_is_empty() {
        let mut f = forecast(24);
        f.hourly = None;
        assert!(next_hours(&f, Utc::now()).is_empty());
    }

    #[test]
    fn test_daily_rows() {
        let rows = daily_rows(&forecast(24));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "Thu, May 1");
        assert_eq!(rows[0].description, "Overcast");
        assert_eq!(rows[0].sunrise, "05:36");
        assert_eq!(rows[1].description, "Thunderstorm");
        assert_eq!(rows[1].condition, WeatherCondition::Thunderstorm);
    }

    #[test]
    fn test_daily_rows_skip_ragged_columns() {
        let mut f = forecast(24);
        f.daily.temperature_2m_min.pop();
        assert_eq!(daily_rows(&f).len(), 1);
    }
}
