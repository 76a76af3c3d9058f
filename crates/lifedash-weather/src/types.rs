use serde::{Deserialize, Serialize};

/// Weather condition categories mapped from WMO codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Convert WMO weather code to WeatherCondition
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=3 => Self::Cloudy,
            45..=48 => Self::Fog,
            51..=67 => Self::Rain,
            71..=86 => Self::Snow,
            95..=99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Clear => "sun",
            Self::Cloudy | Self::Unknown => "cloud",
            Self::Fog => "cloud_fog",
            Self::Rain => "cloud_rain",
            Self::Snow => "cloud_snow",
            Self::Thunderstorm => "cloud_lightning",
        }
    }

    /// Single-glyph marker for terminal output.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀",
            Self::Cloudy | Self::Unknown => "☁",
            Self::Fog => "≋",
            Self::Rain => "☂",
            Self::Snow => "❄",
            Self::Thunderstorm => "⚡",
        }
    }
}

/// Human-readable text for a WMO code. Finer-grained than
/// `WeatherCondition`, which only picks the icon.
pub fn describe_wmo_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45..=48 => "Fog",
        51..=55 => "Light drizzle",
        56..=57 => "Freezing drizzle",
        61..=65 => "Rain",
        66..=67 => "Freezing rain",
        71..=75 => "Snow",
        77 => "Snow grains",
        80..=82 => "Rain showers",
        85..=86 => "Snow showers",
        95 => "Thunderstorm",
        96..=99 => "Thunderstorm with hail",
        _ => "Unknown",
    }
}

/// Open-Meteo forecast payload, stored as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Offset of the requested timezone; all times below are local to it
    #[serde(default)]
    pub utc_offset_seconds: i32,
    pub current: CurrentBlock,
    pub daily: DailyBlock,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hourly: Option<HourlyBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentBlock {
    pub temperature_2m: f64,
    pub apparent_temperature: f64,
    pub relative_humidity_2m: f64,
    pub precipitation: f64,
    pub weather_code: i32,
    pub wind_speed_10m: f64,
    #[serde(default = "default_is_day")]
    pub is_day: u8,
}

fn default_is_day() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBlock {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub weather_code: Vec<i32>,
    pub sunrise: Vec<String>,
    pub sunset: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyBlock {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    /// Open-Meteo reports null for hours beyond its precipitation model
    pub precipitation_probability: Vec<Option<f64>>,
    pub weather_code: Vec<i32>,
}
