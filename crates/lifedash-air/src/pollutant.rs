//! Individual pollutants: typical values per AQI level and exposure bands.

use serde::{Deserialize, Serialize};

use crate::aqi::AqiLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pollutant {
    Pm25,
    Pm10,
    O3,
    No2,
    So2,
    Co,
}

/// Exposure band for a single pollutant reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollutantLevel {
    Low,
    Moderate,
    High,
}

impl PollutantLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Low => "green",
            Self::Moderate => "yellow",
            Self::High => "red",
        }
    }
}

impl Pollutant {
    pub const ALL: [Pollutant; 6] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::O3,
        Pollutant::No2,
        Pollutant::So2,
        Pollutant::Co,
    ];

    /// Key used by WAQI's `iaqi` map.
    pub fn key(self) -> &'static str {
        match self {
            Self::Pm25 => "pm25",
            Self::Pm10 => "pm10",
            Self::O3 => "o3",
            Self::No2 => "no2",
            Self::So2 => "so2",
            Self::Co => "co",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
            Self::O3 => "O3",
            Self::No2 => "NO2",
            Self::So2 => "SO2",
            Self::Co => "CO",
        }
    }

    pub fn unit(self) -> &'static str {
        "μg/m³"
    }

    pub fn info(self) -> &'static str {
        match self {
            Self::Pm25 | Self::Pm10 => "Fine particulate matter that can penetrate deep into lungs",
            Self::O3 => "Can cause respiratory issues and lung damage",
            Self::No2 => "Nitrogen dioxide from vehicle emissions and industry",
            Self::So2 => "Sulfur dioxide from burning fossil fuels",
            Self::Co => "Carbon monoxide from incomplete combustion",
        }
    }

    /// Typical concentration at each AQI level, Good through Very Poor.
    fn base_values(self) -> [f64; 5] {
        match self {
            Self::Pm25 => [5.0, 15.0, 35.0, 75.0, 150.0],
            Self::Pm10 => [15.0, 40.0, 80.0, 150.0, 300.0],
            Self::O3 => [30.0, 60.0, 100.0, 140.0, 200.0],
            Self::No2 => [20.0, 40.0, 80.0, 120.0, 200.0],
            Self::So2 => [10.0, 30.0, 60.0, 100.0, 150.0],
            Self::Co => [1000.0, 2000.0, 4000.0, 8000.0, 12000.0],
        }
    }

    pub fn base_value(self, level: AqiLevel) -> f64 {
        self.base_values()[level.index()]
    }

    /// (moderate, high) thresholds; a value must exceed them strictly.
    fn thresholds(self) -> (f64, f64) {
        match self {
            Self::Pm25 => (12.0, 35.0),
            Self::Pm10 => (54.0, 150.0),
            Self::O3 => (70.0, 100.0),
            Self::No2 => (53.0, 100.0),
            Self::So2 => (35.0, 75.0),
            Self::Co => (4000.0, 9000.0),
        }
    }

    pub fn level(self, value: f64) -> PollutantLevel {
        let (moderate, high) = self.thresholds();
        if value > high {
            PollutantLevel::High
        } else if value > moderate {
            PollutantLevel::Moderate
        } else {
            PollutantLevel::Low
        }
    }

    /// Value that fills the progress bar.
    fn full_scale(self) -> f64 {
        match self {
            Self::Pm25 => 50.0,
            Self::Pm10 => 150.0,
            Self::O3 | Self::No2 => 120.0,
            Self::So2 => 100.0,
            Self::Co => 10000.0,
        }
    }

    /// Bar fill in percent, capped at 100.
    pub fn percent_of_scale(self, value: f64) -> f64 {
        (value / self.full_scale() * 100.0).clamp(0.0, 100.0)
    }
}
