//! The 1–5 air-quality scale.

use serde::{Deserialize, Serialize};

/// Severity on the dashboard's 1–5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum AqiLevel {
    Good = 1,
    Fair = 2,
    Moderate = 3,
    Poor = 4,
    VeryPoor = 5,
}

impl AqiLevel {
    pub const ALL: [AqiLevel; 5] = [
        AqiLevel::Good,
        AqiLevel::Fair,
        AqiLevel::Moderate,
        AqiLevel::Poor,
        AqiLevel::VeryPoor,
    ];

    /// Map a raw US-EPA style AQI (0–500) onto the 1–5 scale.
    /// Everything above 200 is "Very Poor".
    pub fn from_raw(raw: f64) -> Self {
        if raw > 200.0 {
            Self::VeryPoor
        } else if raw > 150.0 {
            Self::Poor
        } else if raw > 100.0 {
            Self::Moderate
        } else if raw > 50.0 {
            Self::Fair
        } else {
            Self::Good
        }
    }

    /// Clamp any integer into the scale.
    pub fn clamped(value: i64) -> Self {
        match value {
            i64::MIN..=1 => Self::Good,
            2 => Self::Fair,
            3 => Self::Moderate,
            4 => Self::Poor,
            _ => Self::VeryPoor,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    /// Zero-based index into the per-level tables.
    pub fn index(self) -> usize {
        usize::from(self.value()) - 1
    }

    pub fn category(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Moderate => "Moderate",
            Self::Poor => "Poor",
            Self::VeryPoor => "Very Poor",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Good => "green",
            Self::Fair => "blue",
            Self::Moderate => "yellow",
            Self::Poor => "orange",
            Self::VeryPoor => "red",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Good => {
                "Air quality is considered satisfactory, and air pollution poses little or no risk."
            }
            Self::Fair => "Air quality is acceptable; however, some pollutants may be a concern for a very small number of people.",
            Self::Moderate => "Members of sensitive groups may experience health effects. The general public is less likely to be affected.",
            Self::Poor => "Everyone may begin to experience health effects; members of sensitive groups may experience more serious effects.",
            Self::VeryPoor => "Health alert: everyone may experience more serious health effects.",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Good | Self::Fair => "Enjoy outdoor activities",
            Self::Moderate => "Sensitive groups should limit prolonged outdoor exertion",
            Self::Poor => "Everyone should limit prolonged outdoor exertion",
            Self::VeryPoor => "Avoid outdoor activities",
        }
    }
}

impl From<AqiLevel> for u8 {
    fn from(level: AqiLevel) -> Self {
        level.value()
    }
}

impl TryFrom<u8> for AqiLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=5 => Ok(Self::clamped(i64::from(value))),
            _ => Err(format!("AQI level {} outside 1-5", value)),
        }
    }
}

impl std::fmt::Display for AqiLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}
