use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::aqi::AqiLevel;
use crate::pollutant::Pollutant;

/// An air-quality snapshot: overall level plus one value per pollutant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReading {
    pub level: AqiLevel,
    /// Station AQI before mapping, when the reading came from a station
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_aqi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    pub pm25: f64,
    pub pm10: f64,
    pub o3: f64,
    pub no2: f64,
    pub so2: f64,
    pub co: f64,
}

impl AirQualityReading {
    pub fn value(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::Pm25 => self.pm25,
            Pollutant::Pm10 => self.pm10,
            Pollutant::O3 => self.o3,
            Pollutant::No2 => self.no2,
            Pollutant::So2 => self.so2,
            Pollutant::Co => self.co,
        }
    }

    /// Build a reading from a station AQI. Pollutants the station did not
    /// report are filled with the level's typical value, jittered by ±20%.
    pub fn from_station<R: Rng + ?Sized>(
        raw_aqi: f64,
        reported: impl Fn(Pollutant) -> Option<f64>,
        rng: &mut R,
    ) -> Self {
        let level = AqiLevel::from_raw(raw_aqi);
        let mut value = |p: Pollutant| {
            reported(p).unwrap_or_else(|| p.base_value(level) * rng.gen_range(0.8..=1.2))
        };

        Self {
            level,
            raw_aqi: Some(raw_aqi),
            station: None,
            pm25: value(Pollutant::Pm25),
            pm10: value(Pollutant::Pm10),
            o3: value(Pollutant::O3),
            no2: value(Pollutant::No2),
            so2: value(Pollutant::So2),
            co: value(Pollutant::Co),
        }
    }

    /// Deterministic estimate derived from the city name alone. The level
    /// stays within Good..Poor.
    pub fn estimate_for_city(city: &str) -> Self {
        let sum: u32 = city.encode_utf16().map(u32::from).sum();
        let base = sum % 4 + 1;
        let b = f64::from(base);

        Self {
            level: AqiLevel::clamped(i64::from(base)),
            raw_aqi: None,
            station: None,
            pm25: 10.0 + b * 5.0,
            pm10: 20.0 + b * 8.0,
            o3: 40.0 + b * 10.0,
            no2: 15.0 + b * 7.0,
            so2: 5.0 + b * 3.0,
            co: 300.0 + b * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_boston_estimate_is_stable() {
        // "Boston" sums to 629; 629 % 4 + 1 = 2
        let reading = AirQualityReading::estimate_for_city("Boston");
        assert_eq!(reading.level, AqiLevel::Fair);
        assert_eq!(reading.pm25, 20.0);
        assert_eq!(reading.pm10, 36.0);
        assert_eq!(reading.co, 500.0);
        assert_eq!(reading, AirQualityReading::estimate_for_city("Boston"));
    }

    #[test]
    fn test_estimate_never_very_poor() {
        for city in ["", "Unknown", "Colombo", "São Paulo", "東京", "Reykjavík"] {
            let level = AirQualityReading::estimate_for_city(city).level;
            assert!(level <= AqiLevel::Poor, "{} gave {:?}", city, level);
        }
    }

    #[test]
    fn test_reported_values_pass_through() {
        let mut rng = StdRng::seed_from_u64(7);
        let reading = AirQualityReading::from_station(
            42.0,
            |p| match p {
                Pollutant::Pm25 => Some(9.5),
                _ => None,
            },
            &mut rng,
        );
        assert_eq!(reading.level, AqiLevel::Good);
        assert_eq!(reading.pm25, 9.5);
        assert_eq!(reading.raw_aqi, Some(42.0));
    }

    #[test]
    fn test_missing_values_within_jitter_band() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let reading = AirQualityReading::from_station(175.0, |_| None, &mut rng);
            assert_eq!(reading.level, AqiLevel::Poor);
            for p in Pollutant::ALL {
                let base = p.base_value(AqiLevel::Poor);
                let v = reading.value(p);
                assert!(v >= base * 0.8 && v <= base * 1.2, "{} = {}", p.name(), v);
            }
        }
    }
}
