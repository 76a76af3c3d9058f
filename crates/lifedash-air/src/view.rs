//! Display model for the air-quality panel.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::aqi::AqiLevel;
use crate::pollutant::{Pollutant, PollutantLevel};
use crate::reading::AirQualityReading;

/// Circumference of the r=45 gauge ring, in viewBox units.
pub const GAUGE_CIRCUMFERENCE: f64 = 282.7;

const HISTORY_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantRow {
    pub pollutant: Pollutant,
    pub name: &'static str,
    pub unit: &'static str,
    pub value: f64,
    pub level: PollutantLevel,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub level: AqiLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityView {
    pub level: AqiLevel,
    pub category: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    pub recommendation: &'static str,
    pub pollutants: Vec<PollutantRow>,
    pub history: Vec<HistoryPoint>,
}

impl AirQualityView {
    pub fn from_reading(reading: &AirQualityReading, today: NaiveDate) -> Self {
        let level = reading.level;
        Self {
            level,
            category: level.category(),
            color: level.color(),
            description: level.description(),
            recommendation: level.recommendation(),
            pollutants: Pollutant::ALL
                .into_iter()
                .map(|p| {
                    let value = reading.value(p);
                    PollutantRow {
                        pollutant: p,
                        name: p.name(),
                        unit: p.unit(),
                        value,
                        level: p.level(value),
                        percent: p.percent_of_scale(value),
                    }
                })
                .collect(),
            history: history(level, today),
        }
    }

    /// `stroke-dashoffset` for the ring gauge: a full ring at level 5.
    pub fn gauge_offset(&self) -> f64 {
        gauge_offset(self.level)
    }
}

pub fn gauge_offset(level: AqiLevel) -> f64 {
    GAUGE_CIRCUMFERENCE - GAUGE_CIRCUMFERENCE * f64::from(level.value()) / 5.0
}

/// Seven days ending today, oldest first. Values vary smoothly around the
/// current level and stay within 1..=5.
pub fn history(current: AqiLevel, today: NaiveDate) -> Vec<HistoryPoint> {
    (0..HISTORY_DAYS)
        .rev()
        .map(|i| {
            let variation = (i as f64 * 0.9).sin() * 1.5;
            let value = (f64::from(current.value()) + variation).round() as i64;
            HistoryPoint {
                date: today - Duration::days(i),
                level: AqiLevel::clamped(value),
            }
        })
        .collect()
}
