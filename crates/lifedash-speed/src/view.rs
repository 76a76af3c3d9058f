use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::result::{format_speed, isp_name, SpeedGrade, SpeedResult};

/// One speed figure with its grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedFigure {
    /// "85.3"
    pub mbps: String,
    pub grade: &'static str,
    pub color: &'static str,
}

impl SpeedFigure {
    fn new(mbps: f64) -> Self {
        let grade = SpeedGrade::for_speed(mbps);
        Self {
            mbps: format_speed(mbps),
            grade: grade.label(),
            color: grade.color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedView {
    pub download: SpeedFigure,
    pub upload: SpeedFigure,
    pub ping: String,
    pub jitter: String,
    pub isp: String,
    /// "May 1, 2025 08:00 UTC"
    pub last_tested: String,
}

impl SpeedView {
    pub fn new(result: &SpeedResult, org: Option<&str>, tested_at: DateTime<Utc>) -> Self {
        Self {
            download: SpeedFigure::new(result.download),
            upload: SpeedFigure::new(result.upload),
            ping: format!("{} ms", result.ping),
            jitter: format!("{} ms", result.jitter),
            isp: isp_name(org),
            last_tested: tested_at.format("%b %-d, %Y %H:%M UTC").to_string(),
        }
    }
}
