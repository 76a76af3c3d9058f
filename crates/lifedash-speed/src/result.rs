//! Simulated measurements, grading and display helpers.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// One completed run. Speeds in Mbps, latencies in ms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedResult {
    pub download: f64,
    pub upload: f64,
    pub ping: u32,
    pub jitter: f64,
}

const DOWNLOAD_FLOOR: f64 = 5.0;
const UPLOAD_FLOOR: f64 = 2.0;

/// Country multiplier applied to the base speeds.
pub fn country_factor(country: &str) -> f64 {
    match country.to_ascii_uppercase().as_str() {
        "US" => 1.5,
        "GB" => 1.3,
        "CA" => 1.2,
        "AU" => 0.9,
        "IN" => 0.7,
        "LK" => 0.6,
        _ => 1.0,
    }
}

/// Base download speed before jitter, for a country.
pub fn base_download(country: &str) -> f64 {
    50.0 * country_factor(country)
}

pub fn base_upload(country: &str) -> f64 {
    15.0 * country_factor(country)
}

impl SpeedResult {
    /// Draw a plausible result for `country`.
    pub fn simulate<R: Rng + ?Sized>(country: &str, rng: &mut R) -> Self {
        Self::with_factor(country_factor(country), rng)
    }

    pub fn with_factor<R: Rng + ?Sized>(factor: f64, rng: &mut R) -> Self {
        let download = (50.0 * factor + rng.gen_range(-15.0..15.0)).max(DOWNLOAD_FLOOR);
        let upload = (15.0 * factor + rng.gen_range(-5.0..5.0)).max(UPLOAD_FLOOR);
        let ping = (15.0 + rng.gen_range(0.0..40.0_f64)).round() as u32;
        let jitter = ((2.0 + rng.gen_range(0.0..8.0_f64)) * 10.0).round() / 10.0;

        Self {
            download,
            upload,
            ping,
            jitter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedGrade {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
}

impl SpeedGrade {
    pub fn for_speed(mbps: f64) -> Self {
        if mbps > 100.0 {
            Self::Excellent
        } else if mbps > 50.0 {
            Self::VeryGood
        } else if mbps > 25.0 {
            Self::Good
        } else if mbps > 10.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
        }
    }

    /// Green through red.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Excellent => "#16a34a",
            Self::VeryGood => "#4ade80",
            Self::Good => "#eab308",
            Self::Fair => "#f97316",
            Self::Poor => "#ef4444",
        }
    }
}

/// "85.3"
pub fn format_speed(mbps: f64) -> String {
    format!("{:.1}", mbps)
}

/// Provider name from an ipinfo `org` such as "AS15169 Google LLC": the
/// leading AS token is dropped when there is more than one token.
pub fn isp_name(org: Option<&str>) -> String {
    let org = match org.map(str::trim) {
        Some(org) if !org.is_empty() && org != "Unknown" => org,
        _ => return "Unknown ISP".to_string(),
    };
    let tokens: Vec<&str> = org.split_whitespace().collect();
    if tokens.len() > 1 {
        tokens[1..].join(" ")
    } else {
        org.to_string()
    }
}
