use serde::{Deserialize, Serialize};

pub const UNKNOWN: &str = "Unknown";

/// A coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse the `"lat,lon"` form used by IP lookups.
    pub fn parse(loc: &str) -> Option<Self> {
        let (lat, lon) = loc.split_once(',')?;
        let latitude = lat.trim().parse::<f64>().ok()?;
        let longitude = lon.trim().parse::<f64>().ok()?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        Some(Self::new(latitude, longitude))
    }

    /// Format as `"lat,lon"`.
    pub fn to_loc(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Best-effort geographic fix for the session.
///
/// Never absent: total lookup failure yields `LocationFix::unknown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub ip: String,
    pub city: String,
    pub region: String,
    /// ISO 3166 alpha-2 code, or "Unknown"
    pub country: String,
    /// `"lat,lon"`
    pub loc: String,
    pub timezone: String,
    /// ISP / autonomous-system string, e.g. "AS7922 Comcast Cable"
    pub org: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal: Option<String>,
    /// Set when the coordinates came from a device fix
    #[serde(default)]
    pub is_accurate: bool,
}

impl LocationFix {
    /// Placeholder used when every lookup failed.
    pub fn unknown(timezone: impl Into<String>) -> Self {
        Self {
            ip: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
            region: UNKNOWN.to_string(),
            country: UNKNOWN.to_string(),
            loc: "0,0".to_string(),
            timezone: timezone.into(),
            org: UNKNOWN.to_string(),
            postal: None,
            is_accurate: false,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.city == UNKNOWN && self.country == UNKNOWN
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::parse(&self.loc)
    }

    /// "City, Region", collapsing duplicates like "Singapore, Singapore".
    pub fn place_name(&self) -> String {
        if self.region.is_empty() || self.region == self.city {
            self.city.clone()
        } else {
            format!("{}, {}", self.city, self.region)
        }
    }

    /// Replace the place fields with a searched candidate, keeping the
    /// network metadata (IP, ISP) that geocoding cannot provide.
    pub fn relocate(&self, candidate: &PlaceCandidate) -> Self {
        Self {
            city: candidate.city.clone(),
            region: candidate.region.clone(),
            country: candidate.country.clone(),
            loc: candidate.loc.clone(),
            timezone: candidate.timezone.clone(),
            ..self.clone()
        }
    }
}

/// A forward-geocoding search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub city: String,
    pub region: String,
    /// Upper-cased country code
    pub country: String,
    pub loc: String,
    pub timezone: String,
    pub display_name: String,
}

/// Place names recovered from a coordinate pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReversePlace {
    pub city: Option<String>,
    pub region: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_loc() {
        let coords = Coordinates::parse("42.3601,-71.0589").unwrap();
        assert_eq!(coords.latitude, 42.3601);
        assert_eq!(coords.longitude, -71.0589);
        assert_eq!(coords.to_loc(), "42.3601,-71.0589");
    }

    #[test]
    fn test_parse_loc_rejects_garbage() {
        assert!(Coordinates::parse("").is_none());
        assert!(Coordinates::parse("42.36").is_none());
        assert!(Coordinates::parse("north,west").is_none());
        assert!(Coordinates::parse("NaN,1").is_none());
    }

    #[test]
    fn test_unknown_placeholder() {
        let fix = LocationFix::unknown("UTC");
        assert!(fix.is_unknown());
        assert_eq!(fix.coordinates(), Some(Coordinates::new(0.0, 0.0)));
        assert_eq!(fix.timezone, "UTC");
    }

    #[test]
    fn test_place_name_collapses_duplicates() {
        let mut fix = LocationFix::unknown("UTC");
        fix.city = "Singapore".into();
        fix.region = "Singapore".into();
        assert_eq!(fix.place_name(), "Singapore");

        fix.city = "Boston".into();
        fix.region = "Massachusetts".into();
        assert_eq!(fix.place_name(), "Boston, Massachusetts");
    }

    #[test]
    fn test_relocate_keeps_network_metadata() {
        let fix = LocationFix {
            ip: "203.0.113.7".into(),
            city: "Boston".into(),
            region: "Massachusetts".into(),
            country: "US".into(),
            loc: "42.3601,-71.0589".into(),
            timezone: "America/New_York".into(),
            org: "AS7922 Comcast Cable".into(),
            postal: Some("02108".into()),
            is_accurate: false,
        };
        let candidate = PlaceCandidate {
            city: "Paris".into(),
            region: "Île-de-France".into(),
            country: "FR".into(),
            loc: "48.8566,2.3522".into(),
            timezone: "Europe/Paris".into(),
            display_name: "Paris, Île-de-France, France".into(),
        };

        let moved = fix.relocate(&candidate);
        assert_eq!(moved.ip, "203.0.113.7");
        assert_eq!(moved.org, "AS7922 Comcast Cable");
        assert_eq!(moved.city, "Paris");
        assert_eq!(moved.country, "FR");
        assert_eq!(moved.timezone, "Europe/Paris");
    }
}
