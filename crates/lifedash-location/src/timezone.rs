//! Country lookups and rough timezone estimation.

const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("US", "United States"),
    ("GB", "United Kingdom"),
    ("CA", "Canada"),
    ("AU", "Australia"),
    ("DE", "Germany"),
    ("FR", "France"),
    ("IT", "Italy"),
    ("ES", "Spain"),
    ("JP", "Japan"),
    ("CN", "China"),
    ("IN", "India"),
    ("BR", "Brazil"),
    ("RU", "Russia"),
    ("ZA", "South Africa"),
    ("MX", "Mexico"),
    ("AR", "Argentina"),
    ("NL", "Netherlands"),
    ("BE", "Belgium"),
    ("SE", "Sweden"),
    ("NO", "Norway"),
    ("DK", "Denmark"),
    ("FI", "Finland"),
    ("PL", "Poland"),
    ("AT", "Austria"),
    ("CH", "Switzerland"),
    ("NZ", "New Zealand"),
    ("SG", "Singapore"),
    ("MY", "Malaysia"),
    ("TH", "Thailand"),
    ("ID", "Indonesia"),
    ("PH", "Philippines"),
    ("VN", "Vietnam"),
    ("TR", "Turkey"),
    ("SA", "Saudi Arabia"),
    ("AE", "United Arab Emirates"),
    ("EG", "Egypt"),
    ("NG", "Nigeria"),
    ("KE", "Kenya"),
    ("IL", "Israel"),
    ("KR", "South Korea"),
    ("TW", "Taiwan"),
    ("HK", "Hong Kong"),
    ("LK", "Sri Lanka"),
    ("PK", "Pakistan"),
    ("BD", "Bangladesh"),
    ("NP", "Nepal"),
];

const COUNTRY_TIMEZONES: &[(&str, &str)] = &[
    ("US", "America/New_York"),
    ("CA", "America/Toronto"),
    ("GB", "Europe/London"),
    ("DE", "Europe/Berlin"),
    ("FR", "Europe/Paris"),
    ("IT", "Europe/Rome"),
    ("ES", "Europe/Madrid"),
    ("JP", "Asia/Tokyo"),
    ("CN", "Asia/Shanghai"),
    ("IN", "Asia/Kolkata"),
    ("AU", "Australia/Sydney"),
    ("RU", "Europe/Moscow"),
    ("BR", "America/Sao_Paulo"),
    ("ZA", "Africa/Johannesburg"),
    ("MX", "America/Mexico_City"),
    ("AR", "America/Argentina/Buenos_Aires"),
    ("NL", "Europe/Amsterdam"),
    ("BE", "Europe/Brussels"),
    ("SE", "Europe/Stockholm"),
    ("NO", "Europe/Oslo"),
    ("DK", "Europe/Copenhagen"),
    ("FI", "Europe/Helsinki"),
    ("PL", "Europe/Warsaw"),
    ("AT", "Europe/Vienna"),
    ("CH", "Europe/Zurich"),
    ("NZ", "Pacific/Auckland"),
    ("SG", "Asia/Singapore"),
    ("MY", "Asia/Kuala_Lumpur"),
    ("TH", "Asia/Bangkok"),
    ("ID", "Asia/Jakarta"),
    ("PH", "Asia/Manila"),
    ("VN", "Asia/Ho_Chi_Minh"),
    ("TR", "Europe/Istanbul"),
    ("SA", "Asia/Riyadh"),
    ("AE", "Asia/Dubai"),
    ("EG", "Africa/Cairo"),
    ("NG", "Africa/Lagos"),
    ("KE", "Africa/Nairobi"),
    ("IL", "Asia/Jerusalem"),
    ("KR", "Asia/Seoul"),
    ("TW", "Asia/Taipei"),
    ("HK", "Asia/Hong_Kong"),
    ("LK", "Asia/Colombo"),
    ("PK", "Asia/Karachi"),
    ("BD", "Asia/Dhaka"),
    ("NP", "Asia/Kathmandu"),
];

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, v)| *v)
}

/// Display name for a country code, falling back to the code itself.
pub fn country_name(code: &str) -> String {
    lookup(COUNTRY_NAMES, code)
        .map(str::to_string)
        .unwrap_or_else(|| code.to_string())
}

/// Representative IANA zone for a country, if known.
pub fn country_timezone(code: &str) -> Option<&'static str> {
    lookup(COUNTRY_TIMEZONES, code)
}

/// Offset-only zone from longitude: 15 degrees per hour, e.g. `UTC+05:00`.
pub fn timezone_from_longitude(longitude: f64) -> String {
    let offset = (longitude / 15.0).round() as i64;
    let sign = if offset >= 0 { '+' } else { '-' };
    format!("UTC{}{:02}:00", sign, offset.abs())
}

/// Country zone when known, otherwise the longitude estimate.
pub fn estimate_timezone(longitude: f64, country_code: &str) -> String {
    country_timezone(country_code)
        .map(str::to_string)
        .unwrap_or_else(|| timezone_from_longitude(longitude))
}

/// Best guess at the host's zone name for the placeholder fix.
pub fn local_timezone_name() -> String {
    std::env::var("TZ")
        .ok()
        .map(|tz| tz.trim_start_matches(':').to_string())
        .filter(|tz| !tz.is_empty())
        .unwrap_or_else(|| "UTC".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_name_fallback() {
        assert_eq!(country_name("LK"), "Sri Lanka");
        assert_eq!(country_name("lk"), "Sri Lanka");
        assert_eq!(country_name("ZZ"), "ZZ");
    }

    #[test]
    fn test_country_timezone_preferred() {
        assert_eq!(estimate_timezone(-71.06, "US"), "America/New_York");
    }

    #[test]
    fn test_longitude_estimate() {
        assert_eq!(timezone_from_longitude(0.0), "UTC+00:00");
        assert_eq!(timezone_from_longitude(79.86), "UTC+05:00");
        assert_eq!(timezone_from_longitude(-122.33), "UTC-08:00");
        assert_eq!(estimate_timezone(151.2, "XX"), "UTC+10:00");
    }

    #[test]
    fn test_small_negative_longitude_rounds_to_zero() {
        // -0.12 / 15 rounds to -0, which must not print as "-00"
        assert_eq!(timezone_from_longitude(-0.12), "UTC+00:00");
    }
}
