use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A public holiday as served by Nager.Date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub date: NaiveDate,
    pub local_name: String,
    pub name: String,
    pub country_code: String,
}

impl Holiday {
    pub fn new(date: NaiveDate, name: &str, country_code: &str) -> Self {
        Self {
            date,
            local_name: name.to_string(),
            name: name.to_string(),
            country_code: country_code.to_string(),
        }
    }

    /// New Year's Day of the year after `today`.
    pub fn next_new_year(today: NaiveDate, country_code: &str) -> Self {
        let date = NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).unwrap_or(NaiveDate::MAX);
        Self::new(date, "New Year's Day", country_code)
    }
}

/// Holiday codes are ISO 3166-1 alpha-2.
pub fn is_valid_country_code(code: &str) -> bool {
    code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic())
}
