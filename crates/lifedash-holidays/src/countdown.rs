use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::fallback::fallback_holidays;
use crate::types::Holiday;

/// The countdown ring assumes at most 100 days to go.
const RING_DAYS: f64 = 100.0;

/// First holiday on or after `today`, by date.
pub fn next_holiday(holidays: &[Holiday], today: NaiveDate) -> Option<&Holiday> {
    holidays
        .iter()
        .filter(|h| h.date >= today)
        .min_by_key(|h| h.date)
}

/// Whole days from `today` until `date`. Dates are calendar days, so the
/// difference is already the rounded-up count.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Countdown {
    pub holiday: Holiday,
    pub days_remaining: i64,
    /// True when the holiday came from the built-in list rather than the
    /// given one
    pub from_fallback: bool,
}

impl Countdown {
    /// Countdown to the next holiday in `holidays`. When none is upcoming,
    /// the built-in list for `country` is tried, then next New Year's Day.
    pub fn compute(holidays: &[Holiday], country: &str, today: NaiveDate) -> Self {
        if let Some(holiday) = next_holiday(holidays, today) {
            return Self::new(holiday.clone(), today, false);
        }

        let builtin = fallback_holidays(country, today.year());
        let holiday = next_holiday(&builtin, today)
            .cloned()
            .unwrap_or_else(|| Holiday::next_new_year(today, country));
        Self::new(holiday, today, true)
    }

    fn new(holiday: Holiday, today: NaiveDate, from_fallback: bool) -> Self {
        let days_remaining = days_until(holiday.date, today);
        Self {
            holiday,
            days_remaining,
            from_fallback,
        }
    }

    /// Ring fill, 0–100: fuller as the day approaches.
    pub fn progress(&self) -> f64 {
        (100.0 - self.days_remaining as f64 / RING_DAYS * 100.0).clamp(0.0, 100.0)
    }

    pub fn is_today(&self) -> bool {
        self.days_remaining == 0
    }

    /// "Thursday, December 25"
    pub fn date_text(&self) -> String {
        self.holiday.date.format("%A, %B %-d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn list() -> Vec<Holiday> {
        vec![
            Holiday::new(date(2025, 1, 1), "New Year's Day", "LK"),
            Holiday::new(date(2025, 5, 12), "Vesak Full Moon Poya Day", "LK"),
            Holiday::new(date(2025, 12, 25), "Christmas Day", "LK"),
        ]
    }

    #[test]
    fn test_next_holiday_on_or_after_today() {
        let holidays = list();
        let next = next_holiday(&holidays, date(2025, 5, 12)).unwrap();
        assert_eq!(next.name, "Vesak Full Moon Poya Day");

        let next = next_holiday(&holidays, date(2025, 5, 13)).unwrap();
        assert_eq!(next.name, "Christmas Day");
    }

    #[test]
    fn test_countdown_from_list() {
        let countdown = Countdown::compute(&list(), "LK", date(2025, 5, 1));
        assert_eq!(countdown.days_remaining, 11);
        assert!(!countdown.from_fallback);
        assert_eq!(countdown.progress(), 89.0);
        assert_eq!(countdown.date_text(), "Monday, May 12");
    }

    #[test]
    fn test_holiday_today() {
        let countdown = Countdown::compute(&list(), "LK", date(2025, 12, 25));
        assert!(countdown.is_today());
        assert_eq!(countdown.progress(), 100.0);
    }

    #[test]
    fn test_exhausted_list_uses_builtin() {
        let countdown = Countdown::compute(&list(), "GB", date(2025, 12, 26));
        assert!(countdown.from_fallback);
        assert_eq!(countdown.holiday.name, "Boxing Day");
        assert_eq!(countdown.days_remaining, 0);
    }

    #[test]
    fn test_nothing_upcoming_is_next_new_year() {
        let countdown = Countdown::compute(&[], "US", date(2025, 12, 28));
        assert_eq!(countdown.holiday.name, "New Year's Day");
        assert_eq!(countdown.holiday.date, date(2026, 1, 1));
        assert_eq!(countdown.days_remaining, 4);
        assert!(countdown.from_fallback);
    }

    #[test]
    fn test_far_holiday_progress_clamped() {
        let countdown = Countdown::compute(&list(), "LK", date(2025, 5, 13));
        assert_eq!(countdown.days_remaining, 226);
        assert_eq!(countdown.progress(), 0.0);
    }
}
