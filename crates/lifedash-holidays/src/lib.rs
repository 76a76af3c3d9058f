//! Holiday countdown panel: Nager.Date public holidays with a built-in
//! fallback list.

pub mod countdown;
pub mod fallback;
pub mod provider;
pub mod types;

pub use countdown::{days_until, next_holiday, Countdown};
pub use fallback::fallback_holidays;
pub use provider::{HolidaySource, NagerClient};
pub use types::{is_valid_country_code, Holiday};
