//! Location Resolver: where is the user?
//!
//! Combines an IP lookup, an optional device fix and Nominatim geocoding
//! into one `LocationFix`, and offers forward place search for manual
//! relocation.

pub mod device;
pub mod geocode;
pub mod ipinfo;
pub mod resolver;
pub mod timezone;
pub mod types;

pub use device::{ConfiguredLocator, DeviceLocator, FixedLocator, NoDeviceLocator};
pub use geocode::Geocoder;
pub use ipinfo::IpInfoClient;
pub use resolver::LocationResolver;
pub use timezone::{country_name, estimate_timezone};
pub use types::{Coordinates, LocationFix, PlaceCandidate, ReversePlace, UNKNOWN};
