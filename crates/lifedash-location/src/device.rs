//! Device geolocation.
//!
//! Platform location services sit behind `DeviceLocator`. The desktop build
//! ships two implementations: one that is always unavailable, and one that
//! reports coordinates pinned in configuration.

use std::future::Future;

use lifedash_core::{LocationConfig, LocationError};

use crate::types::Coordinates;

pub trait DeviceLocator: Send + Sync {
    fn locate(&self) -> impl Future<Output = Result<Coordinates, LocationError>> + Send;
}

/// Used when device location is disabled or unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDeviceLocator;

impl DeviceLocator for NoDeviceLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::ServiceUnavailable)
    }
}

/// Reports a fixed position, as if the device had granted a precise fix.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator {
    coordinates: Coordinates,
}

impl FixedLocator {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

impl DeviceLocator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Ok(self.coordinates)
    }
}

/// Either locator, chosen from configuration.
#[derive(Debug, Clone, Copy)]
pub enum ConfiguredLocator {
    Disabled(NoDeviceLocator),
    Fixed(FixedLocator),
}

impl ConfiguredLocator {
    pub fn from_config(config: &LocationConfig) -> Self {
        match config.device_fix() {
            Some((lat, lon)) => {
                tracing::debug!("Device location pinned at {},{}", lat, lon);
                Self::Fixed(FixedLocator::new(Coordinates::new(lat, lon)))
            }
            _ => Self::Disabled(NoDeviceLocator),
        }
    }
}

impl DeviceLocator for ConfiguredLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        match self {
            Self::Disabled(l) => l.locate().await,
            Self::Fixed(l) => l.locate().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_device_is_unavailable() {
        let err = NoDeviceLocator.locate().await.unwrap_err();
        assert!(matches!(err, LocationError::ServiceUnavailable));
    }

    #[tokio::test]
    async fn test_configured_locator_respects_enable_flag() {
        let mut config = LocationConfig {
            device_enabled: false,
            device_latitude: Some(6.9271),
            device_longitude: Some(79.8612),
            ..LocationConfig::default()
        };
        assert!(ConfiguredLocator::from_config(&config).locate().await.is_err());

        config.device_enabled = true;
        let coords = ConfiguredLocator::from_config(&config).locate().await.unwrap();
        assert_eq!(coords, Coordinates::new(6.9271, 79.8612));
    }
}
