//! Centralized error types for LifeDash.
//!
//! Every panel absorbs its own failures, so these types rarely reach the
//! user as-is. They exist to:
//! - Classify failures precisely (network vs. permission vs. data shape)
//! - Provide short user-facing messages for degraded panel states
//! - Preserve full error context for logging

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a display-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Storage(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Location(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Failure of a single outbound HTTP call.
///
/// Covers the three failure families a panel can hit: transport
/// (timeout/connect), protocol (non-2xx, malformed JSON) and data shape
/// (well-formed JSON that does not carry what we need).
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Unexpected data: {0}")]
    UnexpectedShape(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Timeout => "The request timed out.",
            FetchError::ConnectionFailed(_) => "Unable to connect. Check your internet connection.",
            FetchError::Status { status, .. } if *status >= 500 => {
                "The data provider is having issues."
            }
            FetchError::Status { .. } => "The data provider rejected the request.",
            FetchError::Malformed(_) | FetchError::UnexpectedShape(_) => {
                "Received unexpected data from the provider."
            }
            FetchError::InvalidRequest(_) => "The request could not be built.",
        }
    }

    /// Shorthand for a status error carrying the response body.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        FetchError::Status {
            status,
            message: message.into(),
        }
    }
}

/// Local key-value storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Data corruption detected: {0}")]
    Corruption(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Unavailable(_) => "Local cache is unavailable. Showing live data only.",
            StorageError::QueryFailed(_) => "A cache operation failed.",
            StorageError::Corruption(_) => "Local cache may be corrupted. Consider clearing it.",
            StorageError::Serialization(_) => "Cached data could not be read.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory unavailable")]
    NoConfigDir,

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NoConfigDir => "No configuration directory found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Location lookup errors (device geolocation and geocoding).
#[derive(Debug, Clone, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location service unavailable")]
    ServiceUnavailable,

    #[error("Location request timed out")]
    Timeout,

    #[error("Location lookup failed: {0}")]
    Lookup(#[from] FetchError),
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied => "Location access was declined. Using network location.",
            LocationError::ServiceUnavailable => "Device location is unavailable. Using network location.",
            LocationError::Timeout => "Device location took too long. Using network location.",
            LocationError::Lookup(e) => e.user_message(),
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_fetch_error(self) -> FetchError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_fetch_error(self) -> FetchError {
        if self.is_timeout() {
            FetchError::Timeout
        } else if self.is_connect() {
            FetchError::ConnectionFailed(self.to_string())
        } else if self.is_decode() {
            FetchError::Malformed(self.to_string())
        } else if self.is_builder() {
            FetchError::InvalidRequest(self.to_string())
        } else if let Some(status) = self.status() {
            FetchError::status(status.as_u16(), self.to_string())
        } else {
            FetchError::ConnectionFailed(self.to_string())
        }
    }
}

/// Extension trait for converting rusqlite errors to our error types.
pub trait RusqliteErrorExt {
    fn into_storage_error(self) -> StorageError;
}

impl RusqliteErrorExt for rusqlite::Error {
    fn into_storage_error(self) -> StorageError {
        match &self {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("corrupt") => {
                StorageError::Corruption(self.to_string())
            }
            rusqlite::Error::SqliteFailure(_, _) => StorageError::Unavailable(self.to_string()),
            _ => StorageError::QueryFailed(self.to_string()),
        }
    }
}
