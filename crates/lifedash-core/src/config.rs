use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;
use crate::http::DEFAULT_TIMEOUT_SECS;

const CONFIG_FILE: &str = "config.toml";
const STORE_FILE: &str = "cache.sqlite3";
const ENV_PREFIX: &str = "LIFEDASH";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding config.toml and the local cache. Never serialized.
    #[serde(skip)]
    pub config_dir: PathBuf,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub endpoints: EndpointsConfig,

    #[serde(default)]
    pub currency: CurrencyConfig,

    #[serde(default)]
    pub speed: SpeedConfig,

    #[serde(default)]
    pub panels: PanelsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Upper bound for every outbound request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// ipinfo.io access token (optional; anonymous lookups are rate limited)
    #[serde(default)]
    pub ipinfo_token: Option<String>,

    /// Use a device position fix when one is configured
    #[serde(default)]
    pub device_enabled: bool,

    /// Device latitude, used when `device_enabled` is set
    #[serde(default)]
    pub device_latitude: Option<f64>,

    /// Device longitude, used when `device_enabled` is set
    #[serde(default)]
    pub device_longitude: Option<f64>,

    /// How long to wait for a device fix before falling back, in seconds
    #[serde(default = "default_device_timeout_secs")]
    pub device_timeout_secs: u64,
}

fn default_device_timeout_secs() -> u64 {
    5
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            ipinfo_token: None,
            device_enabled: false,
            device_latitude: None,
            device_longitude: None,
            device_timeout_secs: default_device_timeout_secs(),
        }
    }
}

impl LocationConfig {
    /// The configured device fix, if enabled and complete.
    pub fn device_fix(&self) -> Option<(f64, f64)> {
        if !self.device_enabled {
            return None;
        }
        self.device_latitude.zip(self.device_longitude)
    }

    pub fn device_timeout(&self) -> Duration {
        Duration::from_secs(self.device_timeout_secs)
    }
}

/// Base URLs for every upstream provider. Overridable for testing and
/// self-hosted mirrors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub ipinfo: String,
    pub nominatim: String,
    pub open_meteo: String,
    pub waqi: String,
    pub coingecko: String,
    pub er_api: String,
    pub exchangerate_host: String,
    pub exchangerate_api: String,
    pub nager: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            ipinfo: "https://ipinfo.io".to_string(),
            nominatim: "https://nominatim.openstreetmap.org".to_string(),
            open_meteo: "https://api.open-meteo.com".to_string(),
            waqi: "https://api.waqi.info".to_string(),
            coingecko: "https://api.coingecko.com".to_string(),
            er_api: "https://open.er-api.com".to_string(),
            exchangerate_host: "https://api.exchangerate.host".to_string(),
            exchangerate_api: "https://api.exchangerate-api.com".to_string(),
            nager: "https://date.nager.at".to_string(),
        }
    }
}

impl EndpointsConfig {
    fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("endpoints.ipinfo", &self.ipinfo),
            ("endpoints.nominatim", &self.nominatim),
            ("endpoints.open_meteo", &self.open_meteo),
            ("endpoints.waqi", &self.waqi),
            ("endpoints.coingecko", &self.coingecko),
            ("endpoints.er_api", &self.er_api),
            ("endpoints.exchangerate_host", &self.exchangerate_host),
            ("endpoints.exchangerate_api", &self.exchangerate_api),
            ("endpoints.nager", &self.nager),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Source currency preselected in the converter
    #[serde(default = "default_from_currency")]
    pub default_from: String,
}

fn default_from_currency() -> String {
    "USD".to_string()
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            default_from: default_from_currency(),
        }
    }
}

/// Largest accepted step-delay multiplier (a 15 minute run).
pub const MAX_STEP_DELAY_SCALE: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeedConfig {
    /// Multiplier applied to the simulated test's step delays (0 = instant)
    #[serde(default = "default_step_delay_scale")]
    pub step_delay_scale: f64,
}

fn default_step_delay_scale() -> f64 {
    1.0
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            step_delay_scale: default_step_delay_scale(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanelsConfig {
    /// Show the public-holiday countdown panel
    #[serde(default)]
    pub holidays: bool,
}

impl Config {
    /// Load configuration from the default directory, creating it with
    /// defaults on first run.
    pub fn load() -> Result<Self> {
        let config_dir = Self::default_dir()?;
        Self::load_from(&config_dir)
    }

    /// Load configuration from `config_dir`, layering `LIFEDASH__*`
    /// environment variables on top of the file.
    pub fn load_from(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE);

        if !config_path.exists() {
            let config = Self {
                config_dir: config_dir.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(config_path.clone()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config: Config = settings
            .try_deserialize()
            .context("Failed to parse config file")?;
        config.config_dir = config_dir.to_path_buf();

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns an error if validation fails with critical errors; warnings
    /// are logged.
    pub fn load_validated() -> std::result::Result<(Self, ValidationResult), ConfigError> {
        let config_dir = Self::default_dir().map_err(|_| ConfigError::NoConfigDir)?;
        Self::load_validated_from(&config_dir)
    }

    /// Load from `config_dir` and reject configurations with errors.
    /// Warnings are logged.
    pub fn load_validated_from(
        config_dir: &Path,
    ) -> std::result::Result<(Self, ValidationResult), ConfigError> {
        let config =
            Self::load_from(config_dir).map_err(|e| ConfigError::ParseError(format!("{:#}", e)))?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        for (field, value) in self.endpoints.entries() {
            validate_url(value, field, &mut result);
        }

        if self.http.timeout_secs == 0 {
            result.add_error("http.timeout_secs", "Timeout must be greater than 0");
        } else if self.http.timeout_secs > 60 {
            result.add_warning("http.timeout_secs", "Timeout is unusually long (>60s)");
        }

        if self.location.device_enabled {
            match self.location.device_fix() {
                None => result.add_warning(
                    "location",
                    "Device location enabled but latitude/longitude are not both set",
                ),
                Some((lat, lon)) => {
                    if !(-90.0..=90.0).contains(&lat) {
                        result.add_error("location.device_latitude", "Latitude must be within -90..90");
                    }
                    if !(-180.0..=180.0).contains(&lon) {
                        result.add_error(
                            "location.device_longitude",
                            "Longitude must be within -180..180",
                        );
                    }
                }
            }
        }

        if self.currency.default_from.len() != 3 {
            result.add_error("currency.default_from", "Currency code must have three letters");
        }

        let scale = self.speed.step_delay_scale;
        if scale.is_nan() || scale < 0.0 {
            result.add_error("speed.step_delay_scale", "Delay scale cannot be negative");
        } else if scale > MAX_STEP_DELAY_SCALE {
            result.add_error(
                "speed.step_delay_scale",
                format!("Delay scale cannot exceed {}", MAX_STEP_DELAY_SCALE),
            );
        }

        result
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir).context("Failed to create config directory")?;

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(self.config_dir.join(CONFIG_FILE), contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Path of the on-disk key-value cache
    pub fn store_path(&self) -> PathBuf {
        self.config_dir.join(STORE_FILE)
    }

    fn default_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Failed to get config directory")?
            .join("lifedash"))
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }
            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}
