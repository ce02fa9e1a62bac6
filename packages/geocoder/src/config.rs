//! Geocoding service configuration.
//!
//! The provider is defined in `services/nominatim.toml`, embedded at
//! compile time. `NOMINATIM_URL` overrides the base URL at runtime, which
//! is how a self-hosted instance is selected.

use serde::Deserialize;

use crate::GeocodeError;

/// Environment variable overriding [`NominatimConfig::base_url`].
pub const BASE_URL_ENV: &str = "NOMINATIM_URL";

const NOMINATIM_TOML: &str = include_str!("../services/nominatim.toml");

/// Nominatim service configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimConfig {
    /// Unique identifier (`"nominatim"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Search endpoint URL (e.g., `"https://nominatim.openstreetmap.org/search"`).
    pub base_url: String,
    /// `User-Agent` header; the public instance rejects anonymous clients.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    10
}

impl NominatimConfig {
    /// Parses the embedded service configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Config`] if the embedded TOML is malformed.
    pub fn embedded() -> Result<Self, GeocodeError> {
        Ok(toml::de::from_str(NOMINATIM_TOML)?)
    }

    /// Parses the embedded configuration and applies the `NOMINATIM_URL`
    /// override when it is set and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Config`] if the embedded TOML is malformed.
    pub fn from_env() -> Result<Self, GeocodeError> {
        let config = Self::embedded()?;
        Ok(config.with_base_url_override(std::env::var(BASE_URL_ENV).ok()))
    }

    fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            log::info!("Using Nominatim at {url} ({BASE_URL_ENV})");
            self.base_url = url;
        }
        self
    }
}
