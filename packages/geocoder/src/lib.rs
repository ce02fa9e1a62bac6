#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Address geocoding for location-based queries.
//!
//! Callers that only have a free-text address (a city, a street, a
//! landmark) resolve it to coordinates here before running a spatial
//! query. The provider is Nominatim / `OpenStreetMap`, configured via the
//! TOML file embedded from `services/`.
//!
//! Nominatim's public instance allows about one request per second; the
//! caller is responsible for staying under that.

pub mod config;
pub mod nominatim;

pub use config::NominatimConfig;
pub use nominatim::NominatimGeocoder;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A geocoding result with coordinates and metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedAddress {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// The matched/canonical address returned by the geocoder.
    pub matched_address: Option<String>,
}

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The embedded service configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Resolves free-text addresses to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Looks up the best match for `address`.
    ///
    /// `Ok(None)` means the provider answered but found nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the provider could not be queried or
    /// answered with something unreadable.
    async fn locate(&self, address: &str) -> Result<Option<GeocodedAddress>, GeocodeError>;

    /// Returns `(latitude, longitude)` for `address`, or `None` when there
    /// is no match.
    ///
    /// Lookup failures are logged and reported as no match.
    async fn resolve(&self, address: &str) -> Option<(f64, f64)> {
        match self.locate(address).await {
            Ok(found) => found.map(|a| (a.latitude, a.longitude)),
            Err(e) => {
                log::warn!("Geocoding '{address}' failed: {e}");
                None
            }
        }
    }
}
