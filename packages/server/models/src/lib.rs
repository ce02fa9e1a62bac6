#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the trash map server.
//!
//! Query results are embedded as-is from the analytics models so the JSON
//! keys (`distance_km`, `dirtiness_score`, ...) stay identical across the
//! API and the CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trash_map_analytics_models::{AreaSummary, Cluster, RankedResult};
use trash_map_report_models::{Cleanliness, Sparcity, TrashReport, TrashType};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Query parameters for `GET /api/dirty-places`.
///
/// Either `lat` and `lng` or `address` must be given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirtyPlacesQueryParams {
    /// Query latitude.
    pub lat: Option<f64>,
    /// Query longitude.
    pub lng: Option<f64>,
    /// Free-text location, geocoded when no coordinates are given.
    pub address: Option<String>,
    /// Maximum number of results; negative values yield an empty list.
    pub limit: Option<i64>,
    /// Search radius in kilometers.
    pub max_distance_km: Option<f64>,
}

/// Query parameters for `GET /api/area-summary`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AreaSummaryQueryParams {
    /// Center latitude.
    pub lat: Option<f64>,
    /// Center longitude.
    pub lng: Option<f64>,
    /// Free-text location, geocoded when no coordinates are given.
    pub address: Option<String>,
    /// Summary radius in kilometers.
    pub radius_km: Option<f64>,
}

/// Query parameters for `GET /api/hotspots`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotspotQueryParams {
    /// Center latitude.
    pub lat: Option<f64>,
    /// Center longitude.
    pub lng: Option<f64>,
    /// Free-text location, geocoded when no coordinates are given.
    pub address: Option<String>,
    /// Search radius in kilometers.
    pub radius_km: Option<f64>,
    /// Minimum number of reports per hotspot.
    pub min_cluster_size: Option<i64>,
}

/// Query parameters for `GET /api/search-location`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchLocationParams {
    /// Free-text location to look up.
    pub q: String,
}

/// The point a query ran against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiQueryLocation {
    /// Latitude used for the query.
    pub latitude: f64,
    /// Longitude used for the query.
    pub longitude: f64,
    /// The address the point was geocoded from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Response of `GET /api/dirty-places`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDirtyPlaces {
    /// Query point.
    pub location: ApiQueryLocation,
    /// Ranked reports, highest combined score first.
    pub results: Vec<RankedResult>,
}

/// Response of `GET /api/area-summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAreaSummary {
    /// Summary center.
    pub location: ApiQueryLocation,
    /// Aggregated statistics.
    pub summary: AreaSummary,
}

/// Response of `GET /api/hotspots`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHotspots {
    /// Search center.
    pub location: ApiQueryLocation,
    /// Hotspots, dirtiest first.
    pub hotspots: Vec<Cluster>,
}

/// Response of `GET /api/search-location`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiLocationMatch {
    /// The original query text.
    pub query: String,
    /// Matched latitude.
    pub latitude: f64,
    /// Matched longitude.
    pub longitude: f64,
    /// Geocoder's name for the match.
    pub display_name: Option<String>,
}

/// Body of `POST /api/test-data`.
///
/// Categories must use the canonical snake-case names; unknown values are
/// rejected here rather than silently dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct NewReportRequest {
    /// Report latitude.
    pub latitude: f64,
    /// Report longitude.
    pub longitude: f64,
    /// Creation time; the server's clock is used when omitted.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Material classification.
    #[serde(default)]
    pub trash_type: Option<TrashType>,
    /// Estimated weight in kilograms.
    #[serde(default)]
    pub estimated_kg: Option<f64>,
    /// Spread of the trash.
    #[serde(default)]
    pub sparcity: Option<Sparcity>,
    /// Cleanliness of the surroundings.
    #[serde(default)]
    pub cleanliness: Option<Cleanliness>,
    /// Handle of an already stored photo.
    #[serde(default)]
    pub image_reference: Option<String>,
}

impl NewReportRequest {
    /// Builds the stored report from this request.
    #[must_use]
    pub fn into_report(self, id: String, now: DateTime<Utc>) -> TrashReport {
        TrashReport {
            id,
            latitude: Some(self.latitude),
            longitude: Some(self.longitude),
            timestamp: Some(self.timestamp.unwrap_or(now)),
            trash_type: self.trash_type,
            estimated_kg: self.estimated_kg,
            sparcity: self.sparcity,
            cleanliness: self.cleanliness,
            image_reference: self.image_reference,
        }
    }
}

/// Response of `POST /api/test-data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCreatedReport {
    /// Always `"success"`.
    pub status: String,
    /// The stored report.
    pub report: TrashReport,
}
