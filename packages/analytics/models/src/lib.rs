#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Analytics query parameter and result types.
//!
//! Results are plain serializable records; their field names are the
//! stable JSON contract for API callers (`distance_km`, `dirtiness_score`,
//! `combined_score`, ...). Nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trash_map_report_models::{TrashReport, TrashType};

/// Default number of results returned by a nearest query.
pub const DEFAULT_NEAREST_LIMIT: usize = 5;

/// Default search radius of a nearest query, in kilometers.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 50.0;

/// Default radius of an area summary, in kilometers.
pub const DEFAULT_SUMMARY_RADIUS_KM: f64 = 5.0;

/// Default radius of a hotspot search, in kilometers.
pub const DEFAULT_HOTSPOT_RADIUS_KM: f64 = 10.0;

/// Default minimum number of reports a grid cell needs to be a hotspot.
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 3;

/// Parameters for ranking the dirtiest reports near a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NearestParams {
    /// Query latitude.
    pub latitude: f64,
    /// Query longitude.
    pub longitude: f64,
    /// Maximum number of results.
    pub limit: usize,
    /// Reports farther than this are ignored.
    pub max_distance_km: f64,
}

impl Default for NearestParams {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            limit: DEFAULT_NEAREST_LIMIT,
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
        }
    }
}

/// A report ranked by a nearest query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// The underlying report.
    pub report: TrashReport,
    /// Great-circle distance from the query point.
    pub distance_km: f64,
    /// Dirtiness score of the report.
    pub dirtiness_score: f64,
    /// `dirtiness_score / (distance_km + 0.1)`; higher ranks first.
    pub combined_score: f64,
}

/// Parameters for summarizing the reports around a point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaSummaryParams {
    /// Center latitude.
    pub latitude: f64,
    /// Center longitude.
    pub longitude: f64,
    /// Reports at most this far away are included.
    pub radius_km: f64,
}

impl Default for AreaSummaryParams {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            radius_km: DEFAULT_SUMMARY_RADIUS_KM,
        }
    }
}

/// A report together with its distance and dirtiness relative to a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyReport {
    /// The underlying report.
    pub report: TrashReport,
    /// Great-circle distance from the query point.
    pub distance_km: f64,
    /// Dirtiness score of the report.
    pub dirtiness_score: f64,
}

/// Number of reports of one trash type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrashTypeCount {
    /// Trash type; absent types are counted as [`TrashType::Unknown`].
    pub trash_type: TrashType,
    /// Number of reports.
    pub count: u64,
}

/// Aggregate statistics for the reports within a radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSummary {
    /// Number of reports within the radius.
    pub total_reports: u64,
    /// Radius the summary covers.
    pub radius_km: f64,
    /// Sum of `estimated_kg`, absent weights counting as zero.
    pub total_estimated_kg: f64,
    /// Mean dirtiness score, zero when there are no reports.
    pub avg_dirtiness_score: f64,
    /// Most frequent trash type; ties go to the first one encountered.
    pub most_common_trash_type: Option<TrashType>,
    /// Report count per trash type in first-encountered order.
    pub trash_type_breakdown: Vec<TrashTypeCount>,
    /// The report nearest to the center.
    pub closest_report: Option<NearbyReport>,
    /// Human-readable explanation, set when the area has no reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AreaSummary {
    /// Builds the summary returned when no report lies within `radius_km`.
    #[must_use]
    pub fn empty(radius_km: f64) -> Self {
        Self {
            total_reports: 0,
            radius_km,
            total_estimated_kg: 0.0,
            avg_dirtiness_score: 0.0,
            most_common_trash_type: None,
            trash_type_breakdown: Vec::new(),
            closest_report: None,
            message: Some(format!(
                "No trash reports found within {radius_km}km of this location."
            )),
        }
    }
}

/// Parameters for detecting dirty-area hotspots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotspotParams {
    /// Center latitude.
    pub latitude: f64,
    /// Center longitude.
    pub longitude: f64,
    /// Reports farther than this from the center are ignored.
    pub radius_km: f64,
    /// Grid cells with fewer reports are dropped.
    pub min_cluster_size: usize,
}

impl Default for HotspotParams {
    fn default() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            radius_km: DEFAULT_HOTSPOT_RADIUS_KM,
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
        }
    }
}

/// A report that belongs to a hotspot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterMember {
    /// The underlying report.
    pub report: TrashReport,
    /// Distance from the search center.
    pub distance_from_center_km: f64,
    /// Dirtiness score of the report.
    pub dirtiness_score: f64,
}

/// A grid cell holding enough reports to count as a hotspot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Mean latitude of the members.
    pub center_lat: f64,
    /// Mean longitude of the members.
    pub center_lng: f64,
    /// Snapped latitude of the grid cell.
    pub grid_lat: f64,
    /// Snapped longitude of the grid cell.
    pub grid_lng: f64,
    /// Number of members.
    pub report_count: u64,
    /// Sum of member dirtiness scores.
    pub total_dirtiness_score: f64,
    /// Mean member dirtiness score.
    pub avg_dirtiness_score: f64,
    /// Mean member distance from the search center.
    pub avg_distance_from_center_km: f64,
    /// Members in repository order.
    pub member_reports: Vec<ClusterMember>,
}

/// Overview of the whole report store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetStats {
    /// Number of stored reports.
    pub total_reports: u64,
    /// Reports carrying both coordinates.
    pub spatial_reports: u64,
    /// Report count per trash type, sorted by type name.
    pub by_trash_type: Vec<TrashTypeCount>,
    /// Oldest report timestamp.
    pub earliest: Option<DateTime<Utc>>,
    /// Newest report timestamp.
    pub latest: Option<DateTime<Utc>>,
}
