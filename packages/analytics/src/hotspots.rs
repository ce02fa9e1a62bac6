//! Hotspot detection by grid bucketing.
//!
//! Reports within the search radius are snapped to the 0.01° grid from
//! [`trash_map_spatial::GridCell`]. Cells holding at least
//! `min_cluster_size` reports become clusters, ranked by total dirtiness.
//! Insertion is O(1) per report and aggregation is O(cells).

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use trash_map_analytics_models::{Cluster, ClusterMember, HotspotParams};
use trash_map_database::ReportRepository;
use trash_map_report_models::TrashReport;
use trash_map_spatial::{GridCell, distance_km};

use crate::{AnalyticsError, scoring::dirtiness_score};

/// Running totals for one grid cell.
struct CellAccumulator {
    cell: GridCell,
    lat_sum: f64,
    lng_sum: f64,
    members: Vec<ClusterMember>,
}

impl CellAccumulator {
    const fn new(cell: GridCell) -> Self {
        Self {
            cell,
            lat_sum: 0.0,
            lng_sum: 0.0,
            members: Vec::new(),
        }
    }

    fn push(&mut self, lat: f64, lng: f64, member: ClusterMember) {
        self.lat_sum += lat;
        self.lng_sum += lng;
        self.members.push(member);
    }

    #[allow(clippy::cast_precision_loss)]
    fn into_cluster(self) -> Cluster {
        let n = self.members.len() as f64;
        let total_dirtiness: f64 = self.members.iter().map(|m| m.dirtiness_score).sum();
        let total_distance: f64 = self
            .members
            .iter()
            .map(|m| m.distance_from_center_km)
            .sum();

        Cluster {
            center_lat: self.lat_sum / n,
            center_lng: self.lng_sum / n,
            grid_lat: self.cell.latitude(),
            grid_lng: self.cell.longitude(),
            report_count: self.members.len() as u64,
            total_dirtiness_score: total_dirtiness,
            avg_dirtiness_score: total_dirtiness / n,
            avg_distance_from_center_km: total_distance / n,
            member_reports: self.members,
        }
    }
}

/// Groups the spatial reports within `radius_km` of the center into grid
/// cells and returns the cells with at least `min_cluster_size` members.
///
/// Clusters are sorted by total dirtiness score, highest first; equal
/// totals keep the order in which their cells were first seen.
#[must_use]
pub fn cluster_hotspots(reports: &[TrashReport], params: &HotspotParams) -> Vec<Cluster> {
    let mut cells: Vec<CellAccumulator> = Vec::new();
    let mut index: BTreeMap<GridCell, usize> = BTreeMap::new();

    for report in reports {
        let Some((lat, lng)) = report.location() else {
            continue;
        };
        let distance = distance_km(params.latitude, params.longitude, lat, lng);
        if distance > params.radius_km {
            continue;
        }

        let cell = GridCell::containing(lat, lng);
        let slot = match index.entry(cell) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                cells.push(CellAccumulator::new(cell));
                *e.insert(cells.len() - 1)
            }
        };

        cells[slot].push(
            lat,
            lng,
            ClusterMember {
                report: report.clone(),
                distance_from_center_km: distance,
                dirtiness_score: dirtiness_score(report),
            },
        );
    }

    let mut clusters: Vec<Cluster> = cells
        .into_iter()
        .filter(|acc| acc.members.len() >= params.min_cluster_size)
        .map(CellAccumulator::into_cluster)
        .collect();

    clusters.sort_by(|a, b| b.total_dirtiness_score.total_cmp(&a.total_dirtiness_score));
    clusters
}

/// Loads all reports from `repo` and clusters them with
/// [`cluster_hotspots`].
///
/// # Errors
///
/// Returns [`AnalyticsError`] if the repository cannot be read.
pub async fn find_hotspots(
    repo: &dyn ReportRepository,
    params: &HotspotParams,
) -> Result<Vec<Cluster>, AnalyticsError> {
    let reports = repo.list_all().await?;
    let clusters = cluster_hotspots(&reports, params);

    log::debug!(
        "find_hotspots: {} clusters (min size {}) from {} reports within {} km of ({}, {})",
        clusters.len(),
        params.min_cluster_size,
        reports.len(),
        params.radius_km,
        params.latitude,
        params.longitude
    );

    Ok(clusters)
}
