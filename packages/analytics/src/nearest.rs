//! Proximity ranking: the dirtiest reports close to a point.

use trash_map_analytics_models::{NearestParams, RankedResult};
use trash_map_database::ReportRepository;
use trash_map_report_models::TrashReport;
use trash_map_spatial::distance_km;

use crate::{AnalyticsError, scoring::dirtiness_score};

/// Added to the distance before dividing so reports at (almost) zero
/// distance do not blow up the combined score.
pub const DISTANCE_SMOOTHING_KM: f64 = 0.1;

/// Ranks spatial reports within `max_distance_km` of the query point.
///
/// Each candidate gets `combined_score = dirtiness / (distance + 0.1)`.
/// Results are sorted by combined score, highest first, keeping input
/// order among equal scores, and truncated to `limit`. Non-spatial reports
/// and reports beyond the radius are skipped; an empty input or a zero
/// limit yields an empty vector.
#[must_use]
pub fn rank_nearest(reports: &[TrashReport], params: &NearestParams) -> Vec<RankedResult> {
    if params.limit == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<RankedResult> = reports
        .iter()
        .filter_map(|report| {
            let (lat, lng) = report.location()?;
            let distance = distance_km(params.latitude, params.longitude, lat, lng);
            if distance > params.max_distance_km {
                return None;
            }

            let dirtiness = dirtiness_score(report);
            Some(RankedResult {
                report: report.clone(),
                distance_km: distance,
                dirtiness_score: dirtiness,
                combined_score: dirtiness / (distance + DISTANCE_SMOOTHING_KM),
            })
        })
        .collect();

    // `sort_by` is stable, so ties keep repository order.
    ranked.sort_by(|a, b| b.combined_score.total_cmp(&a.combined_score));
    ranked.truncate(params.limit);
    ranked
}

/// Loads all reports from `repo` and ranks them with [`rank_nearest`].
///
/// # Errors
///
/// Returns [`AnalyticsError`] if the repository cannot be read.
pub async fn find_nearest(
    repo: &dyn ReportRepository,
    params: &NearestParams,
) -> Result<Vec<RankedResult>, AnalyticsError> {
    let reports = repo.list_all().await?;
    let ranked = rank_nearest(&reports, params);

    log::debug!(
        "find_nearest: {} of {} reports within {} km of ({}, {})",
        ranked.len(),
        reports.len(),
        params.max_distance_km,
        params.latitude,
        params.longitude
    );

    Ok(ranked)
}
