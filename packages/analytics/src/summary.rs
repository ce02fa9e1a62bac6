//! Area summaries: what the trash situation looks like around a point.

use trash_map_analytics_models::{AreaSummary, AreaSummaryParams, NearbyReport, TrashTypeCount};
use trash_map_database::ReportRepository;
use trash_map_report_models::TrashReport;
use trash_map_spatial::distance_km;

use crate::{AnalyticsError, scoring::dirtiness_score};

/// Aggregates the spatial reports within `radius_km` (inclusive) of the
/// center.
///
/// With no report in range the result is [`AreaSummary::empty`], which
/// carries an explanatory message.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize_area(reports: &[TrashReport], params: &AreaSummaryParams) -> AreaSummary {
    let nearby: Vec<NearbyReport> = reports
        .iter()
        .filter_map(|report| {
            let (lat, lng) = report.location()?;
            let distance = distance_km(params.latitude, params.longitude, lat, lng);
            (distance <= params.radius_km).then(|| NearbyReport {
                report: report.clone(),
                distance_km: distance,
                dirtiness_score: dirtiness_score(report),
            })
        })
        .collect();

    if nearby.is_empty() {
        return AreaSummary::empty(params.radius_km);
    }

    let total_estimated_kg: f64 = nearby
        .iter()
        .map(|n| n.report.estimated_kg.unwrap_or(0.0))
        .sum();
    let total_dirtiness: f64 = nearby.iter().map(|n| n.dirtiness_score).sum();

    let trash_type_breakdown = count_trash_types(&nearby);

    // Strictly-greater comparisons keep the earliest entry on ties.
    let most_common_trash_type = trash_type_breakdown
        .iter()
        .fold(None::<&TrashTypeCount>, |best, entry| match best {
            Some(b) if b.count >= entry.count => Some(b),
            _ => Some(entry),
        })
        .map(|entry| entry.trash_type);

    let closest_report = nearby
        .iter()
        .fold(None::<&NearbyReport>, |best, n| match best {
            Some(b) if b.distance_km <= n.distance_km => Some(b),
            _ => Some(n),
        })
        .cloned();

    AreaSummary {
        total_reports: nearby.len() as u64,
        radius_km: params.radius_km,
        total_estimated_kg,
        avg_dirtiness_score: total_dirtiness / nearby.len() as f64,
        most_common_trash_type,
        trash_type_breakdown,
        closest_report,
        message: None,
    }
}

fn count_trash_types(nearby: &[NearbyReport]) -> Vec<TrashTypeCount> {
    let mut counts: Vec<TrashTypeCount> = Vec::new();
    for n in nearby {
        let trash_type = n.report.trash_type_or_unknown();
        match counts.iter_mut().find(|c| c.trash_type == trash_type) {
            Some(entry) => entry.count += 1,
            None => counts.push(TrashTypeCount {
                trash_type,
                count: 1,
            }),
        }
    }
    counts
}

/// Loads all reports from `repo` and summarizes them with
/// [`summarize_area`].
///
/// # Errors
///
/// Returns [`AnalyticsError`] if the repository cannot be read.
pub async fn summarize(
    repo: &dyn ReportRepository,
    params: &AreaSummaryParams,
) -> Result<AreaSummary, AnalyticsError> {
    let reports = repo.list_all().await?;
    let summary = summarize_area(&reports, params);

    log::debug!(
        "summarize: {} of {} reports within {} km of ({}, {})",
        summary.total_reports,
        reports.len(),
        params.radius_km,
        params.latitude,
        params.longitude
    );

    Ok(summary)
}
