//! Store-wide statistics.

use std::collections::BTreeMap;

use trash_map_analytics_models::{DatasetStats, TrashTypeCount};
use trash_map_database::ReportRepository;
use trash_map_report_models::TrashReport;

use crate::AnalyticsError;

/// Counts reports by trash type and location presence and finds the
/// timestamp range.
///
/// `by_trash_type` is sorted by type name; absent types count as
/// `unknown`.
#[must_use]
pub fn dataset_stats(reports: &[TrashReport]) -> DatasetStats {
    let mut by_name: BTreeMap<String, TrashTypeCount> = BTreeMap::new();
    for report in reports {
        let trash_type = report.trash_type_or_unknown();
        by_name
            .entry(trash_type.to_string())
            .or_insert(TrashTypeCount {
                trash_type,
                count: 0,
            })
            .count += 1;
    }

    let timestamps = reports.iter().filter_map(|r| r.timestamp);

    DatasetStats {
        total_reports: reports.len() as u64,
        spatial_reports: reports.iter().filter(|r| r.location().is_some()).count() as u64,
        by_trash_type: by_name.into_values().collect(),
        earliest: timestamps.clone().min(),
        latest: timestamps.max(),
    }
}

/// Loads all reports from `repo` and computes [`dataset_stats`].
///
/// # Errors
///
/// Returns [`AnalyticsError`] if the repository cannot be read.
pub async fn collect_stats(repo: &dyn ReportRepository) -> Result<DatasetStats, AnalyticsError> {
    let reports = repo.list_all().await?;
    log::debug!("collect_stats: {} reports", reports.len());
    Ok(dataset_stats(&reports))
}
