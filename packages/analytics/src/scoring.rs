//! Dirtiness scoring for a single report.

use trash_map_report_models::TrashReport;

/// Score points contributed by each estimated kilogram.
pub const POINTS_PER_KG: f64 = 10.0;

/// Computes the dirtiness score of a report.
///
/// Starts from `estimated_kg * 10` (zero when the weight is absent) and
/// multiplies, in this order, by the sparcity multiplier, the cleanliness
/// multiplier and the trash type weight. Absent categories use their
/// documented defaults (medium, moderate, neutral type). The result is
/// non-negative for non-negative weights and has no upper bound.
#[must_use]
pub fn dirtiness_score(report: &TrashReport) -> f64 {
    let mut score = report.estimated_kg.map_or(0.0, |kg| kg * POINTS_PER_KG);
    score *= report.sparcity_or_default().multiplier();
    score *= report.cleanliness_or_default().multiplier();
    score *= report.trash_type_or_unknown().weight();
    score
}
