#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geospatial scoring and retrieval engine for trash reports.
//!
//! Each query comes in two forms: a pure function over an already loaded
//! slice of reports, and an async wrapper that pulls one snapshot from a
//! [`ReportRepository`](trash_map_database::ReportRepository) and delegates
//! to it. Nothing is cached between calls; every derived value is
//! recomputed per query, so concurrent queries never interact.

pub mod hotspots;
pub mod nearest;
pub mod scoring;
pub mod stats;
pub mod summary;

pub use hotspots::{cluster_hotspots, find_hotspots};
pub use nearest::{find_nearest, rank_nearest};
pub use scoring::dirtiness_score;
pub use stats::{collect_stats, dataset_stats};
pub use summary::{summarize, summarize_area};

use thiserror::Error;

/// Errors that can occur during analytics operations.
///
/// Empty results are never errors; only failures of the underlying
/// repository surface here.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Loading reports from the repository failed.
    #[error("Repository error: {0}")]
    Repository(#[from] trash_map_database::DatabaseError),
}
