#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Report storage for the trash map.
//!
//! Every query reads reports through the [`ReportRepository`] trait, which
//! hands back a fully materialized snapshot per call. Two stores are
//! provided: [`MemoryRepository`] for tests and embedding, and
//! [`JsonFileRepository`], which keeps the reports as a JSON array on disk.

pub mod json_file;
pub mod memory;
pub mod paths;

pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;

use async_trait::async_trait;
use trash_map_report_models::TrashReport;

/// Errors that can occur during repository operations.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not contain a valid report list.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read/write access to the stored trash reports.
///
/// Queries only ever call [`ReportRepository::list_all`]; the remaining
/// methods serve ingestion and dataset maintenance.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Returns every stored report in insertion order.
    ///
    /// The returned vector is a consistent snapshot; later writes do not
    /// affect it.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError`] if the store cannot be read.
    async fn list_all(&self) -> Result<Vec<TrashReport>, DatabaseError>;

    /// Looks up a single report by id.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError`] if the store cannot be read.
    async fn get(&self, id: &str) -> Result<Option<TrashReport>, DatabaseError> {
        Ok(self.list_all().await?.into_iter().find(|r| r.id == id))
    }

    /// Appends a report.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError`] if the store cannot be written.
    async fn insert(&self, report: TrashReport) -> Result<(), DatabaseError>;

    /// Appends `reports` in order as one write, returning how many were
    /// added.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError`] if the store cannot be written. Nothing is
    /// added in that case.
    async fn insert_many(&self, reports: Vec<TrashReport>) -> Result<usize, DatabaseError>;

    /// Removes every report, returning how many were deleted.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError`] if the store cannot be written.
    async fn clear(&self) -> Result<usize, DatabaseError>;
}
