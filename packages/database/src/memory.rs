//! In-process report store.

use async_trait::async_trait;
use tokio::sync::RwLock;
use trash_map_report_models::TrashReport;

use crate::{DatabaseError, ReportRepository};

/// Keeps reports in a `Vec` behind an async read/write lock.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    reports: RwLock<Vec<TrashReport>>,
}

impl MemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `reports`.
    #[must_use]
    pub fn with_reports(reports: Vec<TrashReport>) -> Self {
        Self {
            reports: RwLock::new(reports),
        }
    }
}

#[async_trait]
impl ReportRepository for MemoryRepository {
    async fn list_all(&self) -> Result<Vec<TrashReport>, DatabaseError> {
        Ok(self.reports.read().await.clone())
    }

    async fn insert(&self, report: TrashReport) -> Result<(), DatabaseError> {
        self.reports.write().await.push(report);
        Ok(())
    }

    async fn insert_many(&self, reports: Vec<TrashReport>) -> Result<usize, DatabaseError> {
        let count = reports.len();
        self.reports.write().await.extend(reports);
        Ok(count)
    }

    async fn clear(&self) -> Result<usize, DatabaseError> {
        let mut reports = self.reports.write().await;
        let count = reports.len();
        reports.clear();
        Ok(count)
    }
}
