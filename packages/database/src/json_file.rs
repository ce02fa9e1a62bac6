//! Report store backed by a single JSON file.
//!
//! The file holds a JSON array of reports. A missing file reads as an
//! empty store. Writes replace the file atomically (temp file + rename)
//! and are serialized by an internal mutex, so readers never observe a
//! half-written array.
//!
//! The mutex only orders writers inside one process. Each process writes
//! through its own temp file, so concurrent processes never clobber each
//! other's partial writes, but the last rename wins: run a single writer
//! process per file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use trash_map_report_models::TrashReport;

use crate::{DatabaseError, ReportRepository};

/// Persists reports as a JSON array at a fixed path.
#[derive(Debug)]
pub struct JsonFileRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRepository {
    /// Creates a repository reading and writing `path`. The file is not
    /// touched until the first operation.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<TrashReport>, DatabaseError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No report file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let reports: Vec<TrashReport> = serde_json::from_slice(&bytes)?;
        log::debug!(
            "Loaded {} reports from {}",
            reports.len(),
            self.path.display()
        );
        Ok(reports)
    }

    /// Sibling of the backing file unique to this process.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(format!(".{}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }

    async fn store(&self, reports: &[TrashReport]) -> Result<(), DatabaseError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            crate::paths::ensure_dir(parent).await?;
        }

        let json = serde_json::to_vec_pretty(reports)?;
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        log::info!(
            "Wrote {} reports to {}",
            reports.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[async_trait]
impl ReportRepository for JsonFileRepository {
    async fn list_all(&self) -> Result<Vec<TrashReport>, DatabaseError> {
        let _guard = self.write_lock.lock().await;
        self.load().await
    }

    async fn insert(&self, report: TrashReport) -> Result<(), DatabaseError> {
        let _guard = self.write_lock.lock().await;
        let mut reports = self.load().await?;
        reports.push(report);
        self.store(&reports).await
    }

    async fn insert_many(&self, new_reports: Vec<TrashReport>) -> Result<usize, DatabaseError> {
        if new_reports.is_empty() {
            return Ok(0);
        }

        let _guard = self.write_lock.lock().await;
        let mut reports = self.load().await?;
        let count = new_reports.len();
        reports.extend(new_reports);
        self.store(&reports).await?;
        Ok(count)
    }

    async fn clear(&self) -> Result<usize, DatabaseError> {
        let _guard = self.write_lock.lock().await;
        let count = self.load().await?.len();
        self.store(&[]).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use trash_map_report_models::{Sparcity, TrashType};

    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("trash_map_json_{}_{name}", std::process::id()))
            .join("reports.json")
    }

    async fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            let _ = tokio::fs::remove_dir_all(dir).await;
        }
    }

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let path = scratch_path("missing");
        let repo = JsonFileRepository::new(&path);
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_round_trips_through_disk() {
        let path = scratch_path("insert");
        let repo = JsonFileRepository::new(&path);

        repo.insert(TrashReport {
            id: "r-1".to_string(),
            latitude: Some(40.7128),
            longitude: Some(-74.0060),
            trash_type: Some(TrashType::Plastic),
            sparcity: Some(Sparcity::High),
            estimated_kg: Some(2.5),
            ..TrashReport::default()
        })
        .await
        .unwrap();
        repo.insert(TrashReport {
            id: "r-2".to_string(),
            ..TrashReport::default()
        })
        .await
        .unwrap();

        let reopened = JsonFileRepository::new(&path);
        let reports = reopened.list_all().await.unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].id, "r-1");
        assert_eq!(reports[0].trash_type, Some(TrashType::Plastic));
        assert_eq!(reports[1].location(), None);

        assert_eq!(reopened.clear().await.unwrap(), 2);
        assert!(repo.list_all().await.unwrap().is_empty());

        cleanup(&path).await;
    }

    #[tokio::test]
    async fn insert_many_round_trips_in_one_write() {
        let path = scratch_path("insert_many");
        let repo = JsonFileRepository::new(&path);
        repo.insert(TrashReport {
            id: "first".to_string(),
            ..TrashReport::default()
        })
        .await
        .unwrap();

        let batch: Vec<TrashReport> = (0..500)
            .map(|i| TrashReport {
                id: format!("batch-{i}"),
                latitude: Some(f64::from(i) / 100.0),
                longitude: Some(0.0),
                trash_type: Some(TrashType::Glass),
                ..TrashReport::default()
            })
            .collect();
        assert_eq!(repo.insert_many(batch).await.unwrap(), 500);
        assert_eq!(repo.insert_many(Vec::new()).await.unwrap(), 0);

        let reports = JsonFileRepository::new(&path).list_all().await.unwrap();
        assert_eq!(reports.len(), 501);
        assert_eq!(reports[0].id, "first");
        assert_eq!(reports[1].id, "batch-0");
        assert_eq!(reports[500].id, "batch-499");
        assert_eq!(reports[500].trash_type, Some(TrashType::Glass));
        assert!(!repo.temp_path().exists());

        cleanup(&path).await;
    }

    #[test]
    fn temp_file_is_a_per_process_sibling() {
        let repo = JsonFileRepository::new("/data/reports.json");
        let tmp = repo.temp_path();
        assert_eq!(tmp.parent(), Some(Path::new("/data")));
        assert_eq!(
            tmp.file_name().unwrap().to_str().unwrap(),
            format!("reports.json.{}.tmp", std::process::id())
        );
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let path = scratch_path("malformed");
        crate::paths::ensure_dir(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let repo = JsonFileRepository::new(&path);
        assert!(matches!(
            repo.list_all().await,
            Err(DatabaseError::Json(_))
        ));

        cleanup(&path).await;
    }
}
