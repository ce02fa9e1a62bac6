#![allow(clippy::module_name_repetitions)]
//! Canonical file paths for the report data directory.
//!
//! All paths are relative to the project root's `data/` directory unless
//! overridden through the environment.

use std::path::{Path, PathBuf};

/// Environment variable overriding [`reports_path`].
pub const REPORTS_PATH_ENV: &str = "TRASH_MAP_REPORTS_PATH";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
///
/// # Panics
///
/// Panics if the project root cannot be resolved.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("Failed to find project root from CARGO_MANIFEST_DIR")
        .to_path_buf()
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}

/// Returns the path of the JSON report store.
///
/// Uses `TRASH_MAP_REPORTS_PATH` when set, otherwise `data/reports.json`.
#[must_use]
pub fn reports_path() -> PathBuf {
    reports_path_or_default(std::env::var_os(REPORTS_PATH_ENV))
}

fn reports_path_or_default(override_path: Option<std::ffi::OsString>) -> PathBuf {
    override_path
        .filter(|p| !p.is_empty())
        .map_or_else(|| data_dir().join("reports.json"), PathBuf::from)
}

/// Ensures a directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created.
pub async fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !tokio::fs::try_exists(path).await? {
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}
