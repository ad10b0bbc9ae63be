use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Local download folder for generated reports, organized by date.
pub struct DownloadStore {
    base_dir: PathBuf,
}

impl DownloadStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Save bytes under `YYYY/MM/DD/`, returns (relative_path, absolute_path).
    ///
    /// The stored name keeps the original stem and appends a short random
    /// suffix so repeated downloads never overwrite each other.
    pub async fn save(&self, filename: &str, data: &[u8]) -> Result<(String, PathBuf)> {
        let now = Local::now();
        let date_dir = now.format("%Y/%m/%d").to_string();
        let abs_dir = self.base_dir.join(&date_dir);
        fs::create_dir_all(&abs_dir)
            .await
            .context("Failed to create download directory")?;

        let path = Path::new(filename);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("report");
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("pdf");
        let suffix = Uuid::new_v4().simple().to_string();
        let stored_name = format!("{}_{}.{}", stem, &suffix[..8], ext);

        let abs_path = abs_dir.join(&stored_name);
        fs::write(&abs_path, data)
            .await
            .context("Failed to write download")?;

        let rel_path = format!("{}/{}", date_dir, stored_name);
        Ok((rel_path, abs_path))
    }

    /// Read a previously saved download.
    pub async fn read(&self, rel_path: &str) -> Result<Vec<u8>> {
        let abs = self.base_dir.join(rel_path);
        fs::read(&abs).await.context("Failed to read download")
    }

    pub fn absolute_path(&self, rel_path: &str) -> PathBuf {
        self.base_dir.join(rel_path)
    }
}
