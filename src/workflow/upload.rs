use crate::api::UploadFile;
use crate::files::{guess_mime_type, FileCategory, FileRecord};
use crate::store::AppState;
use crate::wizard::Track;
use anyhow::{Context, Result};
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// Read a file from disk into an upload payload.
pub async fn read_upload_file(path: &Path) -> Result<UploadFile> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("Upload path has no file name")?
        .to_string();
    Ok(UploadFile {
        mime_type: guess_mime_type(&filename),
        filename,
        data,
    })
}

/// Upload one batch and make it the current file set of the track.
///
/// Analysis and risk caches are keyed by file id and stay valid across
/// batches, so they are left alone.
pub async fn upload_batch(
    state: &AppState,
    track: Track,
    files: Vec<UploadFile>,
    category: FileCategory,
    cancel: &CancellationToken,
) -> Result<Vec<FileRecord>> {
    state.progress.set_pos(track, 0)?;
    if files.is_empty() {
        anyhow::bail!("No files to upload");
    }

    let count = files.len();
    let records = state
        .api
        .upload_many(files, category)
        .await
        .context("Upload failed")?;
    tracing::info!(count, category = category.as_str(), "uploaded batch");

    if cancel.is_cancelled() {
        tracing::debug!("upload finished after page was left; batch not stored");
        return Ok(records);
    }
    state.uploads.set_uploaded(records.clone());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_name_and_mime_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("계약서.pdf");
        tokio::fs::write(&path, b"%PDF-1.4").await.unwrap();

        let file = read_upload_file(&path).await.unwrap();
        assert_eq!(file.filename, "계약서.pdf");
        assert_eq!(file.mime_type, "application/pdf");
        assert_eq!(file.data, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_upload_file(&dir.path().join("nope.png")).await.is_err());
    }
}
