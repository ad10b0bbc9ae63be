use super::render::{render_pdf, ReportStyle};
use super::schema::MappingReportData;
use crate::api::{ChatThread, NewMessage, NewThread, UploadFile};
use crate::files::{DownloadStore, FileCategory, FileRecord};
use crate::store::AppState;
use crate::wizard::Track;
use anyhow::{Context, Result};
use serde_json::json;
use std::path::PathBuf;

/// Where a published report ended up.
///
/// The local copy is written first and survives any later failure; the
/// upload and thread steps record what went wrong instead of failing.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    pub local_path: PathBuf,
    pub file: Option<FileRecord>,
    pub thread: Option<ChatThread>,
    pub error: Option<String>,
}

impl PublishOutcome {
    pub fn is_complete(&self) -> bool {
        self.file.is_some() && self.thread.is_some() && self.error.is_none()
    }
}

/// `{stem}_매핑리포트.pdf`
pub fn report_file_name(doc_name: &str) -> String {
    let stem = std::path::Path::new(doc_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("report");
    format!("{stem}_매핑리포트.pdf")
}

/// Render, save locally, upload, and file the report in a history thread.
///
/// Only rendering and the local save can fail the call.
pub async fn publish_report(
    state: &AppState,
    track: Track,
    data: &MappingReportData,
    title: Option<String>,
) -> Result<PublishOutcome> {
    let style = ReportStyle::from_config(&state.config.report);
    let pdf = render_pdf(data, &style).context("Failed to render report")?;

    let filename = report_file_name(&data.file_name);
    let store = DownloadStore::new(state.config.download_dir());
    let (_, local_path) = store.save(&filename, &pdf).await?;
    tracing::info!(path = %local_path.display(), "report saved");

    let mut outcome = PublishOutcome {
        local_path,
        file: None,
        thread: None,
        error: None,
    };

    let Some(user) = state.session.user() else {
        outcome.error = Some("로그인이 필요합니다.".into());
        return Ok(outcome);
    };

    let upload = UploadFile {
        filename: filename.clone(),
        mime_type: "application/pdf".into(),
        data: pdf,
    };
    let file = match state.api.upload_file(upload, FileCategory::Report).await {
        Ok(file) => file,
        Err(e) => {
            tracing::error!("report upload failed: {e}");
            outcome.error = Some(e.user_message());
            return Ok(outcome);
        }
    };

    let thread = NewThread {
        user_id: user.id,
        channel: track.channel(),
        title: Some(title.unwrap_or_else(|| format!("{} 매핑 리포트", data.file_name))),
        report_file_id: Some(file.id),
    };
    outcome.file = Some(file.clone());
    let thread = match state.api.create_thread(&thread).await {
        Ok(thread) => thread,
        Err(e) => {
            tracing::error!("report thread creation failed: {e}");
            outcome.error = Some(e.user_message());
            return Ok(outcome);
        }
    };

    let message = NewMessage {
        role: "system".into(),
        content: "리포트가 생성되었습니다.".into(),
        step: "REPORT".into(),
        metadata: Some(json!({ "file_id": file.id, "filename": filename })),
    };
    if let Err(e) = state.api.add_message(thread.id, &message).await {
        tracing::warn!(thread_id = thread.id, "report message not recorded: {e}");
    }
    outcome.thread = Some(thread);
    Ok(outcome)
}
