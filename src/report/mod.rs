//! Mapping reports: data snapshot, PDF rendering, and publication to the
//! user's history.

pub mod publish;
pub mod render;
pub mod schema;

pub use publish::{publish_report, report_file_name, PublishOutcome};
pub use render::{render_pdf, text_width, wrap_text, ReportStyle};
pub use schema::{AiSummary, LawGroup, MappingReportData, ReportArticle, ReportCase, UploadedDoc};

use crate::store::AppState;
use crate::workflow::load_mapping;
use anyhow::Result;
use tokio_util::sync::CancellationToken;

pub struct ReportBuilder;

impl ReportBuilder {
    /// Gather the document, its analysis, and fresh search results the way
    /// the mapping page shows them. Wizard progress is left alone.
    pub async fn from_state(
        state: &AppState,
        file_id: Option<i64>,
        cancel: &CancellationToken,
    ) -> Result<MappingReportData> {
        let view = load_mapping(state, file_id, cancel).await?;
        Ok(MappingReportData::from_view(&view))
    }
}
