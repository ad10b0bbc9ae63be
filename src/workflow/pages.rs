use super::{ensure_analysis, related_cases, related_laws, AnalysisStatus, SectionResult};
use crate::api::{AnalyzeItem, ExtractRisksItem};
use crate::evidence::{Buckets, EvidenceRow};
use crate::files::Doc;
use crate::legal::{CaseItem, LawWithArticles};
use crate::store::AppState;
use crate::viewer::{highlights_from_item, layout, PdfHighlight, PlacedHighlight};
use crate::wizard::Track;
use anyhow::{Context, Result};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// Pick the requested document, falling back to the first one.
fn active_doc(state: &AppState, file_id: Option<i64>) -> Option<Doc> {
    let docs = state.uploads.docs();
    file_id
        .and_then(|id| docs.iter().find(|d| d.id == id).cloned())
        .or_else(|| docs.into_iter().next())
}

/// Post-incident classification page.
#[derive(Debug, Clone)]
pub struct ClassifyView {
    pub status: AnalysisStatus,
    pub buckets: Buckets,
    /// Rows by file id string.
    pub rows: HashMap<String, EvidenceRow>,
}

pub async fn classify_view(state: &AppState, cancel: &CancellationToken) -> Result<ClassifyView> {
    state.progress.set_pos(Track::Post, 1)?;
    let status = ensure_analysis(state, cancel).await;

    let files = state.uploads.uploaded();
    let buckets = Buckets::from_analysis(&files, &state.analysis);
    let rows = buckets
        .sections()
        .flat_map(|(_, items)| items.iter())
        .map(|item| {
            let analysis = state.analysis.get(&item.id);
            (item.id.clone(), EvidenceRow::new(item, analysis.as_ref()))
        })
        .collect();
    Ok(ClassifyView { status, buckets, rows })
}

/// Pre-contract mapping page for one document.
#[derive(Debug, Clone)]
pub struct MappingView {
    pub doc: Doc,
    pub status: AnalysisStatus,
    pub analysis: Option<AnalyzeItem>,
    pub risks: Option<ExtractRisksItem>,
    pub highlights: Vec<PdfHighlight>,
    /// Configured viewer page width.
    pub render_width: f64,
    pub laws: SectionResult<LawWithArticles>,
    pub cases: SectionResult<CaseItem>,
}

impl MappingView {
    /// Highlight boxes of `page` at the configured render width.
    pub fn placed(&self, page: u32) -> Vec<PlacedHighlight> {
        layout(&self.highlights, page, self.render_width)
    }
}

/// The mapping page: records the visit, then loads the view.
pub async fn mapping_view(
    state: &AppState,
    file_id: Option<i64>,
    cancel: &CancellationToken,
) -> Result<MappingView> {
    state.progress.set_pos(Track::Pre, 2)?;
    load_mapping(state, file_id, cancel).await
}

/// Mapping data for one document without touching wizard progress.
///
/// Law and case sections are searched from the document's cached risky
/// sentences; nothing is extracted here.
pub async fn load_mapping(
    state: &AppState,
    file_id: Option<i64>,
    cancel: &CancellationToken,
) -> Result<MappingView> {
    let status = ensure_analysis(state, cancel).await;
    let doc = active_doc(state, file_id).context("No uploaded documents")?;

    let risks = state.risks.get(doc.id);
    let (law_inputs, case_inputs) = risks
        .as_ref()
        .map(|r| (r.law_inputs(), r.case_inputs()))
        .unwrap_or_default();
    let (laws, cases) = tokio::join!(
        related_laws(state, &law_inputs, cancel),
        related_cases(state, &case_inputs, cancel),
    );

    Ok(MappingView {
        analysis: state.analysis.get(&doc.id.to_string()),
        highlights: highlights_from_item(risks.as_ref()),
        render_width: state.config.viewer.page_width,
        risks,
        doc,
        status,
        laws,
        cases,
    })
}

#[derive(Debug, Clone)]
pub struct SimulateEntry {
    pub doc: Doc,
    pub analysis: Option<AnalyzeItem>,
}

/// Post-incident simulation page.
#[derive(Debug, Clone)]
pub struct SimulateView {
    pub active: Option<Doc>,
    pub entries: Vec<SimulateEntry>,
    pub laws: SectionResult<LawWithArticles>,
    pub cases: SectionResult<CaseItem>,
}

fn joined_query<F>(entries: &[SimulateEntry], pick: F) -> Vec<String>
where
    F: Fn(&AnalyzeItem) -> &str,
{
    let q = entries
        .iter()
        .filter_map(|e| e.analysis.as_ref())
        .map(|a| pick(a).trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    vec![q]
}

/// Joins every file's analysis inputs into one query per section. Uses
/// whatever analysis is cached; it does not request any.
pub async fn simulate_view(
    state: &AppState,
    file_id: Option<i64>,
    cancel: &CancellationToken,
) -> Result<SimulateView> {
    state.progress.set_pos(Track::Post, 2)?;

    let entries: Vec<SimulateEntry> = state
        .uploads
        .docs()
        .into_iter()
        .map(|doc| SimulateEntry {
            analysis: state.analysis.get(&doc.id.to_string()),
            doc,
        })
        .collect();

    let law_query = joined_query(&entries, |a| a.law_input.as_str());
    let case_query = joined_query(&entries, |a| a.case_input.as_str());

    let (laws, cases) = tokio::join!(
        related_laws(state, &law_query, cancel),
        related_cases(state, &case_query, cancel),
    );

    Ok(SimulateView {
        active: active_doc(state, file_id),
        entries,
        laws,
        cases,
    })
}
