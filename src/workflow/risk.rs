use crate::api::ExtractRisksItem;
use crate::error::Result;
use crate::files::Doc;
use crate::risk::{KorRiskLabel, RiskLabel};
use crate::store::AppState;
use crate::viewer::{highlights_from_item, layout, resolve_urls, PdfHighlight, PlacedHighlight};
use crate::wizard::Track;
use tokio_util::sync::CancellationToken;

/// Extract risky sentences for every uploaded file that has none cached.
///
/// Files are processed one after another. A failed or empty extraction is
/// cached as an empty placeholder so the file is not retried on the next
/// visit. Returns how many files were processed.
pub async fn ensure_risks(state: &AppState, cancel: &CancellationToken) -> usize {
    let pending: Vec<_> = state
        .uploads
        .uploaded()
        .into_iter()
        .filter(|f| !state.risks.has(f.id))
        .collect();
    if pending.is_empty() {
        return 0;
    }

    let urls = resolve_urls(&state.api, &pending).await;
    let mut processed = 0;
    for file in &pending {
        let Some(url) = urls.get(&file.id) else {
            continue;
        };
        if cancel.is_cancelled() {
            break;
        }
        let item = match state.api.extract_risks(url).await {
            Ok(Some(item)) => item,
            Ok(None) => {
                tracing::warn!(file_id = file.id, "extract_risks returned no item");
                ExtractRisksItem::empty(url.as_str())
            }
            Err(e) => {
                tracing::error!(file_id = file.id, "extract_risks failed: {e}");
                ExtractRisksItem::empty(url.as_str())
            }
        };
        if cancel.is_cancelled() {
            break;
        }
        state.risks.set(file.id, item);
        processed += 1;
    }
    processed
}

/// One line of the risk page list.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskRow {
    pub index: usize,
    pub sentence: String,
    pub label: RiskLabel,
    pub kor: KorRiskLabel,
    pub reason: String,
    /// Page of the first position; 1 when the sentence has none.
    pub page: u32,
}

pub fn risk_list(item: &ExtractRisksItem) -> Vec<RiskRow> {
    item.risky_sentences
        .iter()
        .enumerate()
        .map(|(index, s)| RiskRow {
            index,
            sentence: s.sentence.clone(),
            label: s.risk_label,
            kor: s.risk_label.kor(),
            reason: s.reason.clone(),
            page: s.positions.first().map(|p| p.page).unwrap_or(1),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct DocRisks {
    pub doc: Doc,
    pub rows: Vec<RiskRow>,
    pub highlights: Vec<PdfHighlight>,
    /// Configured viewer page width.
    pub render_width: f64,
}

impl DocRisks {
    /// Highlight boxes of `page` at the configured render width.
    pub fn placed(&self, page: u32) -> Vec<PlacedHighlight> {
        layout(&self.highlights, page, self.render_width)
    }
}

/// The pre-contract risk page: record the visit, extract what is missing,
/// and list each document's sentences.
pub async fn risk_page(state: &AppState, cancel: &CancellationToken) -> Result<Vec<DocRisks>> {
    state.progress.set_pos(Track::Pre, 1)?;
    ensure_risks(state, cancel).await;
    Ok(state
        .uploads
        .docs()
        .into_iter()
        .map(|doc| {
            let item = state.risks.get(doc.id);
            DocRisks {
                rows: item.as_ref().map(risk_list).unwrap_or_default(),
                highlights: highlights_from_item(item.as_ref()),
                render_width: state.config.viewer.page_width,
                doc,
            }
        })
        .collect())
}
