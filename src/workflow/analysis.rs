use crate::store::AppState;
use crate::viewer::resolve_urls;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisStatus {
    /// Nothing uploaded.
    Empty,
    /// Every uploaded file already had a result; no request was made.
    Cached,
    /// One batched request stored this many new results.
    Fetched(usize),
    /// No uploaded file had a resolvable URL.
    NoUrls,
    /// The request failed. Already cached results are untouched.
    Failed(String),
    Cancelled,
}

/// Make sure every uploaded file has an analysis result.
///
/// At most one `analyze` request is made per call. Results are matched to
/// files by position; extra items are ignored and missing ones leave the file
/// without a result. Failures are logged and reported, never propagated.
pub async fn ensure_analysis(state: &AppState, cancel: &CancellationToken) -> AnalysisStatus {
    let files = state.uploads.uploaded();
    if files.is_empty() {
        return AnalysisStatus::Empty;
    }
    if state.analysis.has_all(&state.uploads.ids()) {
        tracing::debug!("analysis cached for all {} files", files.len());
        return AnalysisStatus::Cached;
    }

    let urls = resolve_urls(&state.api, &files).await;
    let resolved: Vec<(String, String)> = files
        .iter()
        .filter_map(|f| urls.get(&f.id).map(|u| (f.key(), u.clone())))
        .collect();
    if resolved.is_empty() {
        tracing::warn!("analysis skipped: no file url could be resolved");
        return AnalysisStatus::NoUrls;
    }

    let request: Vec<String> = resolved.iter().map(|(_, url)| url.clone()).collect();
    let items = match state.api.analyze(&request).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("analyze failed: {e}");
            return AnalysisStatus::Failed(e.user_message());
        }
    };
    if cancel.is_cancelled() {
        return AnalysisStatus::Cancelled;
    }

    let mut stored = 0;
    for ((id, _), item) in resolved.into_iter().zip(items) {
        state.analysis.insert(id, item);
        stored += 1;
    }
    tracing::info!(stored, "analysis results cached");
    AnalysisStatus::Fetched(stored)
}
