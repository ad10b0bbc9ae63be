use super::SectionResult;
use crate::api::{ApiClient, RawLawRow};
use crate::error::{Error, Result};
use crate::legal::{group_law_rows, project_cases, CaseItem, LawWithArticles};
use crate::store::AppState;
use std::future::Future;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

fn clean_inputs(inputs: &[String]) -> Vec<String> {
    inputs
        .iter()
        .map(|q| q.trim())
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect()
}

/// Run one request per query concurrently. Results come back in query order;
/// the first failure fails the whole set.
async fn fan_out<T, F, Fut>(api: &ApiClient, queries: Vec<String>, call: F) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(ApiClient, String) -> Fut,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let mut set = JoinSet::new();
    for (idx, q) in queries.into_iter().enumerate() {
        let fut = call(api.clone(), q);
        set.spawn(async move { (idx, fut.await) });
    }
    let mut done = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        let (idx, result) = joined.map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?;
        done.push((idx, result?));
    }
    done.sort_by_key(|(idx, _)| *idx);
    Ok(done.into_iter().map(|(_, r)| r).collect())
}

/// Search laws once per input and group every returned row by law.
pub async fn related_laws(
    state: &AppState,
    inputs: &[String],
    cancel: &CancellationToken,
) -> SectionResult<LawWithArticles> {
    let queries = clean_inputs(inputs);
    if queries.is_empty() {
        return SectionResult::NoQuery;
    }
    let (k, min_score) = (state.config.search.law_k, state.config.search.law_min_score);
    let result = fan_out(&state.api, queries, move |api, q| async move {
        api.search_laws(&q, k, min_score).await
    })
    .await;

    if cancel.is_cancelled() {
        return SectionResult::Cancelled;
    }
    match result {
        Ok(responses) => {
            let rows: Vec<RawLawRow> = responses
                .into_iter()
                .flat_map(|r| r.items)
                .collect();
            SectionResult::Ready(group_law_rows(&rows))
        }
        Err(e) => {
            tracing::error!("law search failed: {e}");
            SectionResult::Error(e.user_message())
        }
    }
}

/// Search court decisions once per input.
pub async fn related_cases(
    state: &AppState,
    inputs: &[String],
    cancel: &CancellationToken,
) -> SectionResult<CaseItem> {
    let queries = clean_inputs(inputs);
    if queries.is_empty() {
        return SectionResult::NoQuery;
    }
    let search = &state.config.search;
    let (k, with_summary, with_body) = (search.case_k, search.case_with_summary, search.case_with_body);
    let result = fan_out(&state.api, queries, move |api, q| async move {
        api.search_cases(&q, k, with_summary, with_body).await
    })
    .await;

    if cancel.is_cancelled() {
        return SectionResult::Cancelled;
    }
    match result {
        Ok(responses) => SectionResult::Ready(project_cases(&responses)),
        Err(e) => {
            tracing::error!("case search failed: {e}");
            SectionResult::Error(e.user_message())
        }
    }
}
