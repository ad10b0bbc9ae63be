use super::ApiClient;
use crate::error::Result;
use reqwest::Method;
use serde::Deserialize;

/// One ranked article row from `/ai/laws/search`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawLawRow {
    pub rank: u32,
    pub score: f64,
    pub law_name: String,
    pub article_no: String,
    pub snippet: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LawSearchResponse {
    pub query: String,
    pub count: usize,
    pub items: Vec<RawLawRow>,
}

/// One ranked decision row from `/ai/cases/search`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCaseRow {
    pub doc_id: i64,
    #[serde(rename = "사건명", default)]
    pub case_name: String,
    #[serde(rename = "법원명", default)]
    pub court: String,
    #[serde(rename = "선고일자", default)]
    pub decision_date: String,
    #[serde(rename = "본문요약", default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CaseSearchResponse {
    pub query: String,
    pub count: usize,
    pub items: Vec<RawCaseRow>,
}

impl ApiClient {
    pub async fn search_laws(&self, q: &str, k: u32, min_score: f64) -> Result<LawSearchResponse> {
        tracing::debug!(q, "GET /ai/laws/search");
        let rb = self.request(Method::GET, "/ai/laws/search").query(&[
            ("q", q.to_string()),
            ("k", k.to_string()),
            ("min_score", min_score.to_string()),
        ]);
        self.send_json(rb).await
    }

    pub async fn search_cases(
        &self,
        q: &str,
        k: u32,
        with_summary: bool,
        with_body: bool,
    ) -> Result<CaseSearchResponse> {
        tracing::debug!(q, "GET /ai/cases/search");
        let rb = self.request(Method::GET, "/ai/cases/search").query(&[
            ("q", q.to_string()),
            ("k", k.to_string()),
            ("with_summary", with_summary.to_string()),
            ("with_body", with_body.to_string()),
        ]);
        self.send_json(rb).await
    }
}
