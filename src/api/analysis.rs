use super::ApiClient;
use crate::error::Result;
use crate::files::DocKind;
use crate::risk::RiskLabel;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Per-file result of `/ai/gpt/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeItem {
    pub fileurl: String,
    #[serde(default)]
    pub mime: String,
    #[serde(default = "default_modality")]
    pub modality: DocKind,
    /// Bucket classification label, e.g. `contract` or `sms`.
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub law_input: String,
    #[serde(default)]
    pub case_input: String,
    pub rating: Rating,
}

fn default_modality() -> DocKind {
    DocKind::Other
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub label: RiskLabel,
    #[serde(default)]
    pub reasons: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    items: Vec<AnalyzeItem>,
}

/// Page-relative box of a risky sentence, in the coordinate space of a page
/// rendered at `page_width` x `page_height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPosition {
    pub page: u32,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub page_width: f64,
    pub page_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskySentence {
    pub sentence: String,
    #[serde(default)]
    pub anchor: Option<String>,
    #[serde(default)]
    pub reason: String,
    pub risk_label: RiskLabel,
    #[serde(default)]
    pub law_input: Option<String>,
    #[serde(default)]
    pub case_input: Option<String>,
    #[serde(default)]
    pub positions: Vec<RiskPosition>,
}

/// Per-file result of `/ai/gpt/extract_risks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractRisksItem {
    pub fileurl: String,
    #[serde(default)]
    pub law_input: Option<String>,
    #[serde(default)]
    pub case_input: Option<String>,
    #[serde(default)]
    pub risky_sentences: Vec<RiskySentence>,
}

impl ExtractRisksItem {
    /// Stand-in used when extraction failed or found nothing.
    pub fn empty(fileurl: impl Into<String>) -> Self {
        Self {
            fileurl: fileurl.into(),
            law_input: None,
            case_input: None,
            risky_sentences: Vec::new(),
        }
    }

    /// Trimmed, non-empty `law_input` of every sentence, in order.
    pub fn law_inputs(&self) -> Vec<String> {
        collect_inputs(self.risky_sentences.iter().map(|s| s.law_input.as_deref()))
    }

    pub fn case_inputs(&self) -> Vec<String> {
        collect_inputs(self.risky_sentences.iter().map(|s| s.case_input.as_deref()))
    }

    pub fn has_positions(&self) -> bool {
        self.risky_sentences.iter().any(|s| !s.positions.is_empty())
    }
}

fn collect_inputs<'a>(inputs: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    inputs
        .flatten()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Deserialize)]
struct ExtractRisksResponse {
    #[serde(default)]
    items: Vec<ExtractRisksItem>,
}

impl ApiClient {
    /// One batched analysis call. An empty URL list makes no request.
    pub async fn analyze(&self, urls: &[String]) -> Result<Vec<AnalyzeItem>> {
        if urls.is_empty() {
            tracing::warn!("analyze: no urls, skipping call");
            return Ok(Vec::new());
        }
        tracing::debug!(count = urls.len(), "POST /ai/gpt/analyze");
        let rb = self
            .request(Method::POST, "/ai/gpt/analyze")
            .json(&json!({ "urls": urls }));
        let resp: AnalyzeResponse = self.send_json(rb).await?;
        Ok(resp.items)
    }

    /// Risky sentences of one file; `None` when the service returned no item.
    pub async fn extract_risks(&self, url: &str) -> Result<Option<ExtractRisksItem>> {
        tracing::debug!("POST /ai/gpt/extract_risks");
        let rb = self
            .request(Method::POST, "/ai/gpt/extract_risks")
            .json(&json!({ "urls": [url] }));
        let resp: ExtractRisksResponse = self.send_json(rb).await?;
        Ok(resp.items.into_iter().next())
    }
}
