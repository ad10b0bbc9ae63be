use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Top-level client configuration, loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub viewer: ViewerConfig,
    pub wizard: WizardConfig,
    pub report: ReportConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin serving both `/be/*` and `/ai/*` routes.
    pub base_url: String,
    /// Per-request timeout. Absent means the HTTP client default (none).
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: None,
        }
    }
}

/// Parameters forwarded to `/ai/laws/search` and `/ai/cases/search`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SearchConfig {
    pub law_k: u32,
    pub law_min_score: f64,
    pub case_k: u32,
    pub case_with_summary: bool,
    pub case_with_body: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            law_k: 5,
            law_min_score: 0.05,
            case_k: 5,
            case_with_summary: true,
            case_with_body: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ViewerConfig {
    /// Rendered page width in pixels.
    pub page_width: f64,
    /// URL of the PDF rendering worker script, handed to the UI as-is.
    pub pdf_worker_url: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            page_width: 700.0 - 16.0 * 2.0,
            pdf_worker_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GatingMode {
    /// Only the first step is clickable.
    #[default]
    Strict,
    /// Any step up to `current + 1` is clickable.
    Next,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct WizardConfig {
    pub gating: GatingMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ReportConfig {
    /// Predefined Adobe-Korea1 font used for report text.
    pub font: String,
    /// Static font asset path, passed through to UI layers that embed fonts.
    pub font_asset: Option<String>,
    /// Where generated reports are written before upload.
    pub download_dir: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            font: "HYGoThic-Medium".to_string(),
            font_asset: None,
            download_dir: "~/Downloads/jeonsafe".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `state.db`. Empty means the platform data dir.
    pub state_dir: String,
}

