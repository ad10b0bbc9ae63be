//! HTTP client wrapper for the Jeonsafe backend (`/be/*`) and AI services
//! (`/ai/*`).
//!
//! One configured [`ApiClient`] is shared by every store and workflow. It
//! attaches the bearer token when one is set and turns non-2xx responses into
//! [`Error::Api`] carrying the message extracted from the error body.

pub mod analysis;
pub mod auth;
pub mod chat;
pub mod files;
pub mod search;

pub use analysis::{AnalyzeItem, ExtractRisksItem, Rating, RiskPosition, RiskySentence};
pub use auth::{SignupResponse, TokenResponse, User};
pub use chat::{Channel, ChatThread, NewMessage, NewThread};
pub use files::{parse_download_url, UploadFile};
pub use search::{CaseSearchResponse, LawSearchResponse, RawCaseRow, RawLawRow};

use crate::config::ApiConfig;
use crate::error::{extract_error_message, Error, Result};
use parking_lot::RwLock;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;
        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                token: RwLock::new(None),
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.inner.token.write() = token;
    }

    pub fn token(&self) -> Option<String> {
        self.inner.token.read().clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let rb = self.inner.http.request(method, self.url(path));
        match self.inner.token.read().as_deref() {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    /// Send and return the raw body of a successful response.
    pub(crate) async fn send_text(&self, rb: RequestBuilder) -> Result<(StatusCode, String)> {
        let resp = rb.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            return Ok((status, body));
        }
        let message = extract_error_message(status, &body);
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(Error::Unauthorized { status, message });
        }
        Err(Error::Api { status, message })
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(&self, rb: RequestBuilder) -> Result<T> {
        let (_, body) = self.send_text(rb).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn send_empty(&self, rb: RequestBuilder) -> Result<()> {
        self.send_text(rb).await.map(|_| ())
    }
}
