use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Fallback message shown when the backend gives nothing better.
pub const GENERIC_FAILURE: &str = "요청에 실패했습니다.";

#[derive(Debug, Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("not authorized ({status}): {message}")]
    Unauthorized { status: StatusCode, message: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid download-url response: {0}")]
    InvalidDownloadUrl(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("local storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("report rendering failed: {0}")]
    Report(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Status code of a backend rejection, if this error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } | Self::Unauthorized { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN))
    }

    /// Text suitable for an inline form message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::Unauthorized { message, .. }
                if !message.is_empty() =>
            {
                message.clone()
            }
            Self::Api { .. } | Self::Unauthorized { .. } => GENERIC_FAILURE.to_string(),
            other => {
                let text = other.to_string();
                if text.is_empty() {
                    GENERIC_FAILURE.to_string()
                } else {
                    text
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ValidationDetail {
    msg: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Text(String),
    List(Vec<ValidationDetail>),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Detail>,
}

/// Pull a human message out of a FastAPI-style error body.
///
/// `detail` as a string wins; a validation list yields its first `msg`;
/// otherwise the canonical reason for the status is used.
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail);
    match detail {
        Some(Detail::Text(text)) => return text,
        Some(Detail::List(list)) => {
            if let Some(first) = list.into_iter().next() {
                return first.msg;
            }
        }
        None => {}
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}
