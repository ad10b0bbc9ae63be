use super::ApiClient;
use crate::error::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Backend channel of a chat/report thread; one per wizard track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Prevention,
    PostCase,
}

impl Channel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prevention => "PREVENTION",
            Self::PostCase => "POST_CASE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatThread {
    pub id: i64,
    pub user_id: i64,
    pub channel: Channel,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub report_file_id: Option<i64>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub closed_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ThreadList {
    Bare(Vec<ChatThread>),
    Wrapped { items: Vec<ChatThread> },
}

#[derive(Debug, Clone, Serialize)]
pub struct NewThread {
    pub user_id: i64,
    pub channel: Channel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_file_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMessage {
    pub role: String,
    pub content: String,
    pub step: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ApiClient {
    pub async fn create_thread(&self, thread: &NewThread) -> Result<ChatThread> {
        tracing::debug!(channel = thread.channel.as_str(), "POST /be/chat/threads");
        self.send_json(self.request(Method::POST, "/be/chat/threads").json(thread))
            .await
    }

    /// Threads of one user on one channel. Accepts both list payload shapes.
    pub async fn list_threads(&self, user_id: i64, channel: Channel) -> Result<Vec<ChatThread>> {
        let rb = self
            .request(Method::GET, "/be/chat/threads")
            .query(&[("user_id", user_id.to_string()), ("channel", channel.as_str().to_string())]);
        let list: ThreadList = self.send_json(rb).await?;
        Ok(match list {
            ThreadList::Bare(items) | ThreadList::Wrapped { items } => items,
        })
    }

    pub async fn add_message(&self, thread_id: i64, message: &NewMessage) -> Result<()> {
        let path = format!("/be/chat/threads/{thread_id}/messages");
        self.send_empty(self.request(Method::POST, &path).json(message))
            .await
    }
}
