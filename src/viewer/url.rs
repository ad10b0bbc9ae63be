use crate::api::ApiClient;
use crate::error::Result;
use crate::files::FileRecord;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// A document URL that may expire and can be re-issued on demand.
#[async_trait]
pub trait RefreshableUrl: Send + Sync {
    fn current_url(&self) -> Option<String>;

    /// Fetch a fresh URL, replacing the current one.
    async fn refresh(&self) -> Result<String>;

    /// React to a render failure: one refresh per failure, no backoff.
    async fn on_load_error(&self) -> Option<String> {
        match self.refresh().await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::error!("failed to refresh document url: {e}");
                None
            }
        }
    }
}

/// Presigned download URL of one stored file.
pub struct PresignedUrl {
    api: ApiClient,
    file_id: i64,
    current: RwLock<Option<String>>,
}

impl PresignedUrl {
    pub fn new(api: ApiClient, file_id: i64, initial: Option<String>) -> Self {
        Self {
            api,
            file_id,
            current: RwLock::new(initial),
        }
    }

    pub fn file_id(&self) -> i64 {
        self.file_id
    }
}

#[async_trait]
impl RefreshableUrl for PresignedUrl {
    fn current_url(&self) -> Option<String> {
        self.current.read().clone()
    }

    async fn refresh(&self) -> Result<String> {
        let url = self.api.download_url(self.file_id).await?;
        *self.current.write() = Some(url.clone());
        Ok(url)
    }
}

/// Resolve view URLs for a batch, one file at a time. Files whose URL cannot
/// be resolved are left out and logged.
pub async fn resolve_urls(api: &ApiClient, files: &[FileRecord]) -> HashMap<i64, String> {
    let mut map = HashMap::new();
    for f in files {
        match api.download_url(f.id).await {
            Ok(url) => {
                map.insert(f.id, url);
            }
            Err(e) => tracing::error!(file_id = f.id, "failed to resolve url: {e}"),
        }
    }
    map
}
