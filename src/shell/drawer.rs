use crate::api::{ApiClient, ChatThread};
use crate::files::DownloadStore;
use crate::viewer::{PresignedUrl, RefreshableUrl};
use crate::wizard::Track;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use std::path::PathBuf;

const ME_FAILED: &str = "로그인 정보를 불러오는 데 실패했습니다.";
const THREADS_FAILED: &str = "리포트를 불러오는 데 실패했습니다.";
const NO_REPORT_FILE: &str = "연결된 리포트 파일이 없습니다.";
const DOWNLOAD_FAILED: &str = "리포트 다운로드에 실패했습니다. 잠시 후 다시 시도해주세요.";

/// `YYYY. MM. DD.` in local time. Empty input gives an empty string and
/// unparsable input is returned as is.
pub fn format_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Local).date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
    match date {
        Ok(d) => d.format("%Y. %m. %d.").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// One entry of the history list.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadRow {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub has_report: bool,
}

impl From<&ChatThread> for ThreadRow {
    fn from(t: &ChatThread) -> Self {
        let title = t.title.trim();
        Self {
            id: t.id,
            title: if title.is_empty() { "제목 없음".into() } else { title.to_string() },
            date: format_date(&t.created_at),
            has_report: t.report_file_id.is_some(),
        }
    }
}

/// Side drawer listing saved reports per track.
pub struct HistoryDrawer {
    api: ApiClient,
    user_id: Option<i64>,
    pub tab: Track,
    pre: Vec<ChatThread>,
    post: Vec<ChatThread>,
    pub error: Option<String>,
}

impl HistoryDrawer {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            user_id: None,
            tab: Track::Pre,
            pre: Vec::new(),
            post: Vec::new(),
            error: None,
        }
    }

    /// Load the signed-in user, then both tabs.
    pub async fn open(&mut self) {
        match self.api.me().await {
            Ok(me) => self.user_id = Some(me.id),
            Err(e) => {
                tracing::error!("failed to load auth user: {e}");
                self.user_id = None;
                self.error = Some(ME_FAILED.into());
                return;
            }
        }
        self.fetch(Track::Pre).await;
        self.fetch(Track::Post).await;
    }

    /// Reload one tab. Skipped while no user is known.
    pub async fn fetch(&mut self, track: Track) {
        let Some(user_id) = self.user_id else {
            return;
        };
        self.error = None;
        match self.api.list_threads(user_id, track.channel()).await {
            Ok(list) => *self.list_mut(track) = list,
            Err(e) => {
                tracing::error!("failed to load chat threads: {e}");
                self.error = Some(THREADS_FAILED.into());
            }
        }
    }

    fn list_mut(&mut self, track: Track) -> &mut Vec<ChatThread> {
        match track {
            Track::Pre => &mut self.pre,
            Track::Post => &mut self.post,
        }
    }

    pub fn threads(&self, track: Track) -> &[ChatThread] {
        match track {
            Track::Pre => &self.pre,
            Track::Post => &self.post,
        }
    }

    pub fn rows(&self) -> Vec<ThreadRow> {
        self.threads(self.tab).iter().map(ThreadRow::from).collect()
    }

    pub fn empty_message(&self) -> &'static str {
        match self.tab {
            Track::Pre => "사전대비 리포트가 없습니다. 리포트를 저장해 보세요!",
            Track::Post => "사후처리 리포트가 없습니다. 리포트를 저장해 보세요!",
        }
    }

    /// Hide a thread from the current list. Nothing is deleted server-side.
    pub fn remove(&mut self, track: Track, thread_id: i64) {
        self.list_mut(track).retain(|t| t.id != thread_id);
    }

    /// Download the thread's report PDF into `store`, named after its title.
    pub async fn download(
        &self,
        thread: &ChatThread,
        store: &DownloadStore,
    ) -> Result<PathBuf, &'static str> {
        let Some(file_id) = thread.report_file_id else {
            return Err(NO_REPORT_FILE);
        };
        let title = thread.title.trim();
        let title = if title.is_empty() { "report" } else { title };
        let filename = if title.ends_with(".pdf") {
            title.to_string()
        } else {
            format!("{title}.pdf")
        };

        let handle = PresignedUrl::new(self.api.clone(), file_id, None);
        let fetched: crate::error::Result<Vec<u8>> = async {
            let url = handle.refresh().await?;
            match self.api.fetch_bytes(&url).await {
                Ok(bytes) => Ok(bytes),
                Err(e) => {
                    tracing::warn!(file_id, "report fetch failed, refreshing url: {e}");
                    match handle.on_load_error().await {
                        Some(url) => self.api.fetch_bytes(&url).await,
                        None => Err(e),
                    }
                }
            }
        }
        .await;
        let bytes = fetched.map_err(|e| {
            tracing::error!(file_id, "report download failed: {e}");
            DOWNLOAD_FAILED
        })?;
        store
            .save(&filename, &bytes)
            .await
            .map(|(_, path)| path)
            .map_err(|e| {
                tracing::error!("saving report failed: {e:#}");
                DOWNLOAD_FAILED
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Channel;
    use crate::config::ApiConfig;

    fn thread(id: i64, title: &str, created_at: &str) -> ChatThread {
        ChatThread {
            id,
            user_id: 7,
            channel: Channel::Prevention,
            title: title.into(),
            status: "OPEN".into(),
            report_file_id: None,
            created_at: created_at.into(),
            closed_at: None,
        }
    }

    fn drawer() -> HistoryDrawer {
        HistoryDrawer::new(
            ApiClient::new(&ApiConfig {
                base_url: "http://127.0.0.1:9".into(),
                timeout_secs: Some(1),
            })
            .unwrap(),
        )
    }

    #[test]
    fn dates_format_like_korean_locale() {
        assert_eq!(format_date("2025-09-01T16:34:10"), "2025. 09. 01.");
        assert_eq!(format_date("2025-09-01T16:34:10.123456"), "2025. 09. 01.");
        assert_eq!(format_date("2025-12-31"), "2025. 12. 31.");
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn rows_fall_back_to_untitled() {
        let row = ThreadRow::from(&thread(1, " ", "2025-09-01T00:00:00"));
        assert_eq!(row.title, "제목 없음");
        assert!(!row.has_report);
    }

    #[test]
    fn remove_is_local_to_one_tab() {
        let mut d = drawer();
        d.pre = vec![thread(1, "a", ""), thread(2, "b", "")];
        d.post = vec![thread(1, "c", "")];
        d.remove(Track::Pre, 1);
        assert_eq!(d.threads(Track::Pre).len(), 1);
        assert_eq!(d.threads(Track::Post).len(), 1);
        assert_eq!(d.rows()[0].title, "b");
        d.tab = Track::Post;
        assert!(d.empty_message().starts_with("사후처리"));
    }

    #[tokio::test]
    async fn fetch_without_user_is_skipped() {
        let mut d = drawer();
        d.fetch(Track::Pre).await;
        assert!(d.error.is_none());
        assert!(d.threads(Track::Pre).is_empty());
    }

    #[tokio::test]
    async fn download_needs_a_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = DownloadStore::new(dir.path());
        let result = drawer().download(&thread(1, "t", ""), &store).await;
        assert_eq!(result, Err(NO_REPORT_FILE));
    }
}
