use super::ApiClient;
use crate::error::{Error, Result};
use crate::files::{FileCategory, FileRecord};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::Value;

/// File bytes queued for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ApiClient {
    /// `POST /be/api/files` as multipart (`category`, `file`).
    pub async fn upload_file(&self, file: UploadFile, category: FileCategory) -> Result<FileRecord> {
        tracing::debug!(filename = %file.filename, category = category.as_str(), "POST /be/api/files");
        let part = Part::bytes(file.data)
            .file_name(file.filename)
            .mime_str(&file.mime_type)?;
        let form = Form::new()
            .text("category", category.as_str())
            .part("file", part);
        self.send_json(self.request(Method::POST, "/be/api/files").multipart(form))
            .await
    }

    /// Upload several files concurrently; results keep the input order.
    /// The first failure fails the whole batch.
    pub async fn upload_many(
        &self,
        files: Vec<UploadFile>,
        category: FileCategory,
    ) -> Result<Vec<FileRecord>> {
        let mut set = tokio::task::JoinSet::new();
        let total = files.len();
        for (idx, file) in files.into_iter().enumerate() {
            let client = self.clone();
            set.spawn(async move { (idx, client.upload_file(file, category).await) });
        }

        let mut slots: Vec<Option<FileRecord>> = vec![None; total];
        while let Some(joined) = set.join_next().await {
            let (idx, result) =
                joined.map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?;
            slots[idx] = Some(result?);
        }
        Ok(slots.into_iter().flatten().collect())
    }

    /// Fresh presigned GET URL for a stored file.
    pub async fn download_url(&self, id: i64) -> Result<String> {
        let path = format!("/be/api/files/{id}/download-url");
        tracing::debug!(file_id = id, "GET download-url");
        let (_, body) = self.send_text(self.request(Method::GET, &path)).await?;
        parse_download_url(&body)
    }

    /// Fetch an absolute (usually presigned) URL. No bearer token is sent.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self.inner.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Api {
                status,
                message: format!("download failed: {status}"),
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }
}

/// The endpoint answers with a JSON string, a `{url}` object, or bare text.
pub fn parse_download_url(body: &str) -> Result<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(url)) => Ok(url),
        Ok(Value::Object(map)) => match map.get("url") {
            Some(Value::String(url)) => Ok(url.clone()),
            _ => Err(Error::InvalidDownloadUrl(body.to_string())),
        },
        Ok(_) => Err(Error::InvalidDownloadUrl(body.to_string())),
        Err(_) => {
            let text = body.trim();
            if text.starts_with("http://") || text.starts_with("https://") {
                Ok(text.to_string())
            } else {
                Err(Error::InvalidDownloadUrl(body.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_url_shapes() {
        assert_eq!(
            parse_download_url(r#""https://s3.test/a.pdf?sig=1""#).unwrap(),
            "https://s3.test/a.pdf?sig=1"
        );
        assert_eq!(
            parse_download_url(r#"{"url":"https://s3.test/b.pdf"}"#).unwrap(),
            "https://s3.test/b.pdf"
        );
        assert_eq!(
            parse_download_url("https://s3.test/c.pdf\n").unwrap(),
            "https://s3.test/c.pdf"
        );
    }

    #[test]
    fn download_url_rejects_other_shapes() {
        assert!(matches!(
            parse_download_url(r#"{"href":"x"}"#),
            Err(Error::InvalidDownloadUrl(_))
        ));
        assert!(matches!(parse_download_url("42"), Err(Error::InvalidDownloadUrl(_))));
        assert!(matches!(parse_download_url("nope"), Err(Error::InvalidDownloadUrl(_))));
    }
}
