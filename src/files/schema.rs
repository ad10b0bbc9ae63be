use serde::{Deserialize, Serialize};

/// A stored file record as returned by `POST /be/api/files`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: i64,
    pub user_id: i64,
    pub original_filename: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub storage: StorageBackend,
    #[serde(default)]
    pub s3_key: Option<String>,
    #[serde(default)]
    pub s3_url: Option<String>,
    pub category: FileCategory,
    pub created_at: String,
}

impl FileRecord {
    /// Id as used by the string-keyed analysis cache.
    pub fn key(&self) -> String {
        self.id.to_string()
    }

    pub fn kind(&self) -> DocKind {
        DocKind::from_mime(&self.content_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Local,
    S3,
}

/// Upload category sent alongside the file bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Contract,
    Message,
    Transfer,
    Other,
    Report,
}

impl FileCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::Message => "message",
            Self::Transfer => "transfer",
            Self::Other => "other",
            Self::Report => "report",
        }
    }
}

impl std::str::FromStr for FileCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contract" => Ok(Self::Contract),
            "message" => Ok(Self::Message),
            "transfer" => Ok(Self::Transfer),
            "other" => Ok(Self::Other),
            "report" => Ok(Self::Report),
            other => Err(format!("unknown file category: {other}")),
        }
    }
}

/// How a document can be previewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Pdf,
    Image,
    #[serde(other)]
    Other,
}

impl DocKind {
    pub fn from_mime(mime: &str) -> Self {
        if mime == "application/pdf" {
            Self::Pdf
        } else if mime.starts_with("image/") {
            Self::Image
        } else {
            Self::Other
        }
    }
}

/// A document entry in the viewer's side list.
#[derive(Debug, Clone, PartialEq)]
pub struct Doc {
    pub id: i64,
    pub name: String,
    pub kind: DocKind,
}

impl From<&FileRecord> for Doc {
    fn from(r: &FileRecord) -> Self {
        Self {
            id: r.id,
            name: r.original_filename.clone(),
            kind: r.kind(),
        }
    }
}
