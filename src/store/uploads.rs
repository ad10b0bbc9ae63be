use crate::files::{Doc, FileRecord};
use parking_lot::RwLock;
use std::sync::Arc;

/// Files of the current wizard flow. Replaced wholesale per upload batch.
#[derive(Clone, Default)]
pub struct UploadStore {
    uploaded: Arc<RwLock<Vec<FileRecord>>>,
}

impl UploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uploaded(&self) -> Vec<FileRecord> {
        self.uploaded.read().clone()
    }

    pub fn set_uploaded(&self, files: Vec<FileRecord>) {
        *self.uploaded.write() = files;
    }

    pub fn clear(&self) {
        self.uploaded.write().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.uploaded.read().is_empty()
    }

    pub fn get(&self, id: i64) -> Option<FileRecord> {
        self.uploaded.read().iter().find(|f| f.id == id).cloned()
    }

    pub fn ids(&self) -> Vec<String> {
        self.uploaded.read().iter().map(FileRecord::key).collect()
    }

    /// Viewer list entries, in upload order.
    pub fn docs(&self) -> Vec<Doc> {
        self.uploaded.read().iter().map(Doc::from).collect()
    }
}

#[cfg(test)]
pub(crate) fn sample_record(id: i64, name: &str, mime: &str) -> FileRecord {
    use crate::files::{FileCategory, StorageBackend};
    FileRecord {
        id,
        user_id: 1,
        original_filename: name.to_string(),
        content_type: mime.to_string(),
        size_bytes: 1024,
        storage: StorageBackend::S3,
        s3_key: None,
        s3_url: None,
        category: FileCategory::Contract,
        created_at: "2025-09-01T16:34:10".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::DocKind;

    #[test]
    fn batch_replaces_previous_files() {
        let store = UploadStore::new();
        store.set_uploaded(vec![sample_record(1, "a.pdf", "application/pdf")]);
        store.set_uploaded(vec![
            sample_record(2, "b.png", "image/png"),
            sample_record(3, "c.txt", "text/plain"),
        ]);
        assert_eq!(store.ids(), vec!["2".to_string(), "3".to_string()]);
        assert!(store.get(1).is_none());

        let kinds: Vec<DocKind> = store.docs().into_iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DocKind::Image, DocKind::Other]);

        store.clear();
        assert!(store.is_empty());
    }
}
