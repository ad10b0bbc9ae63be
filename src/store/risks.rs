use crate::api::ExtractRisksItem;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Partial update applied by [`RiskCache::update`].
#[derive(Debug, Clone, Default)]
pub struct RiskPatch {
    pub fileurl: Option<String>,
    pub law_input: Option<String>,
    pub case_input: Option<String>,
    pub risky_sentences: Option<Vec<crate::api::RiskySentence>>,
}

/// Extracted risky sentences per file id.
#[derive(Clone, Default)]
pub struct RiskCache {
    items: Arc<RwLock<HashMap<i64, ExtractRisksItem>>>,
}

impl RiskCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, file_id: i64, item: ExtractRisksItem) {
        self.items.write().insert(file_id, item);
    }

    /// Merge `patch` into an existing entry. Absent entries are left alone.
    pub fn update(&self, file_id: i64, patch: RiskPatch) {
        let mut items = self.items.write();
        let Some(prev) = items.get_mut(&file_id) else {
            return;
        };
        if let Some(url) = patch.fileurl {
            prev.fileurl = url;
        }
        if patch.law_input.is_some() {
            prev.law_input = patch.law_input;
        }
        if patch.case_input.is_some() {
            prev.case_input = patch.case_input;
        }
        if let Some(sentences) = patch.risky_sentences {
            prev.risky_sentences = sentences;
        }
    }

    pub fn get(&self, file_id: i64) -> Option<ExtractRisksItem> {
        self.items.read().get(&file_id).cloned()
    }

    pub fn has(&self, file_id: i64) -> bool {
        self.items.read().contains_key(&file_id)
    }

    pub fn remove(&self, file_id: i64) {
        self.items.write().remove(&file_id);
    }

    pub fn reset(&self) {
        self.items.write().clear();
    }

    pub fn entries(&self) -> HashMap<i64, ExtractRisksItem> {
        self.items.read().clone()
    }
}
