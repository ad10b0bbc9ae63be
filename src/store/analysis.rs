use crate::api::AnalyzeItem;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Analysis results keyed by file id string, kept for the whole session.
#[derive(Clone, Default)]
pub struct AnalysisCache {
    items: Arc<RwLock<HashMap<String, AnalyzeItem>>>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<AnalyzeItem> {
        self.items.read().get(id).cloned()
    }

    pub fn insert(&self, id: impl Into<String>, item: AnalyzeItem) {
        self.items.write().insert(id.into(), item);
    }

    pub fn has_all(&self, ids: &[String]) -> bool {
        let items = self.items.read();
        ids.iter().all(|id| items.contains_key(id))
    }

    /// Ids without a cached result, in the given order.
    pub fn missing(&self, ids: &[String]) -> Vec<String> {
        let items = self.items.read();
        ids.iter().filter(|id| !items.contains_key(*id)).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    pub fn reset(&self) {
        self.items.write().clear();
    }

    pub fn entries(&self) -> HashMap<String, AnalyzeItem> {
        self.items.read().clone()
    }
}

#[cfg(test)]
pub(crate) fn sample_analysis(kind: Option<&str>, label: crate::risk::RiskLabel) -> AnalyzeItem {
    use crate::api::Rating;
    use crate::files::DocKind;
    AnalyzeItem {
        fileurl: "https://s3.test/f".into(),
        mime: "application/pdf".into(),
        modality: DocKind::Pdf,
        kind: kind.map(str::to_string),
        law_input: String::new(),
        case_input: String::new(),
        rating: Rating {
            label,
            reasons: vec!["no deposit insurance clause".into()],
        },
    }
}
