use super::AppState;
use crate::api::{AnalyzeItem, ExtractRisksItem};
use crate::error::Result;
use crate::files::FileRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const STORAGE_KEY: &str = "workspace";

/// The current batch and its cached results, saved between command-line
/// invocations.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    uploaded: Vec<FileRecord>,
    analysis: HashMap<String, AnalyzeItem>,
    risks: HashMap<i64, ExtractRisksItem>,
}

impl AppState {
    /// Reload the last saved batch. A missing or unreadable snapshot leaves
    /// the stores empty.
    pub fn restore_workspace(&self) -> Result<()> {
        let Some(snap) = self.storage.get_json::<Snapshot>(STORAGE_KEY)? else {
            return Ok(());
        };
        self.uploads.set_uploaded(snap.uploaded);
        for (id, item) in snap.analysis {
            self.analysis.insert(id, item);
        }
        for (id, item) in snap.risks {
            self.risks.set(id, item);
        }
        Ok(())
    }

    pub fn save_workspace(&self) -> Result<()> {
        let snap = Snapshot {
            uploaded: self.uploads.uploaded(),
            analysis: self.analysis.entries(),
            risks: self.risks.entries(),
        };
        self.storage.set_json(STORAGE_KEY, &snap)
    }
}
