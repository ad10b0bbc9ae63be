//! Page behaviours of the two wizard tracks.
//!
//! Each function takes the shared [`AppState`](crate::store::AppState) and a
//! [`CancellationToken`](tokio_util::sync::CancellationToken). A cancelled
//! token means the page was left: in-flight results are dropped instead of
//! being written to the stores.

pub mod analysis;
pub mod pages;
pub mod risk;
pub mod search;
pub mod upload;

pub use analysis::{ensure_analysis, AnalysisStatus};
pub use pages::{
    classify_view, load_mapping, mapping_view, simulate_view, ClassifyView, MappingView,
    SimulateEntry, SimulateView,
};
pub use risk::{ensure_risks, risk_list, risk_page, DocRisks, RiskRow};
pub use search::{related_cases, related_laws};
pub use upload::{read_upload_file, upload_batch};

/// Outcome of one search-backed section of a page.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionResult<T> {
    Ready(Vec<T>),
    /// Nothing to search for.
    NoQuery,
    /// The search failed; the section shows the message and no entries.
    Error(String),
    Cancelled,
}

impl<T> SectionResult<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Self::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }
}
