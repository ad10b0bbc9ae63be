//! Document viewer state: highlight geometry, the text-match fallback,
//! page navigation, and refreshable document URLs.

pub mod highlight;
pub mod pager;
pub mod text_match;
pub mod url;

pub use highlight::{
    callout, highlights_from_item, highlights_from_sentences, layout, Callout, HighlightSelection,
    PdfHighlight, PlacedHighlight, Rect,
};
pub use pager::{PageNavigator, ViewerState};
pub use text_match::{normalize_fragment, Banner, HighlightMode, TextMatch, TextMatcher};
pub use url::{resolve_urls, PresignedUrl, RefreshableUrl};
