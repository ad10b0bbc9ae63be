//! Shaping legal-search rows into what the mapping and simulation pages show.

pub mod cases;
pub mod laws;

pub use cases::{project_cases, CaseItem};
pub use laws::{group_law_rows, Article, LawWithArticles};
