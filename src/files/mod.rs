//! Backend file records, document kinds, and the local download
//! folder for generated reports.

pub mod kind;
pub mod schema;
pub mod storage;

pub use kind::{format_size, guess_mime_type};
pub use schema::{Doc, DocKind, FileCategory, FileRecord, StorageBackend};
pub use storage::DownloadStore;
