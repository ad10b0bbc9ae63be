//! Evidence classification into buckets, with drag-and-drop and menu moves.
//!
//! Assignments are a session-local view; nothing is written back.

pub mod buckets;

pub use buckets::{BucketKey, Buckets, EvidenceRow, Item};
