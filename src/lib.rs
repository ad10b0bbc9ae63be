//! Jeonsafe client core.
//!
//! Headless implementation of the lease-safety client: backend and AI
//! service calls, session stores, document highlight geometry, evidence
//! buckets, the two wizard tracks, and mapping reports.

pub mod api;
pub mod config;
pub mod error;
pub mod evidence;
pub mod files;
pub mod forms;
pub mod legal;
pub mod report;
pub mod risk;
pub mod shell;
pub mod store;
pub mod viewer;
pub mod wizard;
pub mod workflow;

pub use config::Config;
pub use error::{Error, Result};
pub use store::AppState;
