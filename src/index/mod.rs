//! In-memory search index over canonical records.
//!
//! ## Modules
//!
//! - [`search`] - index construction and the two query operations
//! - [`collate`] - Arabic-aware name ordering for result ranking
//! - [`types`] - injected options and build statistics

pub mod collate;
pub mod search;
pub mod types;

pub use search::SearchIndex;
pub use types::{IndexOptions, IndexStats};
