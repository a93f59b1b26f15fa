//! Field normalization: arbitrary sheet headers and rows into canonical
//! records.
//!
//! ## Modules
//!
//! - [`header`] - header string normalization with per-sheet memoization
//! - [`synonyms`] - static canonical-field synonym table
//! - [`mapping`] - field -> column resolution (exact, then similarity)
//! - [`resolve`] - cell coercion, row resolution, the batch driver
//!
//! The pipeline has no side effects beyond the session cache: rows in,
//! records out, and hard errors only for an empty sheet, unrecognizable
//! headers, or a sheet with no valid row at all.

pub mod header;
pub mod mapping;
pub mod resolve;
pub mod synonyms;

pub use header::{HeaderNormalizer, normalize_header};
pub use mapping::ColumnMapping;
pub use resolve::{NormalizedBatch, Row, normalize_rows, resolve_record};

use thiserror::Error;

/// Hard failures of batch normalization. Per-row problems never surface
/// here; invalid rows are dropped and counted instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The sheet produced zero rows.
    #[error("the file contains no data rows")]
    EmptyDataset,
    /// No header resolved to any canonical field.
    #[error("no matching columns found in the file")]
    NoColumnsMatched,
    /// Columns resolved but every row failed validation.
    #[error("no valid records found in the file")]
    NoValidRecords,
}

/// Tunables for one normalization session, injected by the caller.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Character cap applied to text fields before storage.
    pub text_cap: usize,
    /// Similarity a header must strictly exceed to fuzzy-resolve a field.
    pub fuzzy_threshold: f64,
    /// Capacity of the per-sheet header memoization cache.
    pub header_cache: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            text_cap: 50,
            fuzzy_threshold: 0.7,
            header_cache: header::DEFAULT_CACHE_SIZE,
        }
    }
}
