//! Index configuration and statistics types.

use serde::Serialize;

/// Tunables for index construction and queries, injected by the caller.
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Hard ceiling on the number of records a search returns.
    pub result_cap: usize,
    /// Minimum character length for a name token to enter the token index.
    /// Shorter tokens stay reachable through the full-name fallback.
    pub min_token_chars: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            result_cap: 20,
            min_token_chars: 2,
        }
    }
}

/// Counters describing a built index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Distinct keyed records held by the index.
    pub records: usize,
    /// Records rejected at build time (no key or no name).
    pub skipped: usize,
    /// Distinct full names per language variant.
    pub names_fr: usize,
    pub names_ar: usize,
    /// Distinct indexed tokens per language variant.
    pub tokens_fr: usize,
    pub tokens_ar: usize,
}
