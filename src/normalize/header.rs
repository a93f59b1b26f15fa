//! Header string normalization.
//!
//! Spreadsheet headers arrive in English, French or Arabic with arbitrary
//! casing, spacing and diacritics. Everything funnels through one canonical
//! form before synonym lookup: lowercase, single underscores between words,
//! combining marks stripped after NFD decomposition.

use lru::LruCache;
use std::num::NonZeroUsize;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Default capacity for the per-sheet memoization cache. Sheets rarely carry
/// more than a few dozen distinct headers.
pub const DEFAULT_CACHE_SIZE: usize = 128;

/// Normalize a raw header to its canonical lookup form.
///
/// Idempotent: applying it twice yields the same string.
pub fn normalize_header(raw: &str) -> String {
    let collapsed = raw
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    collapsed.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Memoizing wrapper around [`normalize_header`], scoped to one sheet.
///
/// The same header recurs for every row of a sheet, so the session keeps a
/// bounded LRU of raw -> normalized strings. Build one per normalization
/// session and drop it with the sheet; the cache never outlives an upload.
pub struct HeaderNormalizer {
    cache: LruCache<String, String>,
}

impl HeaderNormalizer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap();
        Self {
            cache: LruCache::new(capacity),
        }
    }

    pub fn normalize(&mut self, raw: &str) -> String {
        if let Some(cached) = self.cache.get(raw) {
            return cached.clone();
        }
        let normalized = normalize_header(raw);
        self.cache.put(raw.to_string(), normalized.clone());
        normalized
    }

    #[allow(dead_code)]
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

impl Default for HeaderNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
