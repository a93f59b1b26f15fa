//! # natija - exam results normalization and search
//!
//! natija turns messy exam-results spreadsheets into a fixed record schema
//! and serves bounded, ranked lookups over them: exact dossier-number
//! lookup, digit-prefix search, and substring search across tokenized
//! Arabic/French names.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`normalize`] - header synonym mapping and row-to-record resolution
//! - [`index`] - the in-memory search index and Arabic-aware ranking
//! - [`record`] - the canonical record schema
//! - [`output`] - terminal rendering for the CLI
//!
//! Data flows one way: raw rows are normalized into [`record::StudentRecord`]
//! values, an immutable [`index::SearchIndex`] is built from them in one
//! pass, and queries return references into the index. A new upload replaces
//! the index wholesale; nothing is ever mutated in place, so a built index
//! can be shared freely across threads.
//!
//! ## Quick Start
//!
//! ```
//! use natija::index::SearchIndex;
//! use natija::record::StudentRecord;
//!
//! let records = vec![
//!     StudentRecord {
//!         dossier: 77,
//!         name_fr: "Amine Ben".to_string(),
//!         score: 14.5,
//!         ..Default::default()
//!     },
//! ];
//!
//! let index = SearchIndex::new(records);
//! assert_eq!(index.search("amine").len(), 1);
//! assert!(index.lookup_by_key(77).is_some());
//! ```
//!
//! ## Normalization
//!
//! Headers resolve against a bilingual synonym table after lowercasing,
//! whitespace collapsing and diacritic stripping, with an edit-distance
//! fallback for near-miss spellings. Cell values coerce per field: digits
//! only for the key, tolerant decimal parsing for the score, trimmed and
//! capped text elsewhere. Rows without a usable key or any name are
//! dropped and counted, never fatal.

pub mod index;
pub mod normalize;
pub mod output;
pub mod record;
