//! The in-memory search index.
//!
//! Built once per record set and immutable afterward; a new upload replaces
//! the index wholesale. Three structures are filled in one O(total chars)
//! pass:
//!
//! - `by_key` - ordered map from dossier number to record, last write wins
//! - `by_name` (per language) - full lowercased name -> keys with that name
//! - `tokens` (per language) - name token (>= 2 chars) -> set of keys
//!
//! A query runs every applicable strategy independently: exact full-name
//! buckets, a digit-prefix scan over the key space, token substring scans,
//! and a full-name substring fallback. Hits are deduplicated by key,
//! collection stops expanding once the result cap is reached, and the
//! survivors are ranked exact-name-first, then by Arabic-aware collation.

use crate::index::collate;
use crate::index::types::{IndexOptions, IndexStats};
use crate::record::{Dossier, Lang, StudentRecord};
use memchr::memmem;
use rustc_hash::FxHashSet;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default)]
struct NameIndex {
    by_name: BTreeMap<String, Vec<Dossier>>,
    tokens: BTreeMap<String, BTreeSet<Dossier>>,
}

fn lang_slot(lang: Lang) -> usize {
    match lang {
        Lang::Ar => 0,
        Lang::Fr => 1,
    }
}

/// Immutable lookup structure over a set of canonical records.
#[derive(Debug)]
pub struct SearchIndex {
    by_key: BTreeMap<Dossier, StudentRecord>,
    names: [NameIndex; 2],
    skipped: usize,
    opts: IndexOptions,
}

impl SearchIndex {
    pub fn new(records: Vec<StudentRecord>) -> Self {
        Self::with_options(records, IndexOptions::default())
    }

    pub fn with_options(records: Vec<StudentRecord>, opts: IndexOptions) -> Self {
        let mut by_key = BTreeMap::new();
        let mut names = [NameIndex::default(), NameIndex::default()];
        let mut skipped = 0;

        for record in records {
            if !record.is_indexable() {
                skipped += 1;
                continue;
            }
            let key = record.dossier;
            for lang in Lang::ALL {
                let name = record.name(lang).trim();
                if name.is_empty() {
                    continue;
                }
                let lower = name.to_lowercase();
                let index = &mut names[lang_slot(lang)];
                for token in lower.split_whitespace() {
                    if token.chars().count() >= opts.min_token_chars {
                        index.tokens.entry(token.to_string()).or_default().insert(key);
                    }
                }
                index.by_name.entry(lower).or_default().push(key);
            }
            by_key.insert(key, record);
        }

        Self {
            by_key,
            names,
            skipped,
            opts,
        }
    }

    /// Exact point lookup. No partial matching.
    pub fn lookup_by_key(&self, key: Dossier) -> Option<&StudentRecord> {
        self.by_key.get(&key)
    }

    /// Number of distinct keyed records.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            records: self.by_key.len(),
            skipped: self.skipped,
            names_fr: self.names[lang_slot(Lang::Fr)].by_name.len(),
            names_ar: self.names[lang_slot(Lang::Ar)].by_name.len(),
            tokens_fr: self.names[lang_slot(Lang::Fr)].tokens.len(),
            tokens_ar: self.names[lang_slot(Lang::Ar)].tokens.len(),
        }
    }

    /// Free-text search over keys and names.
    ///
    /// Never fails: a blank query, or one matching nothing, yields an empty
    /// list. Results carry no duplicate keys and at most
    /// `IndexOptions::result_cap` records, exact name matches first.
    pub fn search(&self, query: &str) -> Vec<&StudentRecord> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        let q = trimmed.to_lowercase();
        let cap = self.opts.result_cap;

        let mut seen = FxHashSet::default();
        let mut hits: Vec<&StudentRecord> = Vec::new();

        // Exact full-name buckets first, outside the cap: a record whose
        // name equals the query must never be starved out of the result
        // set by cheaper substring hits collected earlier.
        for lang in Lang::ALL {
            if let Some(keys) = self.names[lang_slot(lang)].by_name.get(&q) {
                for &key in keys {
                    self.push_hit(key, &mut seen, &mut hits);
                }
            }
        }

        // Digit queries additionally scan the key space by decimal prefix.
        // Name strategies still run afterwards; a numeric-looking school
        // code inside a name remains findable.
        if trimmed.bytes().all(|b| b.is_ascii_digit()) {
            self.collect_key_prefix(trimmed, cap, &mut seen, &mut hits);
        }

        let finder = memmem::Finder::new(q.as_bytes());
        for lang in Lang::ALL {
            let index = &self.names[lang_slot(lang)];
            for (token, keys) in &index.tokens {
                if hits.len() >= cap {
                    break;
                }
                if finder.find(token.as_bytes()).is_some() {
                    for &key in keys {
                        if hits.len() >= cap {
                            break;
                        }
                        self.push_hit(key, &mut seen, &mut hits);
                    }
                }
            }
            // Full-name fallback covers what tokenization cannot: multi-word
            // substrings and tokens below the indexing length.
            for (name, keys) in &index.by_name {
                if hits.len() >= cap {
                    break;
                }
                if finder.find(name.as_bytes()).is_some() {
                    for &key in keys {
                        if hits.len() >= cap {
                            break;
                        }
                        self.push_hit(key, &mut seen, &mut hits);
                    }
                }
            }
        }

        let mut ranked: Vec<(u8, String, &StudentRecord)> = hits
            .into_iter()
            .map(|record| {
                let display = record.display_name();
                let inexact = u8::from(display.to_lowercase() != q);
                (inexact, collate::sort_key(display), record)
            })
            .collect();
        ranked.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| a.1.cmp(&b.1))
                .then_with(|| a.2.display_name().cmp(b.2.display_name()))
                .then_with(|| a.2.dossier.cmp(&b.2.dossier))
        });
        ranked.truncate(cap);
        ranked.into_iter().map(|(_, _, record)| record).collect()
    }

    /// Record a hit once per key. Postings resolve through `by_key`, so a
    /// name inserted by an earlier duplicate of a key finds the surviving
    /// record.
    fn push_hit<'s>(
        &'s self,
        key: Dossier,
        seen: &mut FxHashSet<Dossier>,
        hits: &mut Vec<&'s StudentRecord>,
    ) {
        if let Some(record) = self.by_key.get(&key) {
            if seen.insert(key) {
                hits.push(record);
            }
        }
    }

    /// Collect keys whose decimal form starts with the queried digits.
    ///
    /// A prefix `d` of length L matches the value ranges
    /// `[d*10^e, (d+1)*10^e)` for each extra digit count e; the ordered key
    /// map serves each range directly. Decimal forms never carry leading
    /// zeros, so a query with one matches nothing.
    fn collect_key_prefix<'s>(
        &'s self,
        digits: &str,
        cap: usize,
        seen: &mut FxHashSet<Dossier>,
        hits: &mut Vec<&'s StudentRecord>,
    ) {
        if digits.starts_with('0') {
            return;
        }
        let Ok(prefix) = digits.parse::<Dossier>() else {
            // Too many digits to prefix any representable key.
            return;
        };

        let mut scale: Dossier = 1;
        loop {
            let Some(low) = prefix.checked_mul(scale) else {
                break;
            };
            let high = low.saturating_add(scale - 1);
            for &key in self.by_key.range(low..=high).map(|(k, _)| k) {
                if hits.len() >= cap {
                    return;
                }
                self.push_hit(key, seen, hits);
            }
            match scale.checked_mul(10) {
                Some(next) => scale = next,
                None => break,
            }
        }
    }
}
