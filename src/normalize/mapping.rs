//! Column mapping: canonical fields to sheet columns.
//!
//! For each canonical field the headers are scanned in sheet order; the
//! first header whose normalized form is in the field's synonym set wins.
//! When no exact hit exists, a similarity fallback takes the single
//! best-scoring column with normalized Levenshtein similarity strictly
//! above the threshold. Fields resolve independently of each other.

use crate::normalize::NormalizeOptions;
use crate::normalize::header::HeaderNormalizer;
use crate::normalize::synonyms;
use crate::record::Field;
use rustc_hash::FxHashMap;
use strsim::normalized_levenshtein;

/// Resolved field -> column assignment for one sheet.
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    headers: Vec<String>,
    slots: FxHashMap<Field, usize>,
}

impl ColumnMapping {
    /// Build a mapping from the sheet's original headers.
    ///
    /// An empty result (no field resolved) is the hard-error signal the
    /// batch driver turns into `NoColumnsMatched`.
    pub fn build(headers: &[String], opts: &NormalizeOptions) -> Self {
        let mut session = HeaderNormalizer::with_capacity(opts.header_cache);
        let normalized: Vec<String> = headers.iter().map(|h| session.normalize(h)).collect();

        let mut slots = FxHashMap::default();
        for field in Field::ALL {
            if let Some(column) = resolve_column(field, &normalized, opts.fuzzy_threshold) {
                slots.insert(field, column);
            }
        }

        Self {
            headers: headers.to_vec(),
            slots,
        }
    }

    /// Column index resolved for a field, if any.
    pub fn column(&self, field: Field) -> Option<usize> {
        self.slots.get(&field).copied()
    }

    /// Original (un-normalized) header resolved for a field, used to pull
    /// values out of row objects.
    pub fn header_for(&self, field: Field) -> Option<&str> {
        self.column(field).map(|i| self.headers[i].as_str())
    }

    /// Resolved (field, original header) pairs in canonical field order.
    pub fn mapped(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.header_for(field).map(|h| (field, h)))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Scan normalized headers for one field. Exact synonym membership
/// short-circuits; otherwise the best similarity strictly above the
/// threshold wins, earliest column on ties.
fn resolve_column(field: Field, normalized: &[String], threshold: f64) -> Option<usize> {
    let accepted = synonyms::variants(field);
    let mut best: Option<(f64, usize)> = None;

    for (column, header) in normalized.iter().enumerate() {
        if accepted.contains(&header.as_str()) {
            return Some(column);
        }
        for variant in accepted {
            let similarity = normalized_levenshtein(header, variant);
            if similarity > threshold && best.map_or(true, |(score, _)| similarity > score) {
                best = Some((similarity, column));
            }
        }
    }

    best.map(|(_, column)| column)
}
