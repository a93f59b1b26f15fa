//! Arabic-aware name collation.
//!
//! Ranking needs a locale-sensitive order over mixed Arabic/French names
//! without pulling in an ICU binding. Names are folded to a collation key:
//! lowercase, NFD decomposition, combining marks dropped (this alone folds
//! French accents and the hamza/madda carriers أ إ آ ؤ ئ onto their base
//! letters), then the remaining Arabic orthographic variants are folded and
//! tatweel stretching removed. Keys compare bytewise; the raw string breaks
//! ties so distinct spellings never collate as equal.

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Collation key for a display name.
pub fn sort_key(name: &str) -> String {
    name.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter_map(fold_char)
        .collect()
}

fn fold_char(c: char) -> Option<char> {
    match c {
        // Alef wasla carries no combining mark, fold it by hand.
        'ٱ' => Some('ا'),
        'ى' => Some('ي'),
        'ة' => Some('ه'),
        // Tatweel stretches a word for layout and never changes it.
        'ـ' => None,
        _ => Some(c),
    }
}

/// Order two names by collation key, raw string on ties.
#[allow(dead_code)]
pub fn compare(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}
