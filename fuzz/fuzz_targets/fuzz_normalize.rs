#![no_main]

use libfuzzer_sys::fuzz_target;
use natija::index::collate;
use natija::normalize::{normalize_header, resolve};
use serde_json::Value;

fuzz_target!(|data: &str| {
    // Header normalization must be total and idempotent.
    let normalized = normalize_header(data);
    assert_eq!(normalize_header(&normalized), normalized);

    // Cell coercions never panic on arbitrary text.
    let cell = Value::String(data.to_string());
    let _ = resolve::parse_dossier(&cell);
    let _ = resolve::parse_score(&cell);
    let cleaned = resolve::clean_text(&cell, 50);
    assert!(cleaned.chars().count() <= 53);

    let _ = collate::sort_key(data);
});
