//! End-to-end pipeline tests: raw sheet rows through header mapping and
//! coercion into canonical records, then index construction and queries.

use natija::index::{IndexOptions, SearchIndex};
use natija::normalize::{
    NormalizeError, NormalizeOptions, NormalizedBatch, Row, normalize_rows,
};
use natija::record::{Field, StudentRecord};
use serde_json::json;
use std::sync::OnceLock;

static BATCH: OnceLock<NormalizedBatch> = OnceLock::new();

/// A small bac-results sheet with bilingual names, tolerant numbers, a
/// duplicated dossier and two invalid rows.
fn bac_rows() -> Vec<Row> {
    serde_json::from_value(json!([
        {"NODOSS": "10250", "NOM_FR": "Sara Ali", "NOM_AR": "سارة علي", "SERIE": "SN",
         "Moy_Bac": "15,25", "Decision": "Admis", "Wilaya_FR": "Nouakchott"},
        {"NODOSS": "10251", "NOM_FR": "Sami Ali", "NOM_AR": "سامي علي", "SERIE": "LM",
         "Moy_Bac": "9.80", "Decision": "Ajourné", "Wilaya_FR": "Nouadhibou"},
        {"NODOSS": "10252", "NOM_FR": "Nadia Kaci", "NOM_AR": "نادية قاسي", "SERIE": "SN",
         "Moy_Bac": "12.00", "Decision": "Admis", "Wilaya_FR": "Kiffa"},
        {"NODOSS": "20319", "NOM_FR": "Omar Tahar", "NOM_AR": "عمر طاهر", "SERIE": "SN",
         "Moy_Bac": "11,5", "Decision": "Sessionnaire", "Wilaya_FR": "Rosso"},
        {"NODOSS": "20320", "NOM_FR": "Aicha Ba", "NOM_AR": "عائشة با", "SERIE": "LM",
         "Moy_Bac": "16.75", "Decision": "Admis", "Wilaya_FR": "Néma"},
        {"NODOSS": 5, "NOM_FR": "Centre Pilote", "NOM_AR": "", "SERIE": "SN",
         "Moy_Bac": 10.0, "Decision": "Admis", "Wilaya_FR": "Nouakchott"},
        {"NODOSS": "777", "NOM_FR": "École 5", "NOM_AR": "", "SERIE": "SN",
         "Moy_Bac": "13.40", "Decision": "Admis", "Wilaya_FR": "Zouérat"},
        {"NODOSS": "40000", "NOM_FR": "Old Entry", "NOM_AR": "", "SERIE": "SN",
         "Moy_Bac": "8.00", "Decision": "Ajourné", "Wilaya_FR": "Atar"},
        {"NODOSS": "40000", "NOM_FR": "New Entry", "NOM_AR": "", "SERIE": "SN",
         "Moy_Bac": "8.50", "Decision": "Ajourné", "Wilaya_FR": "Atar"},
        {"NODOSS": "N/A", "NOM_FR": "Ghost Row", "NOM_AR": "", "SERIE": "SN",
         "Moy_Bac": "7.00", "Decision": "Ajourné", "Wilaya_FR": "Akjoujt"},
        {"NODOSS": "50000", "NOM_FR": "", "NOM_AR": "", "SERIE": "SN",
         "Moy_Bac": "6.00", "Decision": "Ajourné", "Wilaya_FR": "Aleg"}
    ]))
    .unwrap()
}

fn batch() -> &'static NormalizedBatch {
    BATCH.get_or_init(|| {
        normalize_rows(&bac_rows(), &NormalizeOptions::default()).expect("fixture must normalize")
    })
}

fn index() -> SearchIndex {
    SearchIndex::new(batch().records.clone())
}

fn keys(results: &[&StudentRecord]) -> Vec<u64> {
    results.iter().map(|r| r.dossier).collect()
}

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn test_sheet_headers_map_to_canonical_fields() {
    let mapping = &batch().mapping;
    assert_eq!(mapping.header_for(Field::Dossier), Some("NODOSS"));
    assert_eq!(mapping.header_for(Field::NameFr), Some("NOM_FR"));
    assert_eq!(mapping.header_for(Field::NameAr), Some("NOM_AR"));
    assert_eq!(mapping.header_for(Field::Series), Some("SERIE"));
    assert_eq!(mapping.header_for(Field::Score), Some("Moy_Bac"));
    assert_eq!(mapping.header_for(Field::Decision), Some("Decision"));
    assert_eq!(mapping.header_for(Field::WilayaFr), Some("Wilaya_FR"));
}

#[test]
fn test_invalid_rows_are_dropped_with_counters() {
    let batch = batch();
    assert_eq!(batch.rows_in, 11);
    assert_eq!(batch.records.len(), 9, "both invalid rows must be gone");
    assert_eq!(batch.rows_dropped, 2);
}

#[test]
fn test_tolerant_number_coercion() {
    let records = &batch().records;
    let sara = records.iter().find(|r| r.dossier == 10250).unwrap();
    assert_eq!(sara.score, 15.25, "comma decimal separator");
    let omar = records.iter().find(|r| r.dossier == 20319).unwrap();
    assert_eq!(omar.score, 11.5);
    let pilote = records.iter().find(|r| r.dossier == 5).unwrap();
    assert_eq!(pilote.score, 10.0, "numeric JSON cells coerce too");
}

#[test]
fn test_generic_headers_resolve_through_synonyms() {
    let rows: Vec<Row> = serde_json::from_value(json!([
        {"Num": "77", "Full Name": "Amine Ben", "Grade": "14,5"}
    ]))
    .unwrap();
    let batch = normalize_rows(&rows, &NormalizeOptions::default()).unwrap();
    let record = &batch.records[0];
    assert_eq!(record.dossier, 77);
    assert_eq!(record.name_fr, "Amine Ben");
    assert_eq!(record.name_ar, "");
    assert_eq!(record.score, 14.5);
}

#[test]
fn test_hard_errors() {
    let empty: Vec<Row> = Vec::new();
    assert_eq!(
        normalize_rows(&empty, &NormalizeOptions::default()).unwrap_err(),
        NormalizeError::EmptyDataset
    );

    let alien: Vec<Row> = serde_json::from_value(json!([{"colA": 1, "colB": 2}])).unwrap();
    assert_eq!(
        normalize_rows(&alien, &NormalizeOptions::default()).unwrap_err(),
        NormalizeError::NoColumnsMatched
    );
}

// ============================================================================
// Index construction
// ============================================================================

#[test]
fn test_duplicate_dossier_keeps_last_record() {
    let index = index();
    assert_eq!(index.len(), 8, "9 records collapse to 8 distinct keys");
    let survivor = index.lookup_by_key(40000).unwrap();
    assert_eq!(survivor.name_fr, "New Entry");
    assert_eq!(survivor.score, 8.5);
}

#[test]
fn test_lookup_misses_dropped_rows() {
    let index = index();
    assert!(index.lookup_by_key(50000).is_none(), "nameless row never entered the index");
    assert!(index.lookup_by_key(99999).is_none());
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_blank_query_yields_nothing() {
    let index = index();
    assert!(index.search("").is_empty());
    assert!(index.search("   ").is_empty());
}

#[test]
fn test_name_substring_search() {
    let index = index();
    // Both Ali records and nothing else; the Arabic display names rank
    // "سارة" before "سامي".
    assert_eq!(keys(&index.search("ali")), vec![10250, 10251]);
}

#[test]
fn test_arabic_query() {
    let index = index();
    assert_eq!(keys(&index.search("علي")), vec![10250, 10251]);
    assert_eq!(keys(&index.search("عمر طاهر")), vec![20319]);
}

#[test]
fn test_digit_query_runs_both_strategies() {
    let index = index();
    let mut found = keys(&index.search("5"));
    found.sort_unstable();
    assert_eq!(found, vec![5, 777], "key prefix and the name \"École 5\" both match");
}

#[test]
fn test_digit_prefix_search() {
    let index = index();
    let mut found = keys(&index.search("102"));
    found.sort_unstable();
    assert_eq!(found, vec![10250, 10251, 10252]);
    // Ranked by display name, so عائشة با comes before عمر طاهر.
    assert_eq!(keys(&index.search("203")), vec![20320, 20319]);
}

#[test]
fn test_single_letter_query_uses_full_name_fallback() {
    let index = index();
    assert_eq!(keys(&index.search("b")), vec![20320], "only \"Aicha Ba\" contains a b");
}

#[test]
fn test_exact_name_outranks_substring_matches() {
    let rows: Vec<Row> = serde_json::from_value(json!([
        {"Num": "1", "Full Name": "Ali Benaissa"},
        {"Num": "2", "Full Name": "Ali"},
        {"Num": "3", "Full Name": "Alia Cherif"}
    ]))
    .unwrap();
    let batch = normalize_rows(&rows, &NormalizeOptions::default()).unwrap();
    let index = SearchIndex::new(batch.records);
    let results = index.search("ali");
    assert_eq!(results[0].dossier, 2, "the exact \"Ali\" leads");
    assert_eq!(results.len(), 3);
}

#[test]
fn test_cap_and_uniqueness_under_load() {
    let rows: Vec<serde_json::Value> = (1..=60)
        .map(|i| json!({"Num": i.to_string(), "Full Name": format!("Mariem Mint {i}")}))
        .collect();
    let rows: Vec<Row> = serde_json::from_value(serde_json::Value::Array(rows)).unwrap();
    let batch = normalize_rows(&rows, &NormalizeOptions::default()).unwrap();
    let index = SearchIndex::new(batch.records.clone());

    let results = index.search("mariem");
    assert_eq!(results.len(), 20, "hard result cap");
    let mut found = keys(&results);
    found.sort_unstable();
    found.dedup();
    assert_eq!(found.len(), 20, "no key may repeat");

    let relaxed = SearchIndex::with_options(
        batch.records,
        IndexOptions {
            result_cap: 50,
            ..Default::default()
        },
    );
    assert_eq!(relaxed.search("mariem").len(), 50, "the cap is injected, not baked in");
}

// ============================================================================
// Dataset persistence and sharing
// ============================================================================

#[test]
fn test_records_roundtrip_as_json() {
    let records = &batch().records;
    let encoded = serde_json::to_string(records).unwrap();
    let decoded: Vec<StudentRecord> = serde_json::from_str(&encoded).unwrap();
    assert_eq!(&decoded, records, "dataset files must preserve records exactly");

    let rebuilt = SearchIndex::new(decoded);
    assert_eq!(rebuilt.len(), 8);
    assert_eq!(rebuilt.lookup_by_key(10250).unwrap().name_ar, "سارة علي");
}

#[test]
fn test_concurrent_queries_share_one_index() {
    let index = index();
    let index = &index;
    std::thread::scope(|scope| {
        for query in ["ali", "5", "علي", "102", ""] {
            scope.spawn(move || {
                let _ = index.search(query);
            });
        }
    });
}
