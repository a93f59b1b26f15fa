#![no_main]

use libfuzzer_sys::fuzz_target;
use natija::index::SearchIndex;
use natija::record::StudentRecord;
use std::sync::OnceLock;

static INDEX: OnceLock<SearchIndex> = OnceLock::new();

fn index() -> &'static SearchIndex {
    INDEX.get_or_init(|| {
        let records = (1..=200)
            .map(|i| StudentRecord {
                dossier: i,
                name_fr: format!("Etudiant Numero {i}"),
                name_ar: format!("طالب رقم {i}"),
                ..Default::default()
            })
            .collect();
        SearchIndex::new(records)
    })
}

fuzz_target!(|query: &str| {
    // Arbitrary queries must never panic, exceed the cap or repeat a key.
    let results = index().search(query);
    assert!(results.len() <= 20);
    let mut keys: Vec<u64> = results.iter().map(|r| r.dossier).collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), results.len());
});
