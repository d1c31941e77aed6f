use lse_core::index::scan_document;
use lse_core::occurrence::{Occurrence, OccurrenceList};
use lse_core::query::TOP_N;
use lse_core::tokenizer::{normalize, NoiseWords};
use lse_core::{KeywordIndex, SearchEngine};
use proptest::prelude::*;
use std::collections::HashSet;

fn noise() -> NoiseWords { ["the", "and", "of", "a"].into_iter().collect() }

fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-dA-D]{1,3}[.,?:;!]{0,2}",
        "[a-zA-Z0-9'.,-]{0,6}",
        Just("the".to_string()),
        Just("The.".to_string()),
    ]
}

fn corpus() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(token(), 0..20), 0..12)
}

fn build(docs: &[Vec<String>]) -> SearchEngine {
    SearchEngine::build(
        docs.iter().enumerate().map(|(i, toks)| (format!("doc{i}"), toks.clone())),
        noise(),
    )
}

proptest! {
    #[test]
    fn normalize_yields_lowercase_non_noise(raw in "\\PC{0,12}", tail in "[.,?:;!]{0,4}") {
        let n = noise();
        let kw = normalize(&raw, &n);
        if let Some(k) = &kw {
            prop_assert!(!k.is_empty());
            prop_assert!(k.chars().all(|c| c.is_ascii_lowercase()));
            prop_assert!(!n.contains(k));
        }
        let padded = format!("{}{}", raw.trim(), tail);
        prop_assert_eq!(normalize(&padded, &n), kw);
    }

    #[test]
    fn built_lists_are_sorted_and_unique(docs in corpus()) {
        let engine = build(&docs);
        for (_, list) in engine.index().iter_sorted() {
            prop_assert!(!list.is_empty());
            prop_assert!(list.is_sorted_by_frequency());
            let unique: HashSet<&str> = list.iter().map(|o| o.document.as_str()).collect();
            prop_assert_eq!(unique.len(), list.len());
        }
    }

    #[test]
    fn ties_go_after_existing_run(freqs in prop::collection::vec(1u32..5, 1..20), f in 1u32..5) {
        let mut list = OccurrenceList::singleton(Occurrence::new("seed", freqs[0]));
        for (i, fr) in freqs.iter().enumerate().skip(1) {
            list.push_sorted(Occurrence::new(format!("d{i}"), *fr));
        }
        list.push_sorted(Occurrence::new("new", f));
        let pos = list.iter().position(|o| o.document == "new").unwrap();
        prop_assert!(list.iter().skip(pos + 1).all(|o| o.frequency < f));
        prop_assert!(list.is_sorted_by_frequency());
    }

    #[test]
    fn remerge_is_idempotent(docs in corpus()) {
        let n = noise();
        let mut index = KeywordIndex::new();
        for (i, toks) in docs.iter().enumerate() {
            index.merge(scan_document(&format!("doc{i}"), toks, &n));
        }
        let snapshot: Vec<(String, OccurrenceList)> =
            index.iter_sorted().map(|(k, l)| (k.to_string(), l.clone())).collect();
        for (i, toks) in docs.iter().enumerate() {
            index.merge(scan_document(&format!("doc{i}"), toks, &n));
        }
        let again: Vec<(String, OccurrenceList)> =
            index.iter_sorted().map(|(k, l)| (k.to_string(), l.clone())).collect();
        prop_assert_eq!(snapshot, again);
    }

    #[test]
    fn query_results_bounded_and_distinct(docs in corpus(), kw1 in "[a-e]{1,2}", kw2 in "[a-e]{1,2}") {
        let engine = build(&docs);
        let hits = engine.top5_search(Some(&kw1), Some(&kw2));
        prop_assert!(hits.len() <= TOP_N);
        let unique: HashSet<&String> = hits.iter().collect();
        prop_assert_eq!(unique.len(), hits.len());
        let present = engine.index().get(&kw1).is_some() || engine.index().get(&kw2).is_some();
        prop_assert_eq!(hits.is_empty(), !present);
    }
}
