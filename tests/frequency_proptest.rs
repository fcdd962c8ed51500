//! Property-based tests for normalization, ordering and derived views.

use std::collections::HashMap;

use docfreq::analysis::{
    build_frequency_table,
    filter_by_selection,
    filter_excluding_stop_words,
    normalize,
    FrequencyTable,
    StopWordSet,
};
use proptest::prelude::*;

/// Tokens drawn from a small vocabulary so repeats and ties are common.
fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "(the|The|THE|fox|Fox|und|и|кот|data|Data)[.,!?]?",
        "[a-zA-Z]{1,4}",
        "[.,;:!?—-]{1,3}",
        "\\PC{0,6}",
    ]
}

fn tokens_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(token_strategy(), 0..60)
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in "\\PC{0,12}") {
        if let Some(once) = normalize(&raw) {
            prop_assert_eq!(normalize(&once), Some(once.clone()));
            prop_assert!(once.chars().all(char::is_alphanumeric));
        }
    }

    #[test]
    fn counts_match_naive_tally(tokens in tokens_strategy()) {
        let table = build_frequency_table(&tokens);

        let mut expected: HashMap<String, u32> = HashMap::new();
        for token in &tokens {
            if let Some(word) = normalize(token) {
                *expected.entry(word).or_insert(0) += 1;
            }
        }

        prop_assert_eq!(table.len(), expected.len());
        for entry in table.iter() {
            prop_assert!(entry.count >= 1);
            prop_assert_eq!(expected.get(&entry.word), Some(&entry.count));
        }
    }

    #[test]
    fn order_is_count_desc_then_first_seen(tokens in tokens_strategy()) {
        let table = build_frequency_table(&tokens);

        let mut first_seen: HashMap<String, usize> = HashMap::new();
        for (idx, token) in tokens.iter().enumerate() {
            if let Some(word) = normalize(token) {
                first_seen.entry(word).or_insert(idx);
            }
        }

        for pair in table.entries().windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.count >= b.count);
            if a.count == b.count {
                prop_assert!(first_seen[&a.word] < first_seen[&b.word]);
            }
        }
    }

    #[test]
    fn stop_word_view_is_strict_subset(tokens in tokens_strategy()) {
        let table = build_frequency_table(&tokens);
        let stop_words = StopWordSet::multilingual();
        let view = filter_excluding_stop_words(&table, &stop_words);

        for entry in view.iter() {
            prop_assert!(!stop_words.contains(&entry.word));
            prop_assert_eq!(table.get(&entry.word), Some(entry.count));
        }
        let removed = table.iter().filter(|entry| stop_words.contains(&entry.word)).count();
        prop_assert_eq!(view.len() + removed, table.len());
        prop_assert!(is_subsequence(&view, &table));
    }

    #[test]
    fn selection_view_keeps_order_and_never_invents(
        tokens in tokens_strategy(),
        selection in prop::collection::vec(token_strategy(), 0..8),
    ) {
        let table = build_frequency_table(&tokens);
        let view = filter_by_selection(&table, &selection);

        for entry in view.iter() {
            prop_assert!(entry.count >= 1);
            prop_assert_eq!(table.get(&entry.word), Some(entry.count));
            prop_assert!(selection.iter().any(|s| normalize(s).as_deref() == Some(entry.word.as_str())));
        }
        prop_assert!(is_subsequence(&view, &table));
    }

    #[test]
    fn json_round_trip_preserves_pairs_and_order(tokens in tokens_strategy()) {
        let table = build_frequency_table(&tokens);
        let json = serde_json::to_string_pretty(&table).unwrap();
        let parsed: FrequencyTable = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, table);
    }
}

fn is_subsequence(view: &FrequencyTable, table: &FrequencyTable) -> bool {
    let mut source = table.iter();
    view.iter().all(|entry| source.any(|candidate| candidate == entry))
}
