use proptest::prelude::*;
use search_core::{DocumentStatus, ExecutionPolicy, SearchServer, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};

const STOP_WORDS: &str = "a the";

fn corpus() -> impl Strategy<Value = Vec<(Vec<String>, Vec<i32>)>> {
    prop::collection::vec(
        (
            prop::collection::vec("(a|the|[b-f]{1,2})", 0..12),
            prop::collection::vec(-10i32..10, 0..4),
        ),
        1..25,
    )
}

fn build(docs: &[(Vec<String>, Vec<i32>)]) -> SearchServer {
    let mut server = SearchServer::new(STOP_WORDS).unwrap();
    for (id, (words, ratings)) in (0..).zip(docs) {
        server.add_document(id, &words.join(" "), DocumentStatus::Actual, ratings).unwrap();
    }
    server
}

proptest! {
    #[test]
    fn add_then_remove_leaves_no_trace(docs in corpus(), parallel in any::<bool>()) {
        let mut server = build(&docs);
        let policy = if parallel { ExecutionPolicy::Parallel } else { ExecutionPolicy::Sequential };
        let ids: Vec<i32> = server.iter().collect();
        for id in ids {
            server.remove_document_with(policy, id);
            prop_assert!(server.word_frequencies(id).is_empty());
            prop_assert!(!server.iter().any(|live| live == id));
        }
        prop_assert_eq!(server.document_count(), 0);
    }

    #[test]
    fn ranking_is_capped_and_ordered(docs in corpus(), query in prop::collection::vec("[b-f]{1,2}", 1..4)) {
        let server = build(&docs);
        let found = server.find_top_documents(&query.join(" ")).unwrap();
        prop_assert!(found.len() <= MAX_RESULT_DOCUMENT_COUNT);
        for pair in found.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            if (left.relevance - right.relevance).abs() < RELEVANCE_EPSILON {
                prop_assert!(left.rating >= right.rating || left.relevance > right.relevance);
            } else {
                prop_assert!(left.relevance > right.relevance);
            }
        }
    }

    #[test]
    fn minus_words_always_exclude(docs in corpus(), plus in "[b-f]{1,2}", minus in "[b-f]{1,2}") {
        prop_assume!(plus != minus);
        let server = build(&docs);
        let query = format!("{plus} -{minus}");
        for document in server.find_top_documents(&query).unwrap() {
            prop_assert!(!server.word_frequencies(document.id).contains_key(&minus));
        }
        for id in &server {
            let (words, _) = server.match_document(&query, id).unwrap();
            if server.word_frequencies(id).contains_key(&minus) {
                prop_assert!(words.is_empty());
            }
        }
    }

    #[test]
    fn matching_own_words_returns_them(docs in corpus()) {
        let server = build(&docs);
        for id in &server {
            let own: Vec<String> = server.word_frequencies(id).keys().cloned().collect();
            let (words, _) = server.match_document(&own.join(" "), id).unwrap();
            prop_assert_eq!(words, own);
        }
    }

    #[test]
    fn removal_policies_agree(docs in corpus(), victim in 0i32..25) {
        let mut sequential = build(&docs);
        let mut parallel = build(&docs);
        sequential.remove_document_with(ExecutionPolicy::Sequential, victim);
        parallel.remove_document_with(ExecutionPolicy::Parallel, victim);
        prop_assert_eq!(sequential.iter().collect::<Vec<_>>(), parallel.iter().collect::<Vec<_>>());
        for query in ["b c d", "e f -b", "bb cc dd"] {
            prop_assert_eq!(sequential.find_top_documents(query).unwrap(), parallel.find_top_documents(query).unwrap());
        }
    }
}
