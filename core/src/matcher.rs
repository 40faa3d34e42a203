use crate::document::DocId;
use crate::index::DocumentIndex;
use crate::query::Query;
use crate::ExecutionPolicy;
use rayon::prelude::*;

/// Plus-words of `query` present in document `id`, ascending. Empty when any
/// minus-word is present.
pub(crate) fn matched_words(index: &DocumentIndex, query: &Query, id: DocId, policy: ExecutionPolicy) -> Vec<String> {
    let in_document = |word: &String| index.postings(word).map_or(false, |postings| postings.contains_key(&id));

    match policy {
        ExecutionPolicy::Sequential => {
            if query.minus_words.iter().any(in_document) {
                return Vec::new();
            }
            query.plus_words.iter().filter(|word| in_document(*word)).cloned().collect()
        }
        ExecutionPolicy::Parallel => {
            if query.minus_words.par_iter().any(in_document) {
                return Vec::new();
            }
            let mut words: Vec<String> = query.plus_words.par_iter().filter(|word| in_document(*word)).cloned().collect();
            words.sort_unstable();
            words
        }
    }
}
