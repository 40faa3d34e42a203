use crate::document::{DocId, Document, DocumentStatus};
use crate::index::DocumentIndex;
use crate::query::Query;
use crate::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
use std::collections::BTreeMap;

/// TF-IDF relevance of every document holding at least one plus-word and no
/// minus-word, restricted to those accepted by `predicate`. Unordered.
pub(crate) fn find_all_documents<P>(index: &DocumentIndex, query: &Query, predicate: P) -> Vec<Document>
where
    P: Fn(DocId, DocumentStatus, i32) -> bool,
{
    let mut relevance: BTreeMap<DocId, f64> = BTreeMap::new();
    for word in &query.plus_words {
        let (Some(postings), Some(idf)) = (index.postings(word), index.inverse_document_frequency(word)) else {
            continue;
        };
        for (&id, &tf) in postings {
            *relevance.entry(id).or_insert(0.0) += tf * idf;
        }
    }

    for word in &query.minus_words {
        if let Some(postings) = index.postings(word) {
            for id in postings.keys() {
                relevance.remove(id);
            }
        }
    }

    relevance
        .into_iter()
        .filter_map(|(id, relevance)| {
            let data = index.document(id)?;
            predicate(id, data.status, data.rating).then_some(Document { id, relevance, rating: data.rating })
        })
        .collect()
}

/// Order by relevance descending and keep the top [`MAX_RESULT_DOCUMENT_COUNT`].
///
/// Documents are first sorted strictly by relevance (then id). The sorted list
/// is cut into runs where every member lies within [`RELEVANCE_EPSILON`] of the
/// run's first element; each run is reordered by rating descending, then id.
/// Run boundaries depend only on the sorted sequence, so the result is a
/// deterministic total order even when near-equal relevances chain.
pub(crate) fn rank(mut documents: Vec<Document>) -> Vec<Document> {
    documents.sort_by(|a, b| b.relevance.total_cmp(&a.relevance).then(a.id.cmp(&b.id)));

    let mut start = 0;
    while start < documents.len() {
        let leader = documents[start].relevance;
        let end = documents[start..]
            .iter()
            .position(|d| leader - d.relevance >= RELEVANCE_EPSILON)
            .map_or(documents.len(), |offset| start + offset);
        documents[start..end].sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));
        start = end;
    }

    documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
    documents
}
