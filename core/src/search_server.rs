use crate::document::{DocId, Document, DocumentStatus};
use crate::error::{Error, Result};
use crate::index::DocumentIndex;
use crate::matcher::matched_words;
use crate::query::Query;
use crate::scorer::{find_all_documents, rank};
use crate::stop_words::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};
use crate::ExecutionPolicy;
use std::collections::{btree_set, BTreeMap};
use std::iter::Copied;

static NO_FREQUENCIES: BTreeMap<String, f64> = BTreeMap::new();

/// The search engine.
///
/// Mutating calls take `&mut self`, so a shared instance needs an external
/// lock for writers. Read-only calls are safe from many threads at once.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: DocumentIndex,
}

impl SearchServer {
    /// Engine with the whitespace-separated `stop_words`.
    pub fn new(stop_words: &str) -> Result<Self> {
        Ok(Self::with_stop_words(StopWords::from_text(stop_words)?))
    }

    /// Engine with stop words given one by one.
    pub fn from_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_stop_words(StopWords::from_words(stop_words)?))
    }

    pub fn with_stop_words(stop_words: StopWords) -> Self {
        Self { stop_words, index: DocumentIndex::default() }
    }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }

    /// Index a new document. Fails for a negative or already used id and for
    /// text holding control characters; nothing is indexed on failure.
    pub fn add_document(&mut self, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if id < 0 {
            return Err(Error::NegativeDocumentId(id));
        }
        if self.index.contains(id) {
            return Err(Error::DuplicateDocumentId(id));
        }
        if !is_valid_word(text) {
            return Err(Error::InvalidDocumentText(id));
        }

        let words: Vec<&str> = split_into_words(text)
            .into_iter()
            .filter(|word| !self.stop_words.contains(word))
            .collect();
        let rating = compute_average_rating(ratings);
        self.index.insert(id, &words, status, rating);
        tracing::debug!(doc_id = id, words = words.len(), rating, %status, "indexed document");
        Ok(())
    }

    pub fn document_count(&self) -> usize { self.index.len() }

    /// Top documents with [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, move |_, document_status, _| document_status == status)
    }

    /// Top documents accepted by `predicate(id, status, rating)`, ranked by
    /// relevance with near ties broken by rating.
    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = Query::parse(raw_query, &self.stop_words)?;
        Ok(rank(find_all_documents(&self.index, &query, predicate)))
    }

    pub fn match_document(&self, raw_query: &str, id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, id)
    }

    /// Plus-words of the query found in document `id` (ascending) together
    /// with the document status. The word list is empty when a minus-word is
    /// found. An unknown id yields no words and the default status.
    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocId,
    ) -> Result<(Vec<String>, DocumentStatus)> {
        let query = Query::parse(raw_query, &self.stop_words)?;
        let Some(data) = self.index.document(id) else {
            tracing::debug!(doc_id = id, "match requested for unknown document");
            return Ok((Vec::new(), DocumentStatus::default()));
        };
        Ok((matched_words(&self.index, &query, id, policy), data.status))
    }

    /// Remove a document everywhere. Unknown ids are ignored.
    pub fn remove_document(&mut self, id: DocId) {
        self.remove_document_with(ExecutionPolicy::Sequential, id)
    }

    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, id: DocId) {
        match self.index.remove(id, policy) {
            Some(postings) => tracing::debug!(doc_id = id, postings, ?policy, "removed document"),
            None => tracing::trace!(doc_id = id, "nothing to remove"),
        }
    }

    /// Term frequencies of document `id`; empty for an unknown id.
    pub fn word_frequencies(&self, id: DocId) -> &BTreeMap<String, f64> {
        self.index.document(id).map_or(&NO_FREQUENCIES, |data| &data.word_frequencies)
    }

    /// Live document ids, ascending.
    pub fn iter(&self) -> Copied<btree_set::Iter<'_, DocId>> { self.index.ids().iter().copied() }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = Copied<btree_set::Iter<'a, DocId>>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// Integer mean of the samples (truncating), 0 when there are none.
fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    (sum / ratings.len() as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rating_truncates_toward_zero() {
        assert_eq!(compute_average_rating(&[]), 0);
        assert_eq!(compute_average_rating(&[8, -3]), 2);
        assert_eq!(compute_average_rating(&[5, -12, 2, 1]), -1);
        assert_eq!(compute_average_rating(&[i32::MAX, i32::MAX]), i32::MAX);
    }

    #[test]
    fn failed_add_leaves_engine_untouched() {
        let mut server = SearchServer::new("and").unwrap();
        server.add_document(1, "cat and dog", DocumentStatus::Actual, &[1]).unwrap();
        assert_eq!(server.add_document(1, "other", DocumentStatus::Actual, &[]), Err(Error::DuplicateDocumentId(1)));
        assert_eq!(server.add_document(-1, "other", DocumentStatus::Actual, &[]), Err(Error::NegativeDocumentId(-1)));
        assert_eq!(
            server.add_document(2, "bad\u{3}word", DocumentStatus::Actual, &[]),
            Err(Error::InvalidDocumentText(2))
        );
        assert_eq!(server.document_count(), 1);
        assert_eq!(server.iter().collect::<Vec<_>>(), vec![1]);
        assert_eq!(server.word_frequencies(1).len(), 2);
    }
}
