use crate::document::{DocId, DocumentStatus};
use crate::ExecutionPolicy;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub(crate) type Postings = BTreeMap<DocId, f64>;

#[derive(Debug, Clone)]
pub(crate) struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
    pub word_frequencies: BTreeMap<String, f64>,
}

/// Inverted index, forward index and id registry, kept consistent with each
/// other. Only this type mutates them.
///
/// Invariants:
/// - `word` is a key of `documents[id].word_frequencies` iff `id` is a key of
///   `postings[word]`, with the same term frequency.
/// - no postings entry is empty.
/// - `ids` holds exactly the keys of `documents`.
#[derive(Debug, Default)]
pub(crate) struct DocumentIndex {
    postings: HashMap<String, Postings>,
    documents: HashMap<DocId, DocumentData>,
    ids: BTreeSet<DocId>,
}

impl DocumentIndex {
    pub fn contains(&self, id: DocId) -> bool { self.documents.contains_key(&id) }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn ids(&self) -> &BTreeSet<DocId> { &self.ids }

    pub fn document(&self, id: DocId) -> Option<&DocumentData> { self.documents.get(&id) }

    pub fn postings(&self, word: &str) -> Option<&Postings> { self.postings.get(word) }

    #[cfg(test)]
    pub fn term_count(&self) -> usize { self.postings.len() }

    /// `ln(N / df)`. `None` for a word no document contains.
    pub fn inverse_document_frequency(&self, word: &str) -> Option<f64> {
        let df = self.postings.get(word)?.len();
        if df == 0 {
            return None;
        }
        Some((self.documents.len() as f64 / df as f64).ln())
    }

    /// Index already validated, stop-word free `words`. The caller guarantees
    /// `id` is not present yet.
    pub fn insert(&mut self, id: DocId, words: &[&str], status: DocumentStatus, rating: i32) {
        let mut word_frequencies: BTreeMap<String, f64> = BTreeMap::new();
        if !words.is_empty() {
            let inverse_word_count = 1.0 / words.len() as f64;
            for word in words {
                *word_frequencies.entry((*word).to_string()).or_insert(0.0) += inverse_word_count;
            }
        }
        for (word, tf) in &word_frequencies {
            self.postings.entry(word.clone()).or_default().insert(id, *tf);
        }
        self.ids.insert(id);
        self.documents.insert(id, DocumentData { rating, status, word_frequencies });
    }

    /// Retract a document from every structure. Returns the number of postings
    /// entries dropped, or `None` when the id is unknown.
    ///
    /// The document's buckets are taken out of the map in ascending word
    /// order, edited (in parallel for [`ExecutionPolicy::Parallel`]) and put
    /// back in the same order; buckets left empty are not put back.
    pub fn remove(&mut self, id: DocId, policy: ExecutionPolicy) -> Option<usize> {
        let data = self.documents.remove(&id)?;
        self.ids.remove(&id);

        let words: Vec<&String> = data.word_frequencies.keys().collect();
        let mut buckets: Vec<Postings> = words
            .iter()
            .map(|word| self.postings.remove(word.as_str()).unwrap_or_default())
            .collect();

        let removed = match policy {
            ExecutionPolicy::Sequential => buckets.iter_mut().filter_map(|b| b.remove(&id)).count(),
            ExecutionPolicy::Parallel => buckets.par_iter_mut().filter_map(|b| b.remove(&id)).count(),
        };

        for (word, bucket) in words.into_iter().zip(buckets) {
            if !bucket.is_empty() {
                self.postings.insert(word.clone(), bucket);
            }
        }
        Some(removed)
    }
}
