use crate::error::{Error, Result};
use crate::tokenizer::{is_valid_word, split_into_words};
use std::collections::HashSet;

/// Words excluded from indexing, term frequencies and query matching.
/// Fixed once built.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Build from whitespace-separated text, e.g. `"и в на"`.
    pub fn from_text(text: &str) -> Result<Self> {
        if !is_valid_word(text) {
            return Err(Error::InvalidStopWord(text.to_string()));
        }
        Self::from_words(split_into_words(text))
    }

    /// Build from a collection of individual words. Empty strings are ignored.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.as_ref();
            if !is_valid_word(word) {
                return Err(Error::InvalidStopWord(word.to_string()));
            }
            if !word.is_empty() {
                set.insert(word.to_string());
            }
        }
        Ok(Self { words: set })
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }
}
