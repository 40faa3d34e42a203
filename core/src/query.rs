use crate::error::{Error, Result};
use crate::stop_words::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};
use std::collections::BTreeSet;

/// A parsed query. Both sets are deduplicated, stop-word free and iterate in
/// ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(token: &str) -> Result<QueryWord<'_>> {
    let (data, is_minus) = match token.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    if data.is_empty() || data.starts_with('-') {
        return Err(Error::MalformedQueryWord(token.to_string()));
    }
    if !is_valid_word(data) {
        return Err(Error::InvalidQueryWord(token.to_string()));
    }
    Ok(QueryWord { data, is_minus })
}

impl Query {
    /// Parse raw query text. Any invalid token fails the whole parse.
    pub fn parse(text: &str, stop_words: &StopWords) -> Result<Self> {
        let mut query = Query::default();
        for token in split_into_words(text) {
            let word = parse_query_word(token)?;
            if stop_words.contains(word.data) {
                continue;
            }
            if word.is_minus {
                query.minus_words.insert(word.data.to_string());
            } else {
                query.plus_words.insert(word.data.to_string());
            }
        }
        tracing::trace!(plus = query.plus_words.len(), minus = query.minus_words.len(), "parsed query");
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_words() -> StopWords { StopWords::from_text("and with").unwrap() }

    #[test]
    fn splits_plus_and_minus_words() {
        let q = Query::parse("curly -rat funny curly and -with", &stop_words()).unwrap();
        assert_eq!(q.plus_words.iter().map(String::as_str).collect::<Vec<_>>(), vec!["curly", "funny"]);
        assert_eq!(q.minus_words.iter().map(String::as_str).collect::<Vec<_>>(), vec!["rat"]);
    }

    #[test]
    fn inner_dash_is_part_of_word() {
        let q = Query::parse("ex-wife -well-known", &stop_words()).unwrap();
        assert!(q.plus_words.contains("ex-wife"));
        assert!(q.minus_words.contains("well-known"));
    }

    #[test]
    fn malformed_tokens_fail_whole_parse() {
        let sw = stop_words();
        assert_eq!(Query::parse("curly -", &sw), Err(Error::MalformedQueryWord("-".into())));
        assert_eq!(Query::parse("--rat curly", &sw), Err(Error::MalformedQueryWord("--rat".into())));
        assert_eq!(Query::parse("cu\u{2}rly", &sw), Err(Error::InvalidQueryWord("cu\u{2}rly".into())));
    }

    #[test]
    fn empty_query_is_valid() {
        let q = Query::parse("   ", &stop_words()).unwrap();
        assert!(q.plus_words.is_empty() && q.minus_words.is_empty());
    }
}
