use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\S+").expect("valid regex");
    static ref CONTROL: Regex = Regex::new(r"[\x00-\x1F]").expect("valid regex");
}

/// Split text into whitespace-delimited words. No normalization is applied:
/// matching is exact and case-sensitive.
pub fn split_into_words(text: &str) -> Vec<&str> {
    WORD.find_iter(text).map(|m| m.as_str()).collect()
}

/// A word (or a whole text) is valid when it carries no ASCII control codes
/// (`\0` through `\x1F`).
pub fn is_valid_word(text: &str) -> bool { !CONTROL.is_match(text) }
