//! In-memory full-text search over status-tagged, rated documents.
//!
//! Documents are indexed word by word (exact, whitespace-delimited words,
//! minus stop words) and ranked by TF-IDF relevance. Queries support
//! minus-words (`-word`) that disqualify any document containing them.

pub mod document;
pub mod error;
mod index;
mod matcher;
pub mod process_queries;
pub mod query;
mod scorer;
pub mod search_server;
pub mod stop_words;
pub mod tokenizer;

pub use document::{DocId, Document, DocumentStatus};
pub use error::{Error, Result};
pub use process_queries::{process_queries, process_queries_joined};
pub use search_server::SearchServer;
pub use stop_words::StopWords;

/// At most this many documents are returned by a top-documents query.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are ranked as equal and ordered by rating.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// How bulk work inside a single call is executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    /// Spread independent per-word work over the rayon thread pool.
    Parallel,
}
