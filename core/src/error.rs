use crate::document::DocId;

/// Errors reported by the engine.
///
/// Every variant describes a rejected argument; nothing is retried internally
/// and the engine state is left untouched when an operation fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("negative document id {0} is not allowed")]
    NegativeDocumentId(DocId),

    #[error("document id {0} is already indexed")]
    DuplicateDocumentId(DocId),

    #[error("text of document {0} contains control characters")]
    InvalidDocumentText(DocId),

    #[error("stop word {0:?} contains control characters")]
    InvalidStopWord(String),

    #[error("query word {0:?} contains control characters")]
    InvalidQueryWord(String),

    /// A lone `-` or a word starting with `--`.
    #[error("malformed query word {0:?}")]
    MalformedQueryWord(String),
}

impl Error {
    /// All engine errors belong to the invalid-argument family.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::NegativeDocumentId(_)
                | Error::DuplicateDocumentId(_)
                | Error::InvalidDocumentText(_)
                | Error::InvalidStopWord(_)
                | Error::InvalidQueryWord(_)
                | Error::MalformedQueryWord(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
