use thiserror::Error;

/// Validation failures for statically authored content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentError {
    #[error("identifier cannot be empty")]
    EmptyId,

    #[error("invalid slug: {0}")]
    InvalidSlug(String),

    #[error("title cannot be empty")]
    EmptyTitle,

    #[error("duplicate item id in collection: {0}")]
    DuplicateId(String),

    #[error("unknown difficulty level: {0}")]
    UnknownLevel(String),

    #[error("correct option {index} is out of range for question {question}")]
    CorrectOptionOutOfRange { question: String, index: usize },
}
