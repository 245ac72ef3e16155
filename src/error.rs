use std::fmt;

/// Which half of a two-term list request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSide {
    Predicate,
    Object,
}

impl fmt::Display for ListSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate => write!(f, "predicate"),
            Self::Object => write!(f, "object"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TermShortError {
    /// The id does not have the required `0x` + hex-digit shape.
    #[error("invalid hex id: {id}")]
    InvalidInput { id: String },

    /// A base62 string contained a character outside the alphabet.
    #[error("invalid base62 character: '{ch}'")]
    InvalidChar { ch: char },

    /// A decoded base62 value does not fit in 256 bits.
    #[error("decoded value exceeds 256 bits")]
    OutOfRange,

    /// The classifier rejected the id, or a base62 id failed to decode.
    #[error("unrecognized id format: {id}")]
    InvalidFormat { id: String },

    /// The term store has no term matching the id.
    #[error("term not found: {id}")]
    NotFound { id: String },

    /// Strict lookup matched more than one term.
    #[error("ambiguous id '{partial}': {count} terms match")]
    Ambiguous { partial: String, count: usize },

    /// One half of a list request failed.
    #[error("{side} id failed: {source}")]
    ListSide {
        side: ListSide,
        #[source]
        source: Box<TermShortError>,
    },
}

impl TermShortError {
    /// Wraps an error with the list side it occurred on.
    #[must_use]
    pub fn on_side(self, side: ListSide) -> Self {
        Self::ListSide {
            side,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, TermShortError>;
