//! # Error Types

use crate::base::Token;

/// Errors from tokenizer operations.
#[derive(Debug, thiserror::Error)]
pub enum TokenizerError {
    /// Strict encoding met a character with no vocabulary entry.
    #[error("unknown character {character:?} at index {index}")]
    UnknownCharacter {
        /// The offending character.
        character: char,
        /// Character (not byte) index into the input text.
        index: usize,
    },

    /// Decoding met an id with no vocabulary entry.
    #[error("invalid token id {id} at index {index}")]
    InvalidId {
        /// The offending id.
        id: Token,
        /// Position in the id sequence.
        index: usize,
    },

    /// The tokenizer has no vocabulary bound yet.
    #[error("tokenizer has no vocabulary; fit or load one first")]
    NotInitialized,

    /// The tokenizer already has a vocabulary; create a new instance instead.
    #[error("tokenizer already has a vocabulary; create a new instance to rebind")]
    AlreadyInitialized,

    /// A persisted vocabulary is unparseable or breaks the bijection invariants.
    #[error("malformed vocabulary: {0}")]
    MalformedVocabulary(String),

    /// A boundary pattern failed to compile.
    #[error(transparent)]
    InvalidPattern(#[from] regex::Error),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for TokenizerError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Self::Io(e.into())
        } else {
            Self::MalformedVocabulary(e.to_string())
        }
    }
}

/// Result type for tokenizer operations.
pub type Result<T> = core::result::Result<T, TokenizerError>;
