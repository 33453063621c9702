//! # `chartok`
//!
//! A deterministic character tokenizer.
//!
//! * [`VocabularyBuilder`] counts the characters of a corpus and assigns ids
//!   by descending frequency, ties broken by ascending code point, after the
//!   reserved `<PAD>` (`0`) and `<UNK>` (`1`).
//! * [`Vocabulary`] is the resulting immutable bijection; it encodes, decodes,
//!   and round-trips through its JSON form.
//! * [`CharTokenizer`] owns one vocabulary, fitted or loaded, and refuses to
//!   work before it has one.
//!
//! Characters are delimited by the [`Boundary`] rule (whitespace and
//! punctuation by default). Boundary characters never receive ids.
//!
//! ```
//! use chartok::{CharTokenizer, Tokenizer};
//!
//! let mut tok = CharTokenizer::new();
//! tok.fit("aab b").unwrap();
//! assert_eq!(tok.encode("aab b", false).unwrap(), vec![2, 2, 3, 1, 3]);
//! assert_eq!(tok.decode(&[2, 1, 3]).unwrap(), "a<UNK>b");
//! assert!(tok.encode("c", true).is_err());
//! ```

pub mod base;
pub mod boundary;
pub mod builder;
pub mod error;
pub mod persist;
pub mod tokenizer;
pub mod vocab;

pub use base::{
    FIRST_CHAR_ID,
    PAD_ID,
    PAD_SYMBOL,
    Symbol,
    Token,
    Tokenizer,
    UNK_ID,
    UNK_SYMBOL,
    UnknownPolicy,
};
pub use boundary::{Boundary, DEFAULT_BOUNDARY_PATTERN};
pub use builder::VocabularyBuilder;
pub use error::{Result, TokenizerError};
pub use tokenizer::CharTokenizer;
pub use vocab::Vocabulary;
