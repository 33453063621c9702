use std::fmt;

use crate::error::Result;

pub type Token = i32;

/// Id permanently bound to [`PAD_SYMBOL`].
pub const PAD_ID: Token = 0;
/// Id permanently bound to [`UNK_SYMBOL`].
pub const UNK_ID: Token = 1;
/// First id handed out to an observed character.
pub const FIRST_CHAR_ID: Token = 2;

pub const PAD_SYMBOL: &str = "<PAD>";
pub const UNK_SYMBOL: &str = "<UNK>";

/// A vocabulary entry: one of the two reserved symbols, or a single raw character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Pad,
    Unk,
    Char(char),
}

impl Symbol {
    /// Push the literal text of this symbol onto `out`.
    pub fn write_to(&self, out: &mut String) {
        match self {
            Symbol::Pad => out.push_str(PAD_SYMBOL),
            Symbol::Unk => out.push_str(UNK_SYMBOL),
            Symbol::Char(c) => out.push(*c),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Pad => f.write_str(PAD_SYMBOL),
            Symbol::Unk => f.write_str(UNK_SYMBOL),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}

/// Selects what `encode` does with a character that has no vocabulary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPolicy {
    /// Emit [`UNK_ID`] in its place.
    #[default]
    Substitute,
    /// Fail on the first such character.
    Reject,
}

impl From<bool> for UnknownPolicy {
    /// `true` is strict mode.
    fn from(strict: bool) -> Self {
        if strict {
            UnknownPolicy::Reject
        } else {
            UnknownPolicy::Substitute
        }
    }
}

pub trait Tokenizer {
    /// Encode `text` into token ids under the given unknown-character policy.
    fn encode_with(&self, text: &str, policy: UnknownPolicy) -> Result<Vec<Token>>;

    /// Decode token ids back into text.
    fn decode(&self, ids: &[Token]) -> Result<String>;

    /// Encode `text`; `strict` rejects characters missing from the vocabulary
    /// instead of substituting `<UNK>`.
    fn encode(&self, text: &str, strict: bool) -> Result<Vec<Token>> {
        self.encode_with(text, UnknownPolicy::from(strict))
    }
}
