//! # Character Tokenizer
//!
//! [`CharTokenizer`] starts unbound and is bound to exactly one
//! [`Vocabulary`] by fitting or loading. Once bound it never changes; a new
//! vocabulary needs a new tokenizer.

use std::{
    io::{Read, Write},
    path::Path,
};

use crate::{
    base::{Token, Tokenizer, UnknownPolicy},
    builder::VocabularyBuilder,
    error::{Result, TokenizerError},
    vocab::Vocabulary,
};

#[derive(Debug, Clone, Default)]
pub struct CharTokenizer {
    vocab: Option<Vocabulary>,
}

impl From<Vocabulary> for CharTokenizer {
    fn from(vocab: Vocabulary) -> Self {
        Self::from_vocabulary(vocab)
    }
}

impl CharTokenizer {
    /// An unbound tokenizer.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vocabulary(vocab: Vocabulary) -> Self {
        Self { vocab: Some(vocab) }
    }

    /// A tokenizer bound to the vocabulary stored at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_vocabulary(Vocabulary::load_path(path)?))
    }

    pub fn is_fitted(&self) -> bool {
        self.vocab.is_some()
    }

    pub fn vocabulary(&self) -> Result<&Vocabulary> {
        self.vocab.as_ref().ok_or(TokenizerError::NotInitialized)
    }

    pub fn vocab_size(&self) -> Result<usize> {
        Ok(self.vocabulary()?.len())
    }

    fn bind(&mut self, vocab: Vocabulary) -> &Vocabulary {
        self.vocab.insert(vocab)
    }

    fn ensure_unbound(&self) -> Result<()> {
        if self.vocab.is_some() {
            return Err(TokenizerError::AlreadyInitialized);
        }
        Ok(())
    }

    /// Build and bind a vocabulary from `text` with the default builder.
    pub fn fit(&mut self, text: &str) -> Result<&Vocabulary> {
        self.fit_with(&VocabularyBuilder::default(), [text])
    }

    /// Build and bind a vocabulary from `texts` with a configured builder.
    pub fn fit_with<'a, I>(&mut self, builder: &VocabularyBuilder, texts: I) -> Result<&Vocabulary>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.ensure_unbound()?;
        Ok(self.bind(builder.build_from_texts(texts)))
    }

    /// Bind the vocabulary read from `reader`.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<&Vocabulary> {
        self.ensure_unbound()?;
        let vocab = Vocabulary::load(reader)?;
        Ok(self.bind(vocab))
    }

    /// Bind the vocabulary stored at `path`.
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<&Vocabulary> {
        self.ensure_unbound()?;
        let vocab = Vocabulary::load_path(path)?;
        Ok(self.bind(vocab))
    }

    /// Write the bound vocabulary to `writer`.
    pub fn save<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.vocabulary()?.save(writer)
    }

    /// Write the bound vocabulary to `path`.
    pub fn save_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.vocabulary()?.save_path(path)
    }
}

impl Tokenizer for CharTokenizer {
    fn encode_with(&self, text: &str, policy: UnknownPolicy) -> Result<Vec<Token>> {
        self.vocabulary()?.encode_with(text, policy)
    }

    fn decode(&self, ids: &[Token]) -> Result<String> {
        self.vocabulary()?.decode(ids)
    }
}
