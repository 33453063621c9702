//! # Character Boundary Rule
//!
//! Text is split into runs separated by boundary matches. Characters inside a
//! run are vocabulary characters; characters inside a boundary match are
//! separators and never get an id of their own.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Result;

/// Whitespace, punctuation, and math/currency/modifier symbols.
///
/// Covers all of ASCII punctuation; letters, digits, marks and other symbols
/// (emoji included) stay characters.
pub const DEFAULT_BOUNDARY_PATTERN: &str = r"[\s\p{P}\p{Sm}\p{Sc}\p{Sk}]";

lazy_static! {
    static ref DEFAULT_BOUNDARY_REGEX: Regex = Regex::new(DEFAULT_BOUNDARY_PATTERN).unwrap();
}

/// One input character, as seen by segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSlot {
    /// Character index into the text.
    pub index: usize,
    pub ch: char,
    /// Whether the character lies inside a boundary match.
    pub boundary: bool,
}

/// The compiled boundary rule.
#[derive(Clone)]
pub struct Boundary {
    regex: Regex,
}

impl Boundary {
    /// Compile a custom boundary pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Split `text` into alternating `(slice, is_boundary)` segments.
    ///
    /// Concatenating the slices gives back `text`; empty matches are dropped.
    pub fn segments<'t>(&self, text: &'t str) -> Vec<(&'t str, bool)> {
        let mut segments = Vec::new();
        let mut last = 0;
        for m in self.regex.find_iter(text) {
            if m.is_empty() {
                continue;
            }
            if m.start() > last {
                segments.push((&text[last..m.start()], false));
            }
            segments.push((m.as_str(), true));
            last = m.end();
        }
        if last < text.len() {
            segments.push((&text[last..], false));
        }
        segments
    }

    /// Visit every character of `text` in order, tagged with its index and class.
    pub fn slots<'t>(&self, text: &'t str) -> impl Iterator<Item = CharSlot> + 't {
        self.segments(text)
            .into_iter()
            .flat_map(|(segment, boundary)| segment.chars().map(move |ch| (ch, boundary)))
            .enumerate()
            .map(|(index, (ch, boundary))| CharSlot {
                index,
                ch,
                boundary,
            })
    }

    /// Iterate only the vocabulary characters of `text`.
    pub fn characters<'t>(&self, text: &'t str) -> impl Iterator<Item = char> + 't {
        self.slots(text)
            .filter(|slot| !slot.boundary)
            .map(|slot| slot.ch)
    }

    /// Whether `c`, taken on its own, is a boundary character.
    pub fn is_boundary(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.regex
            .find(c.encode_utf8(&mut buf))
            .is_some_and(|m| !m.is_empty())
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self {
            regex: DEFAULT_BOUNDARY_REGEX.clone(),
        }
    }
}

impl PartialEq for Boundary {
    fn eq(&self, other: &Self) -> bool {
        self.pattern() == other.pattern()
    }
}

impl Eq for Boundary {}

impl fmt::Debug for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Boundary").field(&self.pattern()).finish()
    }
}
