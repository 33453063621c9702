//! # Character Vocabulary
//!
//! An immutable bijection between [`Symbol`]s and [`Token`] ids.
//!
//! Ids `0` and `1` are always `<PAD>` and `<UNK>`; observed characters take
//! the contiguous ids from `2` upward. The characters live in an [`IndexSet`],
//! so the set index doubles as the id offset and both directions of the
//! mapping are kept by the one container.

use indexmap::IndexSet;

use crate::{
    base::{FIRST_CHAR_ID, PAD_ID, Symbol, Token, Tokenizer, UNK_ID, UnknownPolicy},
    boundary::Boundary,
    error::{Result, TokenizerError},
};

#[derive(Debug, Clone)]
pub struct Vocabulary {
    chars: IndexSet<char>,
    boundary: Boundary,
}

impl Vocabulary {
    /// Build from characters already in id order and known to be distinct
    /// non-boundary characters.
    pub(crate) fn from_distinct(chars: IndexSet<char>, boundary: Boundary) -> Self {
        Self { chars, boundary }
    }

    /// Build from characters in id order, the first getting id `2`.
    ///
    /// Fails if a character repeats. Whether a character is a boundary depends
    /// on its surrounding text, so entries are not checked against `boundary`;
    /// encoding still routes boundary matches to the unknown path.
    pub fn try_from_chars<I>(chars: I, boundary: Boundary) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        let mut set = IndexSet::new();
        for c in chars {
            if !set.insert(c) {
                return Err(TokenizerError::MalformedVocabulary(format!(
                    "duplicate character {c:?}"
                )));
            }
        }
        Ok(Self::from_distinct(set, boundary))
    }

    /// The vocabulary holding only `<PAD>` and `<UNK>`.
    pub fn reserved_only(boundary: Boundary) -> Self {
        Self::from_distinct(IndexSet::new(), boundary)
    }

    /// Number of entries, reserved ones included.
    pub fn len(&self) -> usize {
        self.chars.len() + FIRST_CHAR_ID as usize
    }

    pub fn vocab_size(&self) -> usize {
        self.len()
    }

    /// Always false; the reserved entries are always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn pad_id(&self) -> Token {
        PAD_ID
    }

    pub fn unk_id(&self) -> Token {
        UNK_ID
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// The id of an observed character.
    pub fn id_of(&self, c: char) -> Option<Token> {
        // At most 0x110000 distinct chars, so the offset fits a Token.
        self.chars
            .get_index_of(&c)
            .map(|idx| idx as Token + FIRST_CHAR_ID)
    }

    /// The symbol bound to `id`, if any.
    pub fn symbol_of(&self, id: Token) -> Option<Symbol> {
        match id {
            PAD_ID => Some(Symbol::Pad),
            UNK_ID => Some(Symbol::Unk),
            _ => {
                let idx = usize::try_from(id.checked_sub(FIRST_CHAR_ID)?).ok()?;
                self.chars.get_index(idx).copied().map(Symbol::Char)
            }
        }
    }

    /// All entries in ascending id order.
    pub fn entries(&self) -> impl Iterator<Item = (Token, Symbol)> + '_ {
        [(PAD_ID, Symbol::Pad), (UNK_ID, Symbol::Unk)].into_iter().chain(
            self.chars
                .iter()
                .enumerate()
                .map(|(idx, &c)| (idx as Token + FIRST_CHAR_ID, Symbol::Char(c))),
        )
    }

    /// The observed characters in id order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

impl PartialEq for Vocabulary {
    /// Equal when the same characters hold the same ids under the same boundary rule.
    fn eq(&self, other: &Self) -> bool {
        self.boundary == other.boundary && self.chars.iter().eq(other.chars.iter())
    }
}

impl Eq for Vocabulary {}

impl Tokenizer for Vocabulary {
    fn encode_with(&self, text: &str, policy: UnknownPolicy) -> Result<Vec<Token>> {
        self.boundary
            .slots(text)
            .map(|slot| {
                let known = if slot.boundary {
                    None
                } else {
                    self.id_of(slot.ch)
                };
                match (known, policy) {
                    (Some(id), _) => Ok(id),
                    (None, UnknownPolicy::Substitute) => Ok(UNK_ID),
                    (None, UnknownPolicy::Reject) => Err(TokenizerError::UnknownCharacter {
                        character: slot.ch,
                        index: slot.index,
                    }),
                }
            })
            .collect()
    }

    fn decode(&self, ids: &[Token]) -> Result<String> {
        let mut text = String::with_capacity(ids.len());
        for (index, &id) in ids.iter().enumerate() {
            let symbol = self
                .symbol_of(id)
                .ok_or(TokenizerError::InvalidId { id, index })?;
            symbol.write_to(&mut text);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab_vocab() -> Vocabulary {
        Vocabulary::try_from_chars(['a', 'b'], Boundary::default()).unwrap()
    }

    #[test]
    fn test_reserved_entries() {
        let vocab = Vocabulary::reserved_only(Boundary::default());
        assert_eq!(vocab.len(), 2);
        assert!(!vocab.is_empty());
        assert_eq!(vocab.symbol_of(0), Some(Symbol::Pad));
        assert_eq!(vocab.symbol_of(1), Some(Symbol::Unk));
        assert_eq!(vocab.symbol_of(2), None);
        assert_eq!(vocab.symbol_of(-1), None);
    }

    #[test]
    fn test_lookup_both_ways() {
        let vocab = ab_vocab();
        assert_eq!(vocab.vocab_size(), 4);
        assert_eq!(vocab.id_of('a'), Some(2));
        assert_eq!(vocab.id_of('b'), Some(3));
        assert_eq!(vocab.id_of('c'), None);
        assert_eq!(vocab.symbol_of(3), Some(Symbol::Char('b')));
        assert_eq!(vocab.symbol_of(4), None);
        assert_eq!(vocab.symbol_of(Token::MIN), None);

        let entries: Vec<(Token, Symbol)> = vocab.entries().collect();
        assert_eq!(
            entries,
            vec![
                (0, Symbol::Pad),
                (1, Symbol::Unk),
                (2, Symbol::Char('a')),
                (3, Symbol::Char('b')),
            ]
        );
    }

    #[test]
    fn test_try_from_chars_rejects_duplicates() {
        assert!(matches!(
            Vocabulary::try_from_chars(['a', 'a'], Boundary::default()),
            Err(TokenizerError::MalformedVocabulary(_))
        ));
    }

    #[test]
    fn test_boundary_entries_stay_unreachable() {
        let vocab = Vocabulary::try_from_chars(['a', ' '], Boundary::default()).unwrap();
        assert_eq!(vocab.id_of(' '), Some(3));
        assert_eq!(vocab.encode("a a", false).unwrap(), vec![2, 1, 2]);
        assert_eq!(vocab.decode(&[3]).unwrap(), " ");
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let ab = ab_vocab();
        let ba = Vocabulary::try_from_chars(['b', 'a'], Boundary::default()).unwrap();
        assert_eq!(ab, ab.clone());
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_encode_substitutes_unknown() {
        let vocab = ab_vocab();
        assert_eq!(vocab.encode("aab b", false).unwrap(), vec![2, 2, 3, 1, 3]);
        assert_eq!(vocab.encode("c", false).unwrap(), vec![1]);
        assert_eq!(vocab.encode("", true).unwrap(), Vec::<Token>::new());
    }

    #[test]
    fn test_encode_strict_rejects_unknown() {
        let vocab = ab_vocab();
        match vocab.encode("c", true) {
            Err(TokenizerError::UnknownCharacter { character, index }) => {
                assert_eq!(character, 'c');
                assert_eq!(index, 0);
            }
            other => panic!("expected UnknownCharacter, got {other:?}"),
        }
        match vocab.encode("ab\u{00e9}a", true) {
            Err(TokenizerError::UnknownCharacter { character, index }) => {
                assert_eq!(character, '\u{00e9}');
                assert_eq!(index, 2);
            }
            other => panic!("expected UnknownCharacter, got {other:?}"),
        }
        assert_eq!(vocab.encode("abba", true).unwrap(), vec![2, 3, 3, 2]);
    }

    #[test]
    fn test_encode_strict_rejects_boundary() {
        let vocab = ab_vocab();
        assert!(matches!(
            vocab.encode("a b", true),
            Err(TokenizerError::UnknownCharacter {
                character: ' ',
                index: 1
            })
        ));
    }

    #[test]
    fn test_decode() {
        let vocab = ab_vocab();
        assert_eq!(vocab.decode(&[2, 0, 3, 1]).unwrap(), "a<PAD>b<UNK>");
        assert_eq!(vocab.decode(&[]).unwrap(), "");
        assert!(matches!(
            vocab.decode(&[2, 3, 99]),
            Err(TokenizerError::InvalidId { id: 99, index: 2 })
        ));
        assert!(matches!(
            vocab.decode(&[-5]),
            Err(TokenizerError::InvalidId { id: -5, index: 0 })
        ));
    }
}
