//! # Vocabulary Construction
//!
//! Characters are counted, then ordered by descending count with ties broken
//! by ascending code point. That order is total, so the resulting ids depend
//! only on the multiset of characters seen, never on the order they arrive in.

use std::collections::HashMap;

use indexmap::IndexSet;

use crate::{boundary::Boundary, vocab::Vocabulary};

#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    boundary: Boundary,
    min_frequency: usize,
}

impl Default for VocabularyBuilder {
    fn default() -> Self {
        Self {
            boundary: Boundary::default(),
            min_frequency: 1,
        }
    }
}

impl VocabularyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom boundary rule.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Leave out characters seen fewer than `min_frequency` times.
    ///
    /// `0` behaves like `1`.
    pub fn with_min_frequency(mut self, min_frequency: usize) -> Self {
        self.min_frequency = min_frequency.max(1);
        self
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn min_frequency(&self) -> usize {
        self.min_frequency
    }

    fn tally(&self, counts: &mut HashMap<char, usize>, text: &str) {
        for c in self.boundary.characters(text) {
            *counts.entry(c).or_insert(0) += 1;
        }
    }

    fn sorted_counts(&self, counts: HashMap<char, usize>) -> Vec<(char, usize)> {
        let mut sorted: Vec<(char, usize)> = counts
            .into_iter()
            .filter(|&(_, count)| count >= self.min_frequency)
            .collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        sorted
    }

    /// Character counts of `text`, in id assignment order.
    pub fn count(&self, text: &str) -> Vec<(char, usize)> {
        let mut counts = HashMap::new();
        self.tally(&mut counts, text);
        self.sorted_counts(counts)
    }

    /// Build a vocabulary from one text.
    pub fn build(&self, text: &str) -> Vocabulary {
        self.build_from_texts([text])
    }

    /// Build a vocabulary from several texts counted as one corpus.
    pub fn build_from_texts<'a, I>(&self, texts: I) -> Vocabulary
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = HashMap::new();
        for text in texts {
            self.tally(&mut counts, text);
        }
        let distinct = counts.len();

        let chars: IndexSet<char> = self
            .sorted_counts(counts)
            .into_iter()
            .map(|(c, _)| c)
            .collect();

        log::debug!(
            "built vocabulary: {} distinct characters, {} kept (min frequency {})",
            distinct,
            chars.len(),
            self.min_frequency
        );

        Vocabulary::from_distinct(chars, self.boundary.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{Symbol, Tokenizer};

    #[test]
    fn test_equal_counts_break_ties_by_char() {
        let vocab = VocabularyBuilder::new().build("aab b");
        let entries: Vec<_> = vocab.entries().collect();
        assert_eq!(
            entries,
            vec![
                (0, Symbol::Pad),
                (1, Symbol::Unk),
                (2, Symbol::Char('a')),
                (3, Symbol::Char('b')),
            ]
        );
        assert_eq!(vocab.encode("aab b", false).unwrap(), vec![2, 2, 3, 1, 3]);
        assert_eq!(vocab.encode("c", false).unwrap(), vec![1]);
    }

    #[test]
    fn test_frequency_orders_before_char() {
        let vocab = VocabularyBuilder::new().build("zzz yy x aa");
        let chars: String = vocab.chars().collect();
        assert_eq!(chars, "zayx");
    }

    #[test]
    fn test_count() {
        let builder = VocabularyBuilder::new();
        assert_eq!(builder.count("b, a. b!"), vec![('b', 2), ('a', 1)]);
        assert!(builder.count(" ,.! ").is_empty());
    }

    #[test]
    fn test_empty_text() {
        let vocab = VocabularyBuilder::new().build("");
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab, VocabularyBuilder::new().build("  ... \n"));
    }

    #[test]
    fn test_min_frequency() {
        let vocab = VocabularyBuilder::new()
            .with_min_frequency(2)
            .build("aaa bb c");
        assert_eq!(vocab.chars().collect::<String>(), "ab");
        assert_eq!(vocab.encode("abc", false).unwrap(), vec![2, 3, 1]);

        assert_eq!(VocabularyBuilder::new().with_min_frequency(0).min_frequency(), 1);
    }

    #[test]
    fn test_texts_counted_as_one_corpus() {
        let builder = VocabularyBuilder::new();
        let joined = builder.build("ab\nbc\ncc");
        let split = builder.build_from_texts(["cc", "bc", "ab"]);
        assert_eq!(joined, split);
        assert_eq!(joined.chars().collect::<String>(), "cba");
    }

    #[test]
    fn test_custom_boundary() {
        let boundary = Boundary::new(r"\|").unwrap();
        let vocab = VocabularyBuilder::new()
            .with_boundary(boundary.clone())
            .build("a a|b");
        assert_eq!(vocab.boundary(), &boundary);
        assert_eq!(vocab.chars().collect::<String>(), "a b");
    }
}
