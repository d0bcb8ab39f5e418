//! Sliding-window n-gram extraction
//!
//! A line's tokens are padded with `width` sentinels on each side so that
//! every real token can sit at the window center with a full-width context.
//! At each center the unigram, bigram and trigram starting there are looked
//! up independently; every hit produces its own window. A phrase and a
//! shorter phrase it contains are therefore both recorded from the same text.

use crate::index::types::{ContextWindow, Term, WindowWidth, MAX_ARITY};
use crate::index::vocabulary::Vocabulary;
use std::iter;

/// Extracts (term, window) pairs from token sequences for one vocabulary
pub struct WindowExtractor<'v, V: Vocabulary + ?Sized> {
    vocabulary: &'v V,
    width: WindowWidth,
    separator: char,
    sentinel: String,
}

impl<'v, V: Vocabulary + ?Sized> WindowExtractor<'v, V> {
    /// The sentinel is the bare separator, which the tokenizer never emits
    pub fn new(vocabulary: &'v V, width: WindowWidth, separator: char) -> Self {
        Self {
            vocabulary,
            width,
            separator,
            sentinel: separator.to_string(),
        }
    }

    /// Call `emit` for every vocabulary match, in scan order
    pub fn for_each_match<F>(&self, tokens: &[String], mut emit: F)
    where
        F: FnMut(&str, ContextWindow),
    {
        if tokens.is_empty() {
            return;
        }

        let width = self.width.get();
        let context_size = self.width.context_size();
        let max_arity = self.max_arity();

        let padded: Vec<&str> = iter::repeat_n(self.sentinel.as_str(), width)
            .chain(tokens.iter().map(String::as_str))
            .chain(iter::repeat_n(self.sentinel.as_str(), width))
            .collect();

        // Real tokens occupy padded[width..end]
        let end = width + tokens.len();
        let mut candidate = String::new();

        for center in width..end {
            candidate.clear();

            for arity in 1..=max_arity {
                // Exclusive end of the n-gram; never reaches into the right padding
                let stop = center + arity;
                if stop > end {
                    break;
                }

                if arity > 1 {
                    candidate.push(self.separator);
                }
                candidate.push_str(padded[stop - 1]);

                if !self.vocabulary.contains(&candidate) {
                    continue;
                }

                let mut window = ContextWindow::with_capacity(width);
                window.extend(padded[center - context_size..center].iter().map(|t| t.to_string()));
                window.push(candidate.clone());
                window.extend(padded[stop..stop + context_size].iter().map(|t| t.to_string()));

                emit(&candidate, window);
            }
        }
    }

    /// Arity limit for lookups. A vocabulary that counted its arity with a
    /// different separator gets every length looked up.
    fn max_arity(&self) -> usize {
        match self.vocabulary.term_separator() {
            Some(sep) if sep != self.separator => MAX_ARITY,
            _ => self.vocabulary.max_arity().clamp(1, MAX_ARITY),
        }
    }

    /// Collect every match of a line
    pub fn extract(&self, tokens: &[String]) -> Vec<(Term, ContextWindow)> {
        let mut matches = Vec::new();
        self.for_each_match(tokens, |term, window| matches.push((term.to_string(), window)));
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::vocabulary::TermSet;

    fn tokens(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    fn width(w: usize) -> WindowWidth {
        WindowWidth::new(w).unwrap()
    }

    #[test]
    fn test_unigram_window_is_centered() {
        let vocab: TermSet = ["c"].into_iter().collect();
        let extractor = WindowExtractor::new(&vocab, width(5), '_');
        let matches = extractor.extract(&tokens("a b c d e"));

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].0, "c");
        assert_eq!(matches[0].1, tokens("a b c d e"));
    }

    #[test]
    fn test_line_edges_use_sentinels() {
        let vocab: TermSet = ["a", "c"].into_iter().collect();
        let extractor = WindowExtractor::new(&vocab, width(5), '_');
        let matches = extractor.extract(&tokens("a b c"));

        assert_eq!(matches[0].1, tokens("_ _ a b c"));
        assert_eq!(matches[1].1, tokens("a b c _ _"));
    }

    #[test]
    fn test_bigram_right_context_skips_consumed_token() {
        let vocab: TermSet = ["b_c"].into_iter().collect();
        let extractor = WindowExtractor::new(&vocab, width(5), '_');
        let matches = extractor.extract(&tokens("a b c d e"));

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].1, tokens("_ a b_c d e"));
    }

    #[test]
    fn test_trigram_right_context() {
        let vocab: TermSet = ["b_c_d"].into_iter().collect();
        let extractor = WindowExtractor::new(&vocab, width(3), '_');
        let matches = extractor.extract(&tokens("a b c d e"));

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].1, tokens("a b_c_d e"));
    }

    #[test]
    fn test_overlapping_granularities_all_recorded() {
        let vocab: TermSet = ["x", "x_y", "x_y_z"].into_iter().collect();
        let extractor = WindowExtractor::new(&vocab, width(3), '_');
        let terms: Vec<_> = extractor
            .extract(&tokens("x y z"))
            .into_iter()
            .map(|(t, _)| t)
            .collect();

        assert_eq!(terms, vec!["x", "x_y", "x_y_z"]);
    }

    #[test]
    fn test_ngram_never_spans_padding() {
        // "z_" would be z joined with a sentinel
        let vocab: TermSet = ["z__", "z_"].into_iter().collect();
        let extractor = WindowExtractor::new(&vocab, width(3), '_');
        assert!(extractor.extract(&tokens("x y z")).is_empty());
    }

    #[test]
    fn test_windows_always_full_width() {
        let vocab: TermSet = ["a", "a_b", "a_b_c", "c"].into_iter().collect();
        for w in [1, 3, 5, 7, 9] {
            let extractor = WindowExtractor::new(&vocab, width(w), '_');
            for (_, window) in extractor.extract(&tokens("a b c")) {
                assert_eq!(window.len(), w);
            }
        }
    }

    #[test]
    fn test_width_one_is_just_the_term() {
        let vocab: TermSet = ["a_b"].into_iter().collect();
        let extractor = WindowExtractor::new(&vocab, width(1), '_');
        let matches = extractor.extract(&tokens("a b"));
        assert_eq!(matches, vec![("a_b".to_string(), tokens("a_b"))]);
    }

    #[test]
    fn test_empty_line() {
        let vocab: TermSet = ["a"].into_iter().collect();
        let extractor = WindowExtractor::new(&vocab, width(5), '_');
        assert!(extractor.extract(&[]).is_empty());
    }

    #[test]
    fn test_repeated_term_recorded_per_position() {
        let vocab: TermSet = ["a"].into_iter().collect();
        let extractor = WindowExtractor::new(&vocab, width(3), '_');
        let matches = extractor.extract(&tokens("a a a"));
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[1].1, tokens("a a a"));
    }

    #[test]
    fn test_phrases_found_when_vocabulary_separator_differs() {
        // Built with '_', so it counts "new+york" as a single token
        let vocab: TermSet = ["new+york", "a+b+c"].into_iter().collect();
        assert_eq!(vocab.max_arity(), 1);

        let extractor = WindowExtractor::new(&vocab, width(3), '+');
        let matches = extractor.extract(&tokens("i love new york a b c"));

        let terms: Vec<&str> = matches.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(terms, vec!["new+york", "a+b+c"]);
        assert_eq!(matches[0].1, tokens("love new+york a"));
        assert_eq!(matches[1].1, tokens("york a+b+c +"));
    }
}
