//! Known-term vocabulary
//!
//! The extractor only asks one question of a vocabulary: is this term known?
//! [`TermSet`] is the in-memory implementation; vocabulary files hold one
//! term per line, optionally followed by whitespace and a count column that
//! is ignored.

use crate::error::{KwicError, KwicResult};
use crate::index::types::{term_arity, DEFAULT_SEPARATOR, MAX_ARITY};
use ahash::RandomState;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Membership test over terms
pub trait Vocabulary {
    fn contains(&self, term: &str) -> bool;

    /// Longest term arity worth looking up (1..=3), counted with
    /// [`term_separator`](Self::term_separator)
    fn max_arity(&self) -> usize {
        MAX_ARITY
    }

    /// Separator the vocabulary's own terms are joined with, if it has one.
    /// `max_arity` is only meaningful for this separator.
    fn term_separator(&self) -> Option<char> {
        None
    }
}

/// Hash set of known terms
#[derive(Debug, Clone)]
pub struct TermSet {
    terms: HashSet<String, RandomState>,
    separator: char,
    max_arity: usize,
}

impl TermSet {
    pub fn new(separator: char) -> Self {
        Self {
            terms: HashSet::with_hasher(RandomState::new()),
            separator,
            max_arity: 1,
        }
    }

    /// Add a term. Terms spanning more than three tokens are rejected.
    pub fn insert(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        let arity = term_arity(&term, self.separator);
        if term.is_empty() || arity > MAX_ARITY {
            return false;
        }
        self.max_arity = self.max_arity.max(arity);
        self.terms.insert(term)
    }

    /// Parse a vocabulary listing: one term per line, extra columns ignored
    pub fn parse(content: &str, separator: char) -> KwicResult<Self> {
        let mut set = Self::new(separator);
        let mut skipped = 0usize;

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let term = line.split_whitespace().next().unwrap_or(line);
            if term.chars().all(|c| c == separator) {
                return Err(KwicError::InvalidVocabulary {
                    line: line_no + 1,
                    reason: format!("term {:?} contains only separators", term),
                });
            }

            if !set.insert(term) && term_arity(term, separator) > MAX_ARITY {
                warn!(term, "skipping vocabulary term longer than {} tokens", MAX_ARITY);
                skipped += 1;
            }
        }

        info!(terms = set.len(), skipped, "vocabulary loaded");
        Ok(set)
    }

    /// Load a vocabulary file from disk
    pub fn load(path: &Path, separator: char) -> KwicResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, separator)
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

impl Default for TermSet {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

impl Vocabulary for TermSet {
    #[inline]
    fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    fn max_arity(&self) -> usize {
        self.max_arity
    }

    fn term_separator(&self) -> Option<char> {
        Some(self.separator)
    }
}

impl<S: Into<String>> FromIterator<S> for TermSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TermSet::default();
        for term in iter {
            set.insert(term);
        }
        set
    }
}
