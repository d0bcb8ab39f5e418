use crate::error::{KwicError, KwicResult};
use crate::index::types::*;
use crate::index::vocabulary::Vocabulary;
use crate::index::window::WindowExtractor;
use ahash::RandomState;
use std::collections::HashMap;

/// Term -> occurrences, in the order they were scanned
pub type Postings = HashMap<Term, Vec<Occurrence>, RandomState>;

/// In-memory KWIC index
///
/// Built by appending occurrences; once construction is finished it is only
/// read, and `&KwicIndex` can be shared between threads for querying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KwicIndex {
    meta: IndexMeta,
    postings: Postings,
}

impl KwicIndex {
    /// Create an empty index for windows of `width` tokens
    pub fn new(width: WindowWidth, separator: char) -> Self {
        Self {
            meta: IndexMeta {
                width,
                separator,
                ..IndexMeta::default()
            },
            postings: Postings::default(),
        }
    }

    /// Reassemble an index from persisted parts
    pub(crate) fn from_parts(meta: IndexMeta, postings: Postings) -> Self {
        Self { meta, postings }
    }

    /// Append one occurrence for `term`, creating its list on first use
    pub fn insert(&mut self, term: impl Into<Term>, occurrence: Occurrence) {
        self.postings.entry(term.into()).or_default().push(occurrence);
    }

    /// Scan one tokenized line and record every vocabulary match.
    /// Returns the number of occurrences added.
    pub fn add_line<V: Vocabulary + ?Sized>(
        &mut self,
        vocabulary: &V,
        tokens: &[String],
        line_id: &str,
    ) -> usize {
        let extractor = WindowExtractor::new(vocabulary, self.meta.width, self.meta.separator);
        self.add_line_with(&extractor, tokens, line_id)
    }

    /// Like [`add_line`](Self::add_line) with a prebuilt extractor
    pub fn add_line_with<V: Vocabulary + ?Sized>(
        &mut self,
        extractor: &WindowExtractor<'_, V>,
        tokens: &[String],
        line_id: &str,
    ) -> usize {
        let mut added = 0;
        extractor.for_each_match(tokens, |term, window| {
            match self.postings.get_mut(term) {
                Some(list) => list.push(Occurrence::new(line_id, window)),
                None => {
                    self.postings
                        .insert(term.to_string(), vec![Occurrence::new(line_id, window)]);
                }
            }
            added += 1;
        });
        self.meta.line_count += 1;
        added
    }

    /// Append another index's occurrences after this one's, term by term.
    /// Merging partial indexes in line order keeps scan order intact.
    pub fn merge(&mut self, other: KwicIndex) -> KwicResult<()> {
        if other.meta.width != self.meta.width {
            return Err(KwicError::WidthMismatch {
                requested: other.meta.width.get(),
                indexed: self.meta.width.get(),
            });
        }

        self.meta.line_count += other.meta.line_count;
        for (term, mut occurrences) in other.postings {
            self.postings.entry(term).or_default().append(&mut occurrences);
        }
        Ok(())
    }

    /// Occurrences of `term`; empty when the term was never seen
    pub fn occurrences(&self, term: &str) -> &[Occurrence] {
        self.postings.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    /// All indexed terms, sorted
    pub fn terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = self.postings.keys().map(String::as_str).collect();
        terms.sort_unstable();
        terms
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn occurrence_count(&self) -> usize {
        self.postings.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn width(&self) -> WindowWidth {
        self.meta.width
    }

    pub fn separator(&self) -> char {
        self.meta.separator
    }

    pub fn meta(&self) -> &IndexMeta {
        &self.meta
    }

    pub(crate) fn meta_mut(&mut self) -> &mut IndexMeta {
        &mut self.meta
    }

    pub(crate) fn postings(&self) -> &Postings {
        &self.postings
    }
}

impl Default for KwicIndex {
    fn default() -> Self {
        Self::new(WindowWidth::default(), DEFAULT_SEPARATOR)
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
    fn test_insert_creates_then_appends() {
        let mut index = KwicIndex::new(width(3), '_');
        index.insert("a", Occurrence::new("", tokens("x a y")));
        index.insert("a", Occurrence::new("L2", tokens("y a z")));

        let occ = index.occurrences("a");
        assert_eq!(occ.len(), 2);
        assert_eq!(occ[0].line_id, "");
        assert_eq!(occ[1].line_id, "L2");
        assert_eq!(index.term_count(), 1);
    }

    #[test]
    fn test_absent_term_is_empty() {
        let index = KwicIndex::default();
        assert!(index.occurrences("missing").is_empty());
        assert!(!index.contains_term("missing"));
    }

    #[test]
    fn test_add_line_counts() {
        let vocab: TermSet = ["a", "a_b"].into_iter().collect();
        let mut index = KwicIndex::new(width(3), '_');
        let added = index.add_line(&vocab, &tokens("a b a"), "");
        assert_eq!(added, 3);
        assert_eq!(index.occurrence_count(), 3);
        assert_eq!(index.meta().line_count, 1);
        assert_eq!(index.terms(), vec!["a", "a_b"]);
    }

    #[test]
    fn test_merge_preserves_line_order() {
        let vocab: TermSet = ["a"].into_iter().collect();

        let mut first = KwicIndex::new(width(3), '_');
        first.add_line(&vocab, &tokens("a"), "1");
        let mut second = KwicIndex::new(width(3), '_');
        second.add_line(&vocab, &tokens("a"), "2");
        second.add_line(&vocab, &tokens("a"), "3");

        first.merge(second).unwrap();
        let ids: Vec<_> = first.occurrences("a").iter().map(|o| o.line_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(first.meta().line_count, 3);
    }

    #[test]
    fn test_merge_rejects_other_width() {
        let mut first = KwicIndex::new(width(3), '_');
        let second = KwicIndex::new(width(5), '_');
        assert!(matches!(
            first.merge(second),
            Err(KwicError::WidthMismatch { requested: 5, indexed: 3 })
        ));
    }
}
