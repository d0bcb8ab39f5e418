use crate::error::{KwicError, KwicResult};
use crate::index::concordance::KwicIndex;
use crate::index::types::WindowWidth;
use crate::query::render::{render_occurrence, RenderedLine};

/// Query options
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    /// Width the caller expects the windows to have
    pub width: usize,
    /// Render separators as spaces
    pub replace_separators: bool,
}

/// Executes term lookups against a finished index.
///
/// Holds only a shared reference, so any number of executors can query the
/// same index at once.
pub struct QueryExecutor<'a> {
    index: &'a KwicIndex,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(index: &'a KwicIndex) -> Self {
        Self { index }
    }

    /// Render every occurrence of `term`, in insertion order.
    ///
    /// An unknown term yields an empty list. A width that differs from the
    /// one the index was built with is an error, since the windows could not
    /// be sliced correctly.
    pub fn execute(&self, term: &str, options: QueryOptions) -> KwicResult<Vec<RenderedLine>> {
        let width = self.check_width(options.width)?;
        let separator = self.index.separator();

        Ok(self
            .index
            .occurrences(term)
            .iter()
            .map(|occ| render_occurrence(occ, width, separator, options.replace_separators))
            .collect())
    }

    fn check_width(&self, requested: usize) -> KwicResult<WindowWidth> {
        let indexed = self.index.width();
        if requested != indexed.get() {
            return Err(KwicError::WidthMismatch {
                requested,
                indexed: indexed.get(),
            });
        }
        Ok(indexed)
    }
}

/// Rendered KWIC strings for `term`; empty when the term is not indexed
pub fn index_for(
    index: &KwicIndex,
    term: &str,
    width: usize,
    replace_separators: bool,
) -> KwicResult<Vec<String>> {
    let options = QueryOptions {
        width,
        replace_separators,
    };
    let lines = QueryExecutor::new(index).execute(term, options)?;
    Ok(lines.iter().map(ToString::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::types::Occurrence;

    fn sample() -> KwicIndex {
        let mut index = KwicIndex::new(WindowWidth::new(3).unwrap(), '_');
        index.insert("test", Occurrence::new("", vec!["a".into(), "test".into(), "of".into()]));
        index.insert(
            "baby_shark",
            Occurrence::new("ID9", vec!["_".into(), "baby_shark".into(), "doo".into()]),
        );
        index
    }

    #[test]
    fn test_index_for_known_term() {
        let lines = index_for(&sample(), "test", 3, false).unwrap();
        assert_eq!(lines, vec!["   a   test   of"]);
    }

    #[test]
    fn test_index_for_absent_term_is_empty() {
        assert!(index_for(&sample(), "missing", 3, false).unwrap().is_empty());
    }

    #[test]
    fn test_width_mismatch_is_error() {
        let err = index_for(&sample(), "test", 5, false).unwrap_err();
        assert!(matches!(err, KwicError::WidthMismatch { requested: 5, indexed: 3 }));
    }

    #[test]
    fn test_replace_separators() {
        let lines = index_for(&sample(), "baby_shark", 3, true).unwrap();
        // id, joining space, 3-char left budget holding the blanked sentinel, center padding
        assert_eq!(lines, vec![format!("ID9{}baby shark   doo", " ".repeat(7))]);
    }
}
