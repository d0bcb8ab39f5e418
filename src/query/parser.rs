//! Query term normalization
//!
//! Indexed terms are lowercased tokens joined by the separator. Users type
//! phrases with spaces ("Emergency Broadcast"), so queries are lowercased and
//! their whitespace runs collapsed into single separators before lookup.

/// A normalized lookup key plus the text the user typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermQuery {
    pub raw: String,
    pub term: String,
}

/// Normalize a user-typed term into index key form
pub fn parse_term(input: &str, separator: char) -> TermQuery {
    let mut buf = [0u8; 4];
    let sep = separator.encode_utf8(&mut buf);

    let term = input
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(sep);

    TermQuery {
        raw: input.to_string(),
        term,
    }
}

/// Normalize several terms, dropping the ones that end up empty
pub fn parse_terms<S: AsRef<str>>(inputs: &[S], separator: char) -> Vec<TermQuery> {
    inputs
        .iter()
        .map(|s| parse_term(s.as_ref(), separator))
        .filter(|q| !q.term.is_empty())
        .collect()
}
