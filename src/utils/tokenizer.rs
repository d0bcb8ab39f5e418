use regex::Regex;
use std::sync::OnceLock;

/// Words (with internal apostrophes), @handles, or single punctuation marks
const TOKEN_PATTERN: &str = r"@\w+|\w+(?:['’]\w+)*|[^\w\s]";

/// Turns one line of text into an ordered token sequence
pub trait Tokenizer {
    fn tokenize(&self, line: &str) -> Vec<String>;
}

/// Regex tokenizer producing lowercased word and punctuation tokens
///
/// Tokens made only of whitespace or underscores are dropped, so the bare
/// separator can never appear as a real token. Twitter-style `@handles` are
/// dropped as well.
#[derive(Debug, Clone)]
pub struct SimpleTokenizer {
    pattern: &'static Regex,
    meaningful: &'static Regex,
}

impl SimpleTokenizer {
    pub fn new() -> Self {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        static MEANINGFUL: OnceLock<Regex> = OnceLock::new();

        Self {
            pattern: PATTERN.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("valid token pattern")),
            meaningful: MEANINGFUL.get_or_init(|| Regex::new(r"[^\s_]").expect("valid filter pattern")),
        }
    }
}

impl Default for SimpleTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for SimpleTokenizer {
    fn tokenize(&self, line: &str) -> Vec<String> {
        self.pattern
            .find_iter(line)
            .map(|m| m.as_str())
            .filter(|tok| self.meaningful.is_match(tok) && !tok.starts_with('@'))
            .map(str::to_lowercase)
            .collect()
    }
}

/// Split a raw line into its optional identifier and the remaining text.
///
/// When the first space-delimited word starts with `prefix`, that whole word
/// is the line id and is removed from the text handed to the tokenizer.
pub fn split_line_id<'a>(line: &'a str, prefix: &str) -> (&'a str, &'a str) {
    if prefix.is_empty() {
        return ("", line);
    }

    let first = line.split(' ').next().unwrap_or("");
    if first.starts_with(prefix) {
        (first, &line[first.len()..])
    } else {
        ("", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_words_and_punctuation() {
        let tokens = SimpleTokenizer::new().tokenize("This is a Test, of the system.");
        assert_eq!(tokens, vec!["this", "is", "a", "test", ",", "of", "the", "system", "."]);
    }

    #[test]
    fn test_tokenize_drops_handles_and_underscores() {
        let tokens = SimpleTokenizer::new().tokenize("@someone said _ __ hello");
        assert_eq!(tokens, vec!["said", "hello"]);
    }

    #[test]
    fn test_tokenize_keeps_contractions() {
        let tokens = SimpleTokenizer::new().tokenize("it isn't here");
        assert_eq!(tokens, vec!["it", "isn't", "here"]);
    }

    #[test]
    fn test_split_line_id() {
        assert_eq!(split_line_id("__ID1234 some text", "__"), ("__ID1234", " some text"));
        assert_eq!(split_line_id("some text", "__"), ("", "some text"));
        assert_eq!(split_line_id("__ alone", "__"), ("__", " alone"));
        assert_eq!(split_line_id("", "__"), ("", ""));
    }

    #[test]
    fn test_split_line_id_without_prefix() {
        assert_eq!(split_line_id("__ID1 text", ""), ("", "__ID1 text"));
    }
}
