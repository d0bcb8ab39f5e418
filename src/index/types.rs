use crate::error::{KwicError, KwicResult};
use serde::{Deserialize, Serialize};

/// Default separator joining the tokens of a multi-token term
pub const DEFAULT_SEPARATOR: char = '_';

/// Default prefix marking a line identifier at the start of a raw line
pub const DEFAULT_LINE_ID_PREFIX: &str = "__";

/// Default number of tokens in a context window
pub const DEFAULT_WINDOW_WIDTH: usize = 11;

/// Longest n-gram the extractor will look up
pub const MAX_ARITY: usize = 3;

/// Index format version written into the file header
pub const INDEX_VERSION: u32 = 1;

/// A vocabulary key: one token, or up to three joined by the separator
pub type Term = String;

/// Identifier of the source line an occurrence came from ("" if none)
pub type LineId = String;

/// Fixed-length token window with the matched term at its center
pub type ContextWindow = Vec<String>;

/// One occurrence of a term: where it came from and what surrounded it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub line_id: LineId,
    pub window: ContextWindow,
}

impl Occurrence {
    pub fn new(line_id: impl Into<LineId>, window: ContextWindow) -> Self {
        Self {
            line_id: line_id.into(),
            window,
        }
    }
}

/// Validated window geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowWidth(usize);

impl WindowWidth {
    /// Width must be odd so left and right context are the same size
    pub fn new(width: usize) -> KwicResult<Self> {
        if width == 0 || width % 2 == 0 {
            return Err(KwicError::InvalidWidth(width));
        }
        Ok(Self(width))
    }

    #[inline]
    pub fn get(&self) -> usize {
        self.0
    }

    /// Index of the matched term inside a window
    #[inline]
    pub fn center(&self) -> usize {
        self.0 / 2
    }

    /// Tokens of context on each side of the center
    #[inline]
    pub fn context_size(&self) -> usize {
        self.0 - self.center() - 1
    }
}

impl Default for WindowWidth {
    fn default() -> Self {
        Self(DEFAULT_WINDOW_WIDTH)
    }
}

/// Number of tokens a term spans, from its separator count
pub fn term_arity(term: &str, separator: char) -> usize {
    term.matches(separator).count() + 1
}

/// Join tokens into a term key
pub fn join_term(tokens: &[String], separator: char) -> Term {
    let mut buf = [0u8; 4];
    tokens.join(separator.encode_utf8(&mut buf))
}

/// Index metadata stored alongside the postings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMeta {
    pub version: u32,
    pub width: WindowWidth,
    pub separator: char,
    pub line_count: u64,
    pub created_at: u64,
}

impl Default for IndexMeta {
    fn default() -> Self {
        Self {
            version: INDEX_VERSION,
            width: WindowWidth::default(),
            separator: DEFAULT_SEPARATOR,
            line_count: 0,
            created_at: 0,
        }
    }
}

/// Configuration for a corpus build
#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub width: WindowWidth,
    pub separator: char,
    pub line_id_prefix: String,
    /// Lines per shard when building in parallel
    pub chunk_size: usize,
    pub parallel: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            width: WindowWidth::default(),
            separator: DEFAULT_SEPARATOR,
            line_id_prefix: DEFAULT_LINE_ID_PREFIX.to_string(),
            chunk_size: 10_000,
            parallel: true,
        }
    }
}
