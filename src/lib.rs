//! # KWIC - Key-Word-In-Context concordance indexer
//!
//! Given tokenized lines of text and a vocabulary of words and short phrases
//! (up to three tokens), KWIC records, for every occurrence of a vocabulary
//! term, the fixed-width window of tokens around it. Occurrences are grouped
//! by term and can be rendered as aligned context lines.
//!
//! ## Architecture
//!
//! - [`index`] - Vocabulary, window extraction, the index itself, persistence
//! - [`query`] - Term normalization, lookups, and line layout
//! - [`output`] - Colored terminal output
//! - [`utils`] - Tokenizer, configuration, logging, progress bars
//!
//! ## Quick Start
//!
//! ```
//! use kwic::index::{KwicIndex, TermSet, WindowWidth};
//! use kwic::query::index_for;
//!
//! let vocabulary: TermSet = ["test", "emergency_broadcast"].into_iter().collect();
//! let mut index = KwicIndex::new(WindowWidth::new(5).unwrap(), '_');
//!
//! let tokens: Vec<String> = "this is a test of the emergency broadcast system"
//!     .split(' ')
//!     .map(String::from)
//!     .collect();
//! index.add_line(&vocabulary, &tokens, "");
//!
//! let lines = index_for(&index, "emergency_broadcast", 5, true).unwrap();
//! assert_eq!(lines.len(), 1);
//! assert!(index_for(&index, "missing", 5, true).unwrap().is_empty());
//! ```
//!
//! ## Ordering
//!
//! A term's occurrences are kept in scan order: line by line, left to right,
//! and at each position unigram before bigram before trigram. Parallel builds
//! shard by line and merge in line order, so they produce the same index as a
//! sequential scan.

pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod utils;

pub use error::{KwicError, KwicResult};
pub use index::{KwicIndex, Occurrence, TermSet, Vocabulary, WindowWidth};
pub use query::index_for;
