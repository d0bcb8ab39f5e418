//! Utility functions shared by the index builder and the CLI.
//!
//! ## Modules
//!
//! - [`app_data`] - User configuration (config directory, JSON)
//! - [`logging`] - `tracing` subscriber setup
//! - [`progress`] - Progress bars, no-op without the `progress` feature
//! - [`tokenizer`] - Line tokenization and line-id extraction
//!
//! ```no_run
//! use kwic::utils::{split_line_id, SimpleTokenizer, Tokenizer};
//!
//! let (id, text) = split_line_id("__ABC123 This is a test.", "__");
//! let tokens = SimpleTokenizer::new().tokenize(text);
//! // id = "__ABC123", tokens = ["this", "is", "a", "test", "."]
//! ```

pub mod app_data;
pub mod logging;
pub mod progress;
pub mod tokenizer;

pub use app_data::*;
pub use tokenizer::*;
