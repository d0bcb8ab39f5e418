pub mod build;
pub mod concordance;
pub mod reader;
pub mod stats;
pub mod types;
pub mod vocabulary;
pub mod window;
pub mod writer;

pub use concordance::KwicIndex;
pub use reader::{load, IndexReader};
pub use types::*;
pub use vocabulary::{TermSet, Vocabulary};
pub use window::WindowExtractor;
pub use writer::{save, IndexWriter};
