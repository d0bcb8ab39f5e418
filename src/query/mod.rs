pub mod executor;
pub mod parser;
pub mod render;

pub use executor::{index_for, QueryExecutor, QueryOptions};
pub use parser::{parse_term, parse_terms, TermQuery};
pub use render::{render_occurrence, RenderedLine};
