#![warn(unreachable_pub)]
#![warn(dead_code)]

pub mod date;
pub mod error;
pub mod normalize;
pub mod preprocess;
pub mod restriction;
pub mod search;
pub mod tracing_init;
pub mod types;

pub use date::parse_date;
pub use error::IndexError;
pub use normalize::normalize;
pub use preprocess::preprocess;
pub use restriction::{extract, Extracted};
pub use search::{
    apply_filter, idf, term_score, tokenize, tokenize_credit, BM25Params, MediaIndex, Postings,
    QueryConfig, ResultFilter, SearchResult, SortOrder,
};
pub use types::{Field, ProcessedRecord, RawRecord};
