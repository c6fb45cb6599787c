//! Full-text search core: tokenization, the inverted index, BM25 scoring,
//! the query engine, and the filter/sort layer applied to ranked results.

mod filter;
mod index;
mod query;
mod scoring;
mod tokenize;

pub use filter::{apply as apply_filter, ResultFilter, SortOrder};
pub use index::{MediaIndex, Postings};
pub use query::{QueryConfig, SearchResult};
pub use scoring::{idf, term_score, BM25Params};
pub use tokenize::{tokenize, tokenize_credit};
