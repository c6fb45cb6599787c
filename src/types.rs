//! Domain types for the media-item search core: raw and processed records,
//! the closed set of searchable fields, and the restriction-marker type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw media-item record as received from an external loader.
///
/// `RawRecord` is never parsed by this crate; an external caller deserializes
/// a corpus (JSON, a database row set, whatever) into a sequence of these and
/// hands them to [`crate::search::MediaIndex::add_document`] one at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    pub desc: String,
    pub credit: String,
    pub date: String,
    pub width: i64,
    pub height: i64,
}

/// A [`RawRecord`] after preprocessing: restriction markers extracted, date
/// canonicalized to ISO form (or left as the raw string if unparseable), and
/// a normalized credit ready for tokenization.
///
/// `desc` is deliberately left un-normalized here — normalization happens
/// exactly once, inside `tokenize`, per the tokenizer's contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRecord {
    pub id: String,
    pub desc: String,
    pub credit: String,
    pub width: i64,
    pub height: i64,
    /// Canonicalized `YYYY-MM-DD`, or the original raw date string if it
    /// didn't match any recognized pattern.
    pub iso_date: String,
    /// Desc with every restriction marker replaced by whitespace and the
    /// whitespace collapsed — this is what actually gets tokenized for the
    /// `desc` field.
    pub clean_desc: String,
    /// Restriction markers extracted from `desc`, in left-to-right order,
    /// duplicates preserved.
    pub markers: Vec<String>,
    /// `credit`, umlaut-folded and lowercased.
    pub normalized_credit: String,
}

/// The closed set of fields this index searches over.
///
/// A real field-name string never reaches the index or the query engine —
/// every lookup dispatches on this enum instead, avoiding stringly-typed
/// field names at the storage and scoring layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Field {
    Desc,
    Credit,
    IdField,
}

impl Field {
    /// All fields, in a fixed order used wherever the query engine needs to
    /// iterate "every field" deterministically.
    pub const ALL: [Field; 3] = [Field::Desc, Field::Credit, Field::IdField];

    fn label(self) -> &'static str {
        match self {
            Field::Desc => "desc",
            Field::Credit => "credit",
            Field::IdField => "id-field",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
