//! The one typed error this crate needs.
//!
//! Nearly every public operation described in this crate's specification is
//! total: it accepts any syntactically well-formed input and returns a plain
//! value, never a `Result` (empty queries, unparseable dates, and unknown
//! terms are all represented as ordinary return values, not errors). The one
//! exception is building the index out of order, which is caller misuse
//! rather than malformed corpus data, and the one place that misuse would
//! otherwise silently desynchronize `docLengths`/`ids`/postings alignment.

use thiserror::Error;

/// Errors from [`crate::search::MediaIndex::add_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IndexError {
    /// `add_document` must be called with ids `0, 1, 2, ...` in order.
    #[error("add_document called out of order: expected id {expected}, got {got}")]
    OutOfOrder { expected: usize, got: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn out_of_order_message_names_both_ids() {
        let err = IndexError::OutOfOrder {
            expected: 2,
            got: 5,
        };
        let msg = err.to_string();
        check!(msg.contains('2'));
        check!(msg.contains('5'));
    }
}
