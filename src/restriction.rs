//! Extraction of embedded restriction markers from free text.
//!
//! Markers look like `PUBLICATIONxINxGERxONLY`: one or more uppercase ASCII
//! letters, followed by one or more repetitions of a literal `x` and another
//! run of uppercase ASCII letters. They are atomic and must be pulled out
//! before normalization lowercases them away.

use regex::Regex;
use std::sync::OnceLock;

fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[A-Z]+(?:x[A-Z]+)+").expect("valid regex"))
}

/// Result of extracting restriction markers from text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extracted {
    /// Matches in left-to-right order, duplicates preserved.
    pub markers: Vec<String>,
    /// The input with every match replaced by a single space, runs of
    /// whitespace collapsed, and the result trimmed.
    pub clean_text: String,
}

/// Scans `text` for restriction markers and splits them out from the rest.
///
/// Must run before [`crate::normalize::normalize`] — markers are defined on
/// uppercase ASCII and normalization lowercases everything.
pub fn extract(text: &str) -> Extracted {
    if text.is_empty() {
        return Extracted::default();
    }

    let pattern = marker_pattern();
    let markers: Vec<String> = pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    let replaced = pattern.replace_all(text, " ");
    let clean_text = replaced.split_whitespace().collect::<Vec<_>>().join(" ");

    Extracted {
        markers,
        clean_text,
    }
}
