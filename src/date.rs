//! Date canonicalization: folds the three accepted raw formats into ISO
//! `YYYY-MM-DD`, with no calendar validation (see DESIGN.md's Open Question
//! resolution — this matches observed production behavior; `31.02.2024`
//! parses to `"2024-02-31"` rather than being rejected).

use regex::Regex;
use std::sync::OnceLock;

fn dot_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{1,2})\.(\d{1,2})\.(\d{4})$").expect("valid regex"))
}

fn slash_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid regex"))
}

fn iso_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"))
}

/// Parses `s` as `DD.MM.YYYY`, `DD/MM/YYYY`, or passthrough `YYYY-MM-DD`, in
/// that order, and returns the canonical `YYYY-MM-DD` form. Returns `None`
/// for anything that doesn't match one of those three shapes; the caller is
/// expected to fall back to the raw string.
pub fn parse_date(s: &str) -> Option<String> {
    if let Some(caps) = dot_pattern().captures(s) {
        return Some(format_iso(&caps[3], &caps[2], &caps[1]));
    }
    if let Some(caps) = slash_pattern().captures(s) {
        return Some(format_iso(&caps[3], &caps[2], &caps[1]));
    }
    if iso_pattern().is_match(s) {
        return Some(s.to_string());
    }
    None
}

fn format_iso(year: &str, month: &str, day: &str) -> String {
    format!(
        "{year}-{month:0>2}-{day:0>2}",
        year = year,
        month = month,
        day = day
    )
}
