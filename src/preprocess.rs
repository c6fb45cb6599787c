//! Orchestrates the restriction extractor, date parser, and normalizer to
//! turn a [`RawRecord`] into a [`ProcessedRecord`] ready for indexing.

use crate::date::parse_date;
use crate::normalize::normalize;
use crate::restriction::extract;
use crate::types::{ProcessedRecord, RawRecord};

/// Preprocesses a single raw record. Total and infallible: an unparseable
/// date falls back to the raw string rather than failing.
pub fn preprocess(raw: &RawRecord) -> ProcessedRecord {
    let extracted = extract(&raw.desc);
    let iso_date = parse_date(&raw.date).unwrap_or_else(|| raw.date.clone());
    let normalized_credit = normalize(&raw.credit);

    ProcessedRecord {
        id: raw.id.clone(),
        desc: raw.desc.clone(),
        credit: raw.credit.clone(),
        width: raw.width,
        height: raw.height,
        iso_date,
        clean_desc: extracted.clean_text,
        markers: extracted.markers,
        normalized_credit,
    }
}
