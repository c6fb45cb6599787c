//! German orthography folding.

/// Lowercases and folds German umlauts/eszett to an ASCII-compatible form.
///
/// Replacements are applied in order after lowercasing: `ä→ae`, `ö→oe`,
/// `ü→ue`, `ß→ss`. No other diacritics are touched. Deterministic, total,
/// and idempotent: `normalize(normalize(x)) == normalize(x)`, since the
/// output alphabet after folding contains none of `ä ö ü ß` (or their
/// uppercase forms, already removed by the lowercasing pass) for `normalize`
/// to fold again.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .replace('ä', "ae")
        .replace('ö', "oe")
        .replace('ü', "ue")
        .replace('ß', "ss")
}
