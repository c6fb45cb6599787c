//! Tokenization shared by indexing and query processing.
//!
//! The tokenizer normalizes exactly once — callers must pass pre-normalized
//! text in, never already-normalized text, so normalization genuinely runs
//! once per call.

use crate::normalize::normalize;
use ahash::AHashSet;
use std::sync::OnceLock;

/// German function words, lowercase, umlaut-folded, filtered out of every
/// token stream. `imago` is excluded separately, only from the credit field
/// (see [`tokenize_credit`]), so it is not part of this general set.
const STOP_WORDS: &[&str] = &[
    // articles
    "der", "die", "das", "den", "dem", "des", "ein", "eine", "einer", "einem", "einen", "eines",
    // prepositions
    "in", "im", "an", "am", "auf", "aus", "bei", "mit", "nach", "von", "vor", "zu", "zum", "zur",
    "durch", "fuer", "gegen", "ohne", "um", "unter", "ueber",
    // conjunctions
    "und", "oder", "aber", "denn", "weil", "wenn", "als", "ob", "dass",
    // pronouns and auxiliaries
    "ist", "sind", "war", "waren", "wird", "werden", "hat", "haben", "hatte", "hatten", "kann",
    "koennen", "muss", "muessen", "soll", "sollen", "will", "wollen", "ich", "du", "er", "sie",
    "es", "wir", "ihr",
    // discourse particles
    "nicht", "auch", "nur", "noch", "schon", "sehr", "so", "wie", "was", "wer", "hier", "dort",
    "dann",
];

fn stop_word_set() -> &'static AHashSet<&'static str> {
    static SET: OnceLock<AHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// A domain term excluded only from credit-field tokens, to avoid every
/// document's credit posting list being saturated by the agency's own name.
const CREDIT_ONLY_STOP_WORD: &str = "imago";

fn is_separator(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t'
            | '\n'
            | '\r'
            | ','
            | '.'
            | ';'
            | ':'
            | '!'
            | '?'
            | '"'
            | '\''
            | '('
            | ')'
            | '['
            | ']'
            | '{'
            | '}'
    ) || c.is_whitespace()
}

/// Tokenizes `text` for indexing or querying: normalize, split on
/// punctuation/whitespace (hyphens are not splitters at this step), then for
/// each word either emit it whole, or — if hyphenated — emit the whole word
/// plus its dash-separated parts (dual emission), filtering the German
/// stopword set out of the result.
pub fn tokenize(text: &str) -> Vec<String> {
    tokenize_with_extra_stop_word(text, None)
}

/// As [`tokenize`], but also drops [`CREDIT_ONLY_STOP_WORD`]. Used for the
/// credit field only.
pub fn tokenize_credit(text: &str) -> Vec<String> {
    tokenize_with_extra_stop_word(text, Some(CREDIT_ONLY_STOP_WORD))
}

fn tokenize_with_extra_stop_word(text: &str, extra_stop_word: Option<&str>) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let normalized = normalize(text);
    let stop_words = stop_word_set();

    let mut tokens = Vec::new();
    for word in normalized.split(is_separator).filter(|w| !w.is_empty()) {
        emit_word(word, &mut tokens);
    }

    tokens.retain(|t| !stop_words.contains(t.as_str()) && Some(t.as_str()) != extra_stop_word);
    tokens
}

/// Emits a word as both its hyphen-stripped whole and its individual parts
/// when splitting on `-` leaves at least two parts of length >= 2; otherwise
/// emits only the hyphen-stripped whole.
fn emit_word(word: &str, tokens: &mut Vec<String>) {
    if word.contains('-') {
        let parts: Vec<&str> = word.split('-').filter(|p| p.len() >= 2).collect();
        if parts.len() >= 2 {
            if word.len() >= 2 {
                tokens.push(word.to_string());
            }
            for part in parts {
                tokens.push(part.to_string());
            }
        } else {
            let stripped: String = word.chars().filter(|&c| c != '-').collect();
            if stripped.len() >= 2 {
                tokens.push(stripped);
            }
        }
    } else if word.len() >= 2 {
        tokens.push(word.to_string());
    }
}
