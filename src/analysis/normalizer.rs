use once_cell::sync::Lazy;
use regex::Regex;

// Anything that is not a Unicode letter or number.
static NON_WORD_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]").expect("static pattern is valid"));

/// Canonical form of a raw token: letters and numbers only, lowercased.
///
/// Lowercasing is applied per character (no locale, no final-sigma context) and
/// before the character filter, so an expansion like `İ` -> `i\u{307}` loses its
/// combining mark in the same pass. Returns `None` when nothing is left.
pub fn normalize(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }

    let lowered: String = raw.chars().flat_map(char::to_lowercase).collect();
    let cleaned = NON_WORD_CHARS.replace_all(&lowered, "");

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.into_owned())
    }
}

/// Splits free-form selection input on commas and semicolons, trimming entries
/// and dropping empty ones. Entries are returned raw; normalization happens later.
pub fn parse_selection(input: &str) -> Vec<String> {
    input
        .split([',', ';'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
