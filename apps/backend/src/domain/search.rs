//! Free-text search helpers.

use unicode_normalization::UnicodeNormalization;

/// NFC, trim, collapse inner whitespace, lowercase.
///
/// Stored `*_key` columns hold this form so lookups compare with a plain
/// `LIKE`; SQLite's `LOWER()` only folds ASCII.
pub fn text_key(raw: &str) -> String {
    let nfc: String = raw.nfc().collect();
    nfc.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// [`text_key`], or `None` when nothing is left.
pub fn normalize_query(raw: &str) -> Option<String> {
    Some(text_key(raw)).filter(|k| !k.is_empty())
}

/// Free-text key of a listing. Fields are newline-separated so a collapsed
/// query never matches across two of them.
pub fn listing_search_key(title: &str, address: &str, city: &str) -> String {
    [title, address, city]
        .iter()
        .map(|f| text_key(f))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape `%`, `_` and `\` for a LIKE pattern using `\` as escape char.
pub fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `%term%` with the term escaped.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}
