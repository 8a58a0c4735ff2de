//! Tokenization helpers shared by the ranker and the refiner.

use std::collections::HashSet;

/// Minimum length (exclusive) for a token to count as a keyword.
pub const KEYWORD_MIN_LEN: usize = 3;

/// Split `text` into lowercased word tokens.
///
/// A token is a maximal run of alphanumeric characters or underscores — the
/// same shape a `\b\w+\b` word-boundary pattern matches. Everything else is a
/// separator.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .map(|token| token.to_lowercase())
        .collect()
}

/// The distinct word tokens of `text`, no length filter.
pub fn word_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// The distinct word tokens of `text` longer than [`KEYWORD_MIN_LEN`]
/// characters. Short function words ("a", "the", "for") never make it in.
pub fn keyword_set(text: &str) -> HashSet<String> {
    tokenize(text)
        .into_iter()
        .filter(|token| token.chars().count() > KEYWORD_MIN_LEN)
        .collect()
}

/// Python-style `isupper`: at least one cased character and none lowercase.
///
/// "BUDGET 2024" is upper-case; "2024" is not (no cased characters at all).
pub fn is_all_uppercase(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}
