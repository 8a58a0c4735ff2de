//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::types::{Section, WordToken};

/// Default font size for test tokens.
pub const TEST_FONT_SIZE: f64 = 12.0;

/// Create a word token at the default font size.
pub fn token(text: &str, x: f64, y: f64) -> WordToken {
    token_sized(text, x, y, TEST_FONT_SIZE)
}

/// Create a word token with an explicit font size.
pub fn token_sized(text: &str, x: f64, y: f64, font_size: f64) -> WordToken {
    WordToken {
        text: text.to_string(),
        x,
        y,
        font_size,
    }
}

/// Create one page of tokens from `(text, y, font_size)` line specs.
///
/// Each spec becomes a single token at `x = 0`, which is enough to form one
/// visual line per distinct `y`.
pub fn page(lines: &[(&str, f64, f64)]) -> Vec<WordToken> {
    lines
        .iter()
        .map(|(text, y, font_size)| token_sized(text, 0.0, *y, *font_size))
        .collect()
}

/// Create an emitted section directly, bypassing segmentation.
pub fn section(document: &str, title: &str, body: &str, page_number: u32) -> Section {
    Section {
        document: document.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        page_number,
    }
}
