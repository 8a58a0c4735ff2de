// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Excerpt refinement: compress a section into a keyword-dense extract.
//!
//! The body is split into sentences, each sentence is scored by how many of
//! the context's words it mentions, and the best sentences are greedily
//! packed into a character budget. The budget check is deliberately loose:
//! it compares the buffer length against the raw sentence length before
//! appending, without counting the joining space, so an excerpt can land a
//! few characters over. That slack is inherited behavior, not a contract —
//! callers must not treat the bound as exact.
//!
//! When even the best sentence is too long for the budget, the refiner falls
//! back to the first two sentences of the body, unbounded. A section with at
//! least one sentence therefore always produces a non-empty excerpt.

use crate::types::{Context, Section};
use crate::utils::word_set;

/// Default excerpt character budget.
pub const DEFAULT_MAX_CHARS: usize = 400;

/// Split text into sentences at `.`, `!`, or `?` followed by spaces.
///
/// The terminator stays with its sentence; the separating spaces are
/// consumed. Text without any terminal punctuation is one sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if matches!(bytes[i], b'.' | b'!' | b'?') && bytes.get(i + 1) == Some(&b' ') {
            sentences.push(&text[start..=i]);
            i += 1;
            while bytes.get(i) == Some(&b' ') {
                i += 1;
            }
            start = i;
        } else {
            i += 1;
        }
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

/// Build a keyword-dense excerpt of `section` under `max_chars` characters.
///
/// Sentences are ranked by distinct word overlap with the context (no token
/// length filter here — even "plan" counts), stable on ties so equal
/// sentences keep body order, then appended greedily until the next sentence
/// would overflow the budget. Empty greedy result → first-two-sentences
/// fallback. The returned excerpt is trimmed and never empty for a section
/// with at least one sentence.
pub fn refine_excerpt(section: &Section, context: &Context, max_chars: usize) -> String {
    let sentences = split_sentences(&section.body);
    let context_words = word_set(&context.keyword_text());

    let mut ranked: Vec<(usize, &str)> = sentences
        .iter()
        .map(|sentence| {
            let overlap = word_set(sentence)
                .iter()
                .filter(|word| context_words.contains(*word))
                .count();
            (overlap, *sentence)
        })
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    let mut excerpt = String::new();
    let mut used = 0usize;
    for (_, sentence) in &ranked {
        let len = sentence.chars().count();
        if used + len > max_chars {
            break;
        }
        excerpt.push_str(sentence);
        excerpt.push(' ');
        used += len + 1;
    }

    let excerpt = excerpt.trim();
    if excerpt.is_empty() {
        sentences
            .iter()
            .take(2)
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    } else {
        excerpt.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::section;

    fn ctx() -> Context {
        Context::new("Financial Analyst", "prepare a team budget plan")
    }

    #[test]
    fn sentences_split_after_terminal_punctuation() {
        let parts = split_sentences("First one. Second one! Third? Tail without end");
        assert_eq!(
            parts,
            vec!["First one.", "Second one!", "Third?", "Tail without end"]
        );
    }

    #[test]
    fn split_consumes_runs_of_spaces() {
        let parts = split_sentences("One.   Two.");
        assert_eq!(parts, vec!["One.", "Two."]);
    }

    #[test]
    fn period_without_space_does_not_split() {
        let parts = split_sentences("Version 1.2 shipped. Done.");
        assert_eq!(parts, vec!["Version 1.2 shipped.", "Done."]);
    }

    #[test]
    fn no_terminator_is_one_sentence() {
        assert_eq!(split_sentences("just one run-on"), vec!["just one run-on"]);
    }

    #[test]
    fn trailing_space_produces_no_empty_sentence() {
        assert_eq!(split_sentences("Done. "), vec!["Done."]);
    }

    #[test]
    fn keyword_rich_sentences_come_first() {
        let s = section(
            "doc.pdf",
            "Planning",
            "The weather was mild. The team budget plan needs review. Lunch was served.",
            1,
        );
        let excerpt = refine_excerpt(&s, &ctx(), DEFAULT_MAX_CHARS);
        assert!(excerpt.starts_with("The team budget plan needs review."));
    }

    #[test]
    fn short_body_passes_through_untruncated() {
        let s = section("doc.pdf", "Planning", "The team budget plan is ready.", 1);
        let excerpt = refine_excerpt(&s, &ctx(), DEFAULT_MAX_CHARS);
        assert_eq!(excerpt, "The team budget plan is ready.");
    }

    #[test]
    fn budget_stops_before_overflowing_sentence() {
        let s = section(
            "doc.pdf",
            "Planning",
            "budget plan one. budget plan two. budget plan three.",
            1,
        );
        // Each sentence is 16 chars; with the joining space only two fit in 34.
        let excerpt = refine_excerpt(&s, &ctx(), 34);
        assert_eq!(excerpt, "budget plan one. budget plan two.");
    }

    #[test]
    fn oversized_single_sentence_falls_back_to_leading_sentences() {
        let long_run_on = "budget ".repeat(80);
        let s = section("doc.pdf", "Planning", long_run_on.trim(), 1);
        let excerpt = refine_excerpt(&s, &ctx(), DEFAULT_MAX_CHARS);
        // One long sentence, no terminators: the fallback returns it whole,
        // ignoring the budget.
        assert_eq!(excerpt, long_run_on.trim());
        assert!(excerpt.chars().count() > DEFAULT_MAX_CHARS);
    }

    #[test]
    fn fallback_joins_at_most_two_sentences() {
        let first = format!("alpha {}.", "x".repeat(500));
        let body = format!("{} second sentence here. third sentence here.", first);
        let s = section("doc.pdf", "Planning", &body, 1);
        // All overlaps are 0, so the oversized first sentence leads the
        // greedy pass and overflows immediately: fallback path.
        let excerpt = refine_excerpt(&s, &Context::new("zz", "qq"), 10);
        assert_eq!(excerpt, format!("{} second sentence here.", first));
    }

    #[test]
    fn ties_preserve_body_order() {
        let s = section(
            "doc.pdf",
            "Planning",
            "First equal sentence. Second equal sentence.",
            1,
        );
        let excerpt = refine_excerpt(&s, &Context::new("zz", "qq"), DEFAULT_MAX_CHARS);
        assert_eq!(excerpt, "First equal sentence. Second equal sentence.");
    }
}
