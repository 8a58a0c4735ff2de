// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Line assembly and section segmentation.
//!
//! Raw word tokens carry nothing but text and geometry. This module rebuilds
//! the document structure the PDF threw away, in two passes per page:
//!
//! ```text
//! WordToken[]  ──assemble_lines──▶  Line[]  ──segment_pages──▶  Section[]
//!   (bucket by y, sort by x)          (heading detection,
//!                                      open-section folding)
//! ```
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **EMISSION**: every emitted section has a title and a non-blank body.
//! 2. **ONE_PAGE**: a section never spans pages; its `page_number` is the
//!    page its heading appeared on. The open section is flushed at every
//!    page boundary.
//! 3. **READING_ORDER**: lines are emitted in ascending vertical bucket
//!    order (top to bottom), ties within a bucket resolved left to right.
//!
//! Heading detection is a heuristic over font size and casing, nothing more.
//! A missed heading degrades ranking quality, not correctness — there is no
//! error path out of this module.

use std::collections::BTreeMap;

use crate::types::{Line, OpenSection, Section, WordToken};
use crate::utils::is_all_uppercase;

/// Vertical quantization step: tokens whose `y` falls within the same 2-unit
/// bucket are considered one visual line. Coarse on purpose — it absorbs
/// kerning jitter and sub-pixel baseline wobble between glyph runs.
pub const LINE_BUCKET_HEIGHT: f64 = 2.0;

/// Assumed document average font size when a document has no words at all.
pub const DEFAULT_AVG_FONT_SIZE: f64 = 12.0;

/// A line this much larger than the document average is a heading regardless
/// of shape.
pub const HEADING_FONT_DELTA: f64 = 2.0;

/// Lines shorter than this many words qualify as headings at merely average
/// font size.
pub const SHORT_HEADING_MAX_WORDS: usize = 8;

/// Minimum trimmed length (in characters) for a line to be a heading at all.
pub const MIN_HEADING_CHARS: usize = 4;

/// Group one page's word tokens into visual lines.
///
/// Tokens are bucketed by `floor(y / 2)`, sorted left-to-right within each
/// bucket, and joined with single spaces. Buckets are emitted in ascending
/// numeric order — top-to-bottom reading order — rather than first-seen
/// order; the `BTreeMap` makes that choice explicit.
///
/// An empty token slice yields an empty line list.
pub fn assemble_lines(tokens: &[WordToken]) -> Vec<Line> {
    let mut buckets: BTreeMap<i64, Vec<&WordToken>> = BTreeMap::new();
    for token in tokens {
        let bucket = (token.y / LINE_BUCKET_HEIGHT).floor() as i64;
        buckets.entry(bucket).or_default().push(token);
    }

    buckets
        .into_iter()
        .map(|(y_bucket, mut members)| {
            members.sort_by(|a, b| a.x.total_cmp(&b.x));
            let text = members
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let font_size =
                members.iter().map(|t| t.font_size).sum::<f64>() / members.len() as f64;
            Line {
                text: text.trim().to_string(),
                font_size,
                y_bucket,
            }
        })
        .collect()
}

/// Mean font size across every word token on every page of a document.
///
/// Computed once, before segmentation; falls back to
/// [`DEFAULT_AVG_FONT_SIZE`] for a document with no extractable words.
pub fn document_font_average(pages: &[Vec<WordToken>]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for page in pages {
        for token in page {
            sum += token.font_size;
            count += 1;
        }
    }
    if count == 0 {
        DEFAULT_AVG_FONT_SIZE
    } else {
        sum / count as f64
    }
}

/// Is this line a heading?
///
/// A line qualifies iff its trimmed text is at least [`MIN_HEADING_CHARS`]
/// characters long and any of the following holds:
/// - the text is entirely upper-case (at least one cased character, none
///   lowercase),
/// - its font is at least [`HEADING_FONT_DELTA`] above the document average,
/// - it is short (fewer than [`SHORT_HEADING_MAX_WORDS`] words) at no less
///   than the document average font size.
pub fn is_heading(line: &Line, doc_avg_font: f64) -> bool {
    let text = line.text.trim();
    if text.chars().count() < MIN_HEADING_CHARS {
        return false;
    }
    if is_all_uppercase(text) {
        return true;
    }
    if line.font_size >= doc_avg_font + HEADING_FONT_DELTA {
        return true;
    }
    text.split_whitespace().count() < SHORT_HEADING_MAX_WORDS && line.font_size >= doc_avg_font
}

/// Fold a document's pages into sections.
///
/// A heading line (of more than [`MIN_HEADING_CHARS`] characters — a heading
/// of exactly four characters is treated as body text) flushes the open
/// section and starts a new one on the current page. Non-heading lines append
/// to the open section's body, or are discarded when no section is open —
/// body text preceding the first heading on a page goes nowhere. The open
/// section is flushed at the end of every page, so no section spans pages.
pub fn segment_pages(document: &str, pages: &[Vec<WordToken>]) -> Vec<Section> {
    let doc_avg_font = document_font_average(pages);
    let mut sections = Vec::new();

    for (page_idx, tokens) in pages.iter().enumerate() {
        let page_number = (page_idx + 1) as u32;
        let mut open = OpenSection {
            page_number,
            ..OpenSection::default()
        };

        for line in assemble_lines(tokens) {
            if is_heading(&line, doc_avg_font) && line.text.chars().count() > MIN_HEADING_CHARS {
                open.flush_into(&mut sections, document);
                open.title = Some(line.text);
                open.page_number = page_number;
            } else if open.title.is_some() {
                open.body.push_str(line.text.trim());
                open.body.push(' ');
            }
        }

        open.flush_into(&mut sections, document);
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page, token, token_sized};

    #[test]
    fn lines_group_by_two_unit_buckets() {
        let tokens = vec![
            token("world", 50.0, 100.9),
            token("hello", 10.0, 100.0),
            token("below", 10.0, 104.0),
        ];
        let lines = assemble_lines(&tokens);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "hello world");
        assert_eq!(lines[0].y_bucket, 50);
        assert_eq!(lines[1].text, "below");
    }

    #[test]
    fn lines_emit_top_to_bottom_regardless_of_token_order() {
        // First token encountered is NOT the topmost.
        let tokens = vec![
            token("bottom", 10.0, 300.0),
            token("top", 10.0, 20.0),
            token("middle", 10.0, 150.0),
        ];
        let lines = assemble_lines(&tokens);

        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["top", "middle", "bottom"]);
    }

    #[test]
    fn line_font_size_is_token_mean() {
        let tokens = vec![
            token_sized("a", 0.0, 10.0, 10.0),
            token_sized("b", 5.0, 10.0, 14.0),
        ];
        let lines = assemble_lines(&tokens);
        assert!((lines[0].font_size - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_page_yields_no_lines() {
        assert!(assemble_lines(&[]).is_empty());
    }

    #[test]
    fn font_average_defaults_without_words() {
        assert!((document_font_average(&[]) - DEFAULT_AVG_FONT_SIZE).abs() < f64::EPSILON);
        assert!(
            (document_font_average(&[Vec::new()]) - DEFAULT_AVG_FONT_SIZE).abs() < f64::EPSILON
        );
    }

    fn line(text: &str, font_size: f64) -> Line {
        Line {
            text: text.to_string(),
            font_size,
            y_bucket: 0,
        }
    }

    #[test]
    fn short_lines_are_never_headings() {
        // Fewer than four characters loses on every branch, even shouted in
        // a huge font.
        assert!(!is_heading(&line("TOC", 40.0), 12.0));
        assert!(!is_heading(&line("", 40.0), 12.0));
    }

    #[test]
    fn uppercase_lines_are_headings() {
        assert!(is_heading(&line("INTRODUCTION", 10.0), 12.0));
        assert!(!is_heading(&line("introduction", 10.0), 12.0));
    }

    #[test]
    fn oversized_lines_are_headings() {
        assert!(is_heading(
            &line("a perfectly ordinary sentence that runs long enough", 14.0),
            12.0
        ));
        assert!(!is_heading(
            &line("a perfectly ordinary sentence that runs long enough", 13.9),
            12.0
        ));
    }

    #[test]
    fn short_average_sized_lines_are_headings() {
        assert!(is_heading(&line("Budget Planning", 12.0), 12.0));
        // Same words below average font: not a heading.
        assert!(!is_heading(&line("Budget Planning", 11.0), 12.0));
    }

    #[test]
    fn segmentation_folds_lines_under_headings() {
        let pages = vec![page(&[
            ("Budget Planning", 0.0, 16.0),
            ("allocate the quarterly budget.", 20.0, 10.0),
            ("review spending each month.", 40.0, 10.0),
            ("Travel Policy", 60.0, 16.0),
            ("book flights early.", 80.0, 10.0),
        ])];
        let sections = segment_pages("guide.pdf", &pages);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Budget Planning");
        assert_eq!(
            sections[0].body,
            "allocate the quarterly budget. review spending each month. "
        );
        assert_eq!(sections[1].title, "Travel Policy");
        assert_eq!(sections[1].page_number, 1);
    }

    #[test]
    fn body_before_first_heading_is_discarded() {
        let pages = vec![page(&[
            ("stray text before any heading", 0.0, 10.0),
            ("Overview Notes", 20.0, 16.0),
            ("actual body.", 40.0, 10.0),
        ])];
        let sections = segment_pages("doc.pdf", &pages);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body, "actual body. ");
    }

    #[test]
    fn heading_without_body_is_dropped() {
        let pages = vec![page(&[("Lonely Heading", 0.0, 16.0)])];
        assert!(segment_pages("doc.pdf", &pages).is_empty());
    }

    #[test]
    fn sections_never_span_pages() {
        let pages = vec![
            page(&[
                ("First Heading", 0.0, 16.0),
                ("body on page one.", 20.0, 10.0),
            ]),
            page(&[("continuation text on page two.", 0.0, 10.0)]),
        ];
        let sections = segment_pages("doc.pdf", &pages);

        // Page one's section is emitted at the page boundary; page two's
        // orphan body has no open section to attach to.
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].page_number, 1);
        assert_eq!(sections[0].body, "body on page one. ");
    }

    #[test]
    fn page_number_tracks_the_heading_page() {
        let pages = vec![
            page(&[("Alpha Section", 0.0, 16.0), ("alpha body.", 20.0, 10.0)]),
            page(&[("Beta Section", 0.0, 16.0), ("beta body.", 20.0, 10.0)]),
        ];
        let sections = segment_pages("doc.pdf", &pages);

        assert_eq!(sections[0].page_number, 1);
        assert_eq!(sections[1].page_number, 2);
    }

    #[test]
    fn four_character_heading_falls_through_to_body() {
        // "NOTE" classifies as a heading (uppercase, 4 chars) but the
        // transition rule requires strictly more than 4 characters.
        let pages = vec![page(&[
            ("Opening Remarks", 0.0, 16.0),
            ("NOTE", 20.0, 10.0),
            ("the rest of the body.", 40.0, 10.0),
        ])];
        let sections = segment_pages("doc.pdf", &pages);

        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].body, "NOTE the rest of the body. ");
    }
}
