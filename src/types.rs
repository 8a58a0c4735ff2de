// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the pipeline.
//!
//! These types flow strictly forward: word tokens become lines, lines become
//! sections, sections get scored against a context and refined into excerpts.
//! Nothing downstream ever mutates what an earlier stage produced.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Section**: `title` is non-empty and `body.trim()` is non-empty.
//!   Sections are only constructed through [`OpenSection::flush_into`], which
//!   refuses to emit anything weaker. A heading that never accumulated body
//!   text simply disappears.
//!
//! - **ScoredSection**: `section < pool.len()` for the pool it was ranked
//!   against. Indices instead of references keep the ranker's output owned
//!   and serializable.
//!
//! - **WordToken**: `y` grows downward (distance from the top of the page),
//!   so ascending y-bucket order is reading order. The ingestor converts from
//!   PDF bottom-origin coordinates before tokens ever reach the segmenter.

use serde::{Deserialize, Serialize};

/// A single word as placed on a page by the layout ingestor.
///
/// Immutable, scoped to one page. The geometry is deliberately coarse: the
/// segmenter only needs 2-unit vertical bucketing and left-to-right ordering,
/// so sub-glyph precision would be wasted effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordToken {
    pub text: String,
    /// Horizontal position of the first glyph.
    pub x: f64,
    /// Vertical position measured from the top of the page.
    pub y: f64,
    /// Effective (matrix-scaled) font size in points.
    pub font_size: f64,
}

/// A visual line assembled from word tokens sharing a vertical bucket.
///
/// Ephemeral: lines exist only while one page is being segmented. `text` is
/// stored trimmed; the assembler joins token texts with single spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    /// Mean font size of the tokens on this line.
    pub font_size: f64,
    /// `floor(y / 2)` — tokens within 2 vertical units share a line.
    pub y_bucket: i64,
}

/// A contiguous span of document text attributed to one heading, confined to
/// a single page.
///
/// Read-only after emission; owned by the per-collection section pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Filename of the source document.
    pub document: String,
    pub title: String,
    pub body: String,
    /// 1-based page where the heading line appeared.
    pub page_number: u32,
}

/// Accumulator for the section currently being built during segmentation.
///
/// `title` stays `None` until a heading opens the section; body lines arriving
/// before that are discarded by the segmenter.
#[derive(Debug, Default)]
pub struct OpenSection {
    pub title: Option<String>,
    pub body: String,
    pub page_number: u32,
}

impl OpenSection {
    /// Emit the accumulated section into `sections` if it satisfies the
    /// emission invariant (titled, non-blank body), then reset for reuse.
    pub fn flush_into(&mut self, sections: &mut Vec<Section>, document: &str) {
        if let Some(title) = self.title.take() {
            if !self.body.trim().is_empty() {
                sections.push(Section {
                    document: document.to_string(),
                    title,
                    body: std::mem::take(&mut self.body),
                    page_number: self.page_number,
                });
            }
        }
        self.body.clear();
    }
}

/// The reader persona and task that relevance is scored against.
///
/// Supplied once per collection, immutable for the duration of the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub persona: String,
    pub task: String,
}

impl Context {
    pub fn new(persona: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            task: task.into(),
        }
    }

    /// The query string the TF-IDF model is fit against: `"persona. task"`.
    pub fn query_text(&self) -> String {
        format!("{}. {}", self.persona, self.task)
    }

    /// The string keyword overlap draws its word set from: `"persona task"`.
    pub fn keyword_text(&self) -> String {
        format!("{} {}", self.persona, self.task)
    }
}

/// One ranked section: an index into the pool it was scored from, plus the
/// blended relevance score. Scores are unbounded reals, not probabilities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSection {
    /// Index into the section pool passed to the ranker.
    pub section: usize,
    pub score: f64,
}
