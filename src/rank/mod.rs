// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Relevance ranking: which sections matter to this persona and task.
//!
//! Every section in the collection pool is scored against the context with a
//! blended measure, then the top K survive. The blend:
//!
//! ```text
//! score = 0.7 × cosine(tfidf(context), tfidf(section))
//!       + 0.3 × |keywords(section) ∩ keywords(context)|
//!       + boilerplate penalty
//! ```
//!
//! The lexical term captures distributional similarity; the raw overlap count
//! rewards sections that literally mention what the task mentions (and, being
//! an unbounded integer, dominates when a section is keyword-dense); the
//! penalty demotes stock headings like "Introduction" that say nothing about
//! content. Ties keep pool order — the sort is stable and the comparator
//! compares scores alone.
//!
//! # Constants
//!
//! | Constant | Value | Effect |
//! |----------|-------|--------|
//! | `LEXICAL_WEIGHT` | 0.7 | weight of the cosine term (≤ 1.0 by construction) |
//! | `KEYWORD_WEIGHT` | 0.3 | weight per distinct shared keyword |
//! | `BOILERPLATE_PENALTY` | −1.0 | flat demotion for stock headings |
//!
//! With a normalized cosine, a single shared keyword (0.3) outweighs any
//! possible lexical edge (0.7 max), and the −1.0 penalty outweighs the whole
//! lexical term plus three keywords. Changing these shifts that balance.

pub mod tfidf;

use crate::types::{Context, ScoredSection, Section};
use crate::utils::keyword_set;
use tfidf::TfidfModel;

/// Weight of the TF-IDF cosine similarity term.
pub const LEXICAL_WEIGHT: f64 = 0.7;

/// Weight per distinct keyword shared between section and context.
pub const KEYWORD_WEIGHT: f64 = 0.3;

/// Flat score adjustment for boilerplate headings.
pub const BOILERPLATE_PENALTY: f64 = -1.0;

/// Headings that announce structure rather than content.
pub const BOILERPLATE_HEADINGS: [&str; 5] =
    ["introduction", "about", "preface", "conclusion", "summary"];

/// Number of sections selected when the caller does not say otherwise.
pub const DEFAULT_TOP_K: usize = 5;

/// −1.0 when the trimmed, lowercased title is a stock boilerplate heading,
/// else 0.0. Exact match only — "Introduction to Rust" is not boilerplate.
pub fn heading_penalty(title: &str) -> f64 {
    let normalized = title.trim().to_lowercase();
    if BOILERPLATE_HEADINGS.contains(&normalized.as_str()) {
        BOILERPLATE_PENALTY
    } else {
        0.0
    }
}

/// Count of distinct keywords (word tokens longer than three characters)
/// shared between the section's title-or-body and the context.
pub fn keyword_overlap(section: &Section, context: &Context) -> usize {
    let context_keywords = keyword_set(&context.keyword_text());
    let mut section_keywords = keyword_set(&section.title);
    section_keywords.extend(keyword_set(&section.body));
    section_keywords
        .iter()
        .filter(|keyword| context_keywords.contains(*keyword))
        .count()
}

/// Score every section against the context and return the top `top_k`.
///
/// The TF-IDF model is fit jointly over the context query and every section
/// text in this batch — IDF reflects this call only. Results come back
/// sorted by descending score; the sort is stable, so equal scores keep
/// their pool order. `top_k` larger than the pool returns the whole pool;
/// an empty pool returns an empty list. Pure function of its inputs:
/// repeated calls produce bit-identical scores.
pub fn rank_sections(
    sections: &[Section],
    context: &Context,
    top_k: usize,
) -> Vec<ScoredSection> {
    if sections.is_empty() {
        return Vec::new();
    }

    let query_text = context.query_text();
    let section_texts: Vec<String> = sections
        .iter()
        .map(|s| format!("{}. {}", s.title, s.body))
        .collect();

    let mut batch: Vec<&str> = Vec::with_capacity(section_texts.len() + 1);
    batch.push(&query_text);
    batch.extend(section_texts.iter().map(String::as_str));
    let model = TfidfModel::fit(&batch);
    let query_vector = model.vector(&query_text);

    let mut scored: Vec<ScoredSection> = sections
        .iter()
        .enumerate()
        .map(|(index, section)| {
            let lexical = query_vector.dot(&model.vector(&section_texts[index]));
            let overlap = keyword_overlap(section, context) as f64;
            ScoredSection {
                section: index,
                score: LEXICAL_WEIGHT * lexical
                    + KEYWORD_WEIGHT * overlap
                    + heading_penalty(&section.title),
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::section;

    #[test]
    fn boilerplate_penalty_is_exact_match_any_case() {
        assert_eq!(heading_penalty("Conclusion"), BOILERPLATE_PENALTY);
        assert_eq!(heading_penalty("  SUMMARY "), BOILERPLATE_PENALTY);
        assert_eq!(heading_penalty("Introduction to Rust"), 0.0);
        assert_eq!(heading_penalty("Findings"), 0.0);
    }

    #[test]
    fn overlap_counts_distinct_long_keywords_only() {
        let s = section(
            "doc.pdf",
            "Budget Planning",
            "the budget covers team travel and team meals",
            1,
        );
        let ctx = Context::new("Financial Analyst", "prepare a team budget plan");
        // Shared tokens longer than 3 chars: budget, team. "a"/"the" are out,
        // and repeated "team" counts once.
        assert_eq!(keyword_overlap(&s, &ctx), 2);
    }

    #[test]
    fn overlap_sees_title_and_body_as_one_set() {
        let s = section("doc.pdf", "Budget", "budget budget budget", 1);
        let ctx = Context::new("Analyst", "budget work");
        assert_eq!(keyword_overlap(&s, &ctx), 1);
    }

    #[test]
    fn relevant_section_outranks_filler() {
        let pool = vec![
            section(
                "generic.pdf",
                "INTRODUCTION",
                "this document describes various things in general terms",
                1,
            ),
            section(
                "budget.pdf",
                "Budget Planning for Small Teams",
                "budget planning for a small team. the team budget covers planning and more budget items",
                2,
            ),
        ];
        let ctx = Context::new("Financial Analyst", "prepare a team budget plan");
        let ranked = rank_sections(&pool, &ctx, DEFAULT_TOP_K);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].section, 1);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn boilerplate_title_costs_exactly_one_point() {
        // Identical bodies, titles of equal shape, neither title word shared
        // with the context: the only score difference is the penalty.
        let pool = vec![
            section("a.pdf", "Conclusion", "team budget planning notes", 1),
            section("b.pdf", "Appendices", "team budget planning notes", 1),
        ];
        let ctx = Context::new("Analyst", "team budget plan review");
        let ranked = rank_sections(&pool, &ctx, 2);

        let conclusion = ranked.iter().find(|r| r.section == 0).unwrap();
        let control = ranked.iter().find(|r| r.section == 1).unwrap();
        assert!((control.score - conclusion.score - 1.0).abs() < 1e-9);
        assert_eq!(ranked[0].section, 1);
    }

    #[test]
    fn ties_keep_pool_order() {
        let pool = vec![
            section("a.pdf", "Alpha Notes", "identical body text here", 1),
            section("b.pdf", "Alpha Notes", "identical body text here", 2),
            section("c.pdf", "Alpha Notes", "identical body text here", 3),
        ];
        let ctx = Context::new("Reader", "something unrelated entirely");
        let ranked = rank_sections(&pool, &ctx, 3);

        let order: Vec<usize> = ranked.iter().map(|r| r.section).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn top_k_caps_and_exceeds_gracefully() {
        let pool = vec![
            section("a.pdf", "One Section", "body text one", 1),
            section("b.pdf", "Two Section", "body text two", 1),
        ];
        let ctx = Context::new("Reader", "task");
        assert_eq!(rank_sections(&pool, &ctx, 1).len(), 1);
        assert_eq!(rank_sections(&pool, &ctx, 10).len(), 2);
    }

    #[test]
    fn empty_pool_returns_empty() {
        let ctx = Context::new("Reader", "task");
        assert!(rank_sections(&[], &ctx, DEFAULT_TOP_K).is_empty());
    }
}
