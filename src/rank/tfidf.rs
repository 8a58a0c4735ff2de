// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Batch-fit TF-IDF vectorization.
//!
//! The model is fit jointly over the query and every section text on each
//! ranking call, then discarded — IDF reflects the current batch only, never
//! a persistent corpus. That makes this a pure function of its inputs, which
//! is exactly what keeps scoring reproducible.
//!
//! # Determinism
//!
//! Identical input texts must produce bit-identical scores across runs, so
//! every accumulation here iterates in a fixed order: the vocabulary is a
//! sorted `Vec`, document frequencies live in a `BTreeMap`, and sparse
//! vectors keep their entries sorted by term index. No hash-map iteration
//! order ever reaches a floating-point sum.
//!
//! # Weighting
//!
//! Tokens are lowercased word-character runs of length ≥ 2. Weights follow
//! the standard smoothed scheme: `tf × (ln((1 + n) / (1 + df)) + 1)`, with
//! each vector L2-normalized, so the dot product of two vectors is their
//! cosine similarity.

use std::collections::BTreeMap;

use crate::utils::tokenize;

/// Minimum token length (in characters) for the TF-IDF vocabulary.
const MIN_TOKEN_CHARS: usize = 2;

/// A sparse vector over the fitted vocabulary: `(term_index, weight)` pairs
/// sorted by ascending term index.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Dot product with another vector over the same vocabulary.
    ///
    /// Linear merge over the two sorted entry lists; terms present in only
    /// one vector contribute nothing.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let mut sum = 0.0;
        let mut a = self.entries.iter().peekable();
        let mut b = other.entries.iter().peekable();
        while let (Some(&&(ai, aw)), Some(&&(bi, bw))) = (a.peek(), b.peek()) {
            match ai.cmp(&bi) {
                std::cmp::Ordering::Less => {
                    a.next();
                }
                std::cmp::Ordering::Greater => {
                    b.next();
                }
                std::cmp::Ordering::Equal => {
                    sum += aw * bw;
                    a.next();
                    b.next();
                }
            }
        }
        sum
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A TF-IDF model fit over one batch of texts.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    /// Sorted vocabulary; index is the term id used by [`SparseVector`].
    vocabulary: Vec<String>,
    /// Smoothed inverse document frequency per vocabulary term.
    idf: Vec<f64>,
}

impl TfidfModel {
    /// Fit vocabulary and IDF over `texts`.
    ///
    /// The vocabulary is every qualifying token seen anywhere in the batch,
    /// in sorted order; `idf[i] = ln((1 + n) / (1 + df_i)) + 1` where `n` is
    /// the batch size and `df_i` the number of texts containing term `i`.
    pub fn fit<S: AsRef<str>>(texts: &[S]) -> Self {
        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for text in texts {
            for term in term_counts(text.as_ref()).into_keys() {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        let n = texts.len() as f64;
        let mut vocabulary = Vec::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (term, df) in document_frequency {
            vocabulary.push(term);
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        Self { vocabulary, idf }
    }

    /// Transform one text into an L2-normalized TF-IDF vector.
    ///
    /// Tokens outside the fitted vocabulary are ignored, matching what a
    /// fitted vectorizer does with unseen terms.
    pub fn vector(&self, text: &str) -> SparseVector {
        let mut entries: Vec<(usize, f64)> = term_counts(text)
            .into_iter()
            .filter_map(|(term, count)| {
                self.vocabulary
                    .binary_search(&term)
                    .ok()
                    .map(|idx| (idx, count as f64 * self.idf[idx]))
            })
            .collect();

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in entries.iter_mut() {
                *w /= norm;
            }
        }

        SparseVector { entries }
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Term frequencies of one text, in sorted term order.
fn term_counts(text: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for token in tokenize(text) {
        if token.chars().count() >= MIN_TOKEN_CHARS {
            *counts.entry(token).or_insert(0) += 1;
        }
    }
    counts
}
