// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The collection's output artifact.
//!
//! Written to `challenge1b_output.json` as pretty-printed JSON. The two
//! result arrays follow ranked order (rank 1 first) and correspond
//! index-for-index to the same underlying sections.

use serde::{Deserialize, Serialize};

use crate::types::{Context, ScoredSection, Section};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OutputArtifact {
    pub metadata: Metadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Metadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    /// ISO-8601, local time.
    pub processing_timestamp: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    /// 1-based; rank 1 is the most relevant section.
    pub importance_rank: u32,
    pub page_number: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

/// Assemble the artifact from the ranked selection and its refined excerpts.
///
/// `excerpts` must parallel `ranked` index-for-index — the orchestrator
/// refines exactly the sections the ranker selected, in ranked order.
pub fn assemble(
    input_documents: Vec<String>,
    context: &Context,
    timestamp: String,
    pool: &[Section],
    ranked: &[ScoredSection],
    excerpts: Vec<String>,
) -> OutputArtifact {
    debug_assert_eq!(ranked.len(), excerpts.len());

    let extracted_sections = ranked
        .iter()
        .enumerate()
        .map(|(position, scored)| {
            let section = &pool[scored.section];
            ExtractedSection {
                document: section.document.clone(),
                section_title: section.title.clone(),
                importance_rank: (position + 1) as u32,
                page_number: section.page_number,
            }
        })
        .collect();

    let subsection_analysis = ranked
        .iter()
        .zip(excerpts)
        .map(|(scored, refined_text)| {
            let section = &pool[scored.section];
            SubsectionAnalysis {
                document: section.document.clone(),
                refined_text,
                page_number: section.page_number,
            }
        })
        .collect();

    OutputArtifact {
        metadata: Metadata {
            input_documents,
            persona: context.persona.clone(),
            job_to_be_done: context.task.clone(),
            processing_timestamp: timestamp,
        },
        extracted_sections,
        subsection_analysis,
    }
}
