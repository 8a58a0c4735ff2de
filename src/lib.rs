//! Persona-driven document section ranking and excerpt refinement.
//!
//! Give the pipeline a set of PDF documents, a reader persona, and a task,
//! and it answers: which sections of which documents should this reader look
//! at, and what are the most task-relevant few hundred characters of each?
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐    ┌─────────────┐    ┌───────────┐    ┌────────────┐
//! │ ingest     │───▶│ segment     │───▶│ rank      │───▶│ refine     │
//! │ (PDF →     │    │ (tokens →   │    │ (sections │    │ (section → │
//! │  WordToken)│    │  Sections)  │    │  → top-K) │    │  excerpt)  │
//! └────────────┘    └─────────────┘    └───────────┘    └────────────┘
//!        │                 │                 │                 │
//!        ▼                 ▼                 ▼                 ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       collection                                │
//! │   (manifest in, artifact out, one collection per invocation)    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows strictly forward. Sections from every document in a collection
//! pool into one caller-owned list; the ranker scores that pool once against
//! the persona/task context; the refiner compresses each winner. Everything
//! from segmentation onward is a pure function — determinism is a tested
//! property, not an aspiration.
//!
//! # Usage
//!
//! ```ignore
//! use excerpta::{segment_pages, rank_sections, refine_excerpt, Context};
//!
//! let pages = excerpta::extract_pages(path)?;
//! let sections = segment_pages("report.pdf", &pages);
//! let context = Context::new("Financial Analyst", "prepare a team budget plan");
//! let top = rank_sections(&sections, &context, 5);
//! let excerpt = refine_excerpt(&sections[top[0].section], &context, 400);
//! ```

// Module declarations
pub mod collection;
pub mod ingest;
pub mod rank;
pub mod refine;
pub mod segment;
pub mod types;
pub mod utils;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use collection::{run_all, run_collection, InputManifest, OutputArtifact};
pub use ingest::extract_pages;
pub use rank::{heading_penalty, keyword_overlap, rank_sections, DEFAULT_TOP_K};
pub use refine::{refine_excerpt, split_sentences, DEFAULT_MAX_CHARS};
pub use segment::{assemble_lines, document_font_average, is_heading, segment_pages};
pub use types::{Context, Line, ScoredSection, Section, WordToken};
