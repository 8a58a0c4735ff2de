pub mod manifest;
pub mod output;

use std::fs;
use std::path::Path;

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};

use crate::rank::{rank_sections, DEFAULT_TOP_K};
use crate::refine::{refine_excerpt, DEFAULT_MAX_CHARS};
use crate::types::{Context, Section};
use crate::{ingest, segment};

pub use manifest::*;
pub use output::*;

/// Fixed manifest file name inside a collection directory.
pub const INPUT_FILE_NAME: &str = "challenge1b_input.json";

/// Fixed artifact file name inside a collection directory.
pub const OUTPUT_FILE_NAME: &str = "challenge1b_output.json";

/// Subdirectory of a collection holding the PDFs named by the manifest.
pub const PDF_SUBDIR: &str = "PDFs";

/// Case-insensitive prefix selecting collection directories in `run_all`.
const COLLECTION_PREFIX: &str = "collection";

/// Progress style for the per-document ingest bar.
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap()
    .progress_chars("━━╸")
}

/// Process one collection directory end to end.
///
/// Reads the manifest, segments every listed PDF into the shared section
/// pool, ranks the pool once against the persona/task context, refines each
/// selected section, and writes the output artifact. Documents are processed
/// strictly sequentially; the first input error aborts the run.
pub fn run_collection(collection_path: &Path) -> Result<(), String> {
    // 1. Read manifest
    let manifest_path = collection_path.join(INPUT_FILE_NAME);
    let manifest_content = fs::read_to_string(&manifest_path)
        .map_err(|e| format!("failed to read {}: {}", manifest_path.display(), e))?;
    let manifest: InputManifest = serde_json::from_str(&manifest_content)
        .map_err(|e| format!("invalid manifest {}: {}", manifest_path.display(), e))?;

    let context = Context::new(
        manifest.persona.role.clone(),
        manifest.job_to_be_done.task.clone(),
    );

    // 2. Segment every document into one pooled section list
    let pdf_dir = collection_path.join(PDF_SUBDIR);
    let ingest_pb = ProgressBar::new(manifest.documents.len() as u64);
    ingest_pb.set_style(create_progress_style());
    ingest_pb.set_prefix("Ingesting");

    let mut pool: Vec<Section> = Vec::new();
    for entry in &manifest.documents {
        ingest_pb.set_message(entry.filename.clone());
        let pages = ingest::extract_pages(&pdf_dir.join(&entry.filename))?;
        pool.extend(segment::segment_pages(&entry.filename, &pages));
        ingest_pb.inc(1);
    }
    ingest_pb.finish_with_message(format!("{} sections", pool.len()));

    // 3. Rank the pool once, then refine each selected section
    let ranked = rank_sections(&pool, &context, DEFAULT_TOP_K);
    let excerpts: Vec<String> = ranked
        .iter()
        .map(|scored| refine_excerpt(&pool[scored.section], &context, DEFAULT_MAX_CHARS))
        .collect();

    // 4. Assemble and write the artifact
    let artifact = output::assemble(
        manifest
            .documents
            .iter()
            .map(|d| d.filename.clone())
            .collect(),
        &context,
        Local::now().to_rfc3339(),
        &pool,
        &ranked,
        excerpts,
    );

    let output_path = collection_path.join(OUTPUT_FILE_NAME);
    let serialized = serde_json::to_string_pretty(&artifact)
        .map_err(|e| format!("failed to serialize output: {}", e))?;
    fs::write(&output_path, serialized)
        .map_err(|e| format!("failed to write {}: {}", output_path.display(), e))?;

    eprintln!(
        "✅ {} │ {} documents │ {} sections │ {} selected",
        collection_path.display(),
        manifest.documents.len(),
        pool.len(),
        ranked.len()
    );

    Ok(())
}

/// Process every collection under `root`, sequentially.
///
/// A collection is any subdirectory whose name starts with `collection`,
/// case-insensitively. Directories are taken in sorted name order so batch
/// runs are reproducible. The first failing collection aborts the batch —
/// there is no per-collection fault isolation.
pub fn run_all(root: &Path) -> Result<(), String> {
    let entries =
        fs::read_dir(root).map_err(|e| format!("failed to list {}: {}", root.display(), e))?;

    let mut collections: Vec<_> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .filter(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .to_lowercase()
                .starts_with(COLLECTION_PREFIX)
        })
        .map(|entry| entry.path())
        .collect();
    collections.sort();

    if collections.is_empty() {
        eprintln!("⚠️  no collection directories under {}", root.display());
        return Ok(());
    }

    for collection in &collections {
        run_collection(collection)?;
    }

    eprintln!("✅ processed {} collections", collections.len());
    Ok(())
}
