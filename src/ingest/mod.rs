// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The layout ingestor: PDF files in, positioned word tokens out.
//!
//! This is the pipeline's only contact with the PDF format. Each document is
//! opened, read exhaustively page by page, and released before the next one
//! is touched. The output is deliberately minimal — per page, a flat list of
//! [`WordToken`]s with text, position, and font size — so everything
//! downstream of this module can be driven by synthetic tokens in tests.
//!
//! Failure semantics: a PDF that cannot be loaded, or a page whose content
//! stream cannot be decoded, is a fatal error for the collection run. There
//! is no partial recovery here; heuristic damage control belongs to the
//! segmenter, not the ingestor.

mod content;

use std::path::Path;

use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};

use crate::types::WordToken;
use content::TextInterpreter;

/// Fallback page height (US Letter, points) when no MediaBox is found.
pub const DEFAULT_PAGE_HEIGHT: f64 = 792.0;

/// Extract every page's word tokens from the PDF at `path`, in page order.
///
/// The word geometry comes from a reduced interpretation of each page's
/// content stream (see [`content`]); `y` values are converted to
/// top-of-page distances so ascending order is reading order.
pub fn extract_pages(path: &Path) -> Result<Vec<Vec<WordToken>>, String> {
    let document = Document::load(path)
        .map_err(|e| format!("failed to open {}: {}", path.display(), e))?;

    let mut pages = Vec::new();
    for (page_number, page_id) in document.get_pages() {
        let raw = document.get_page_content(page_id).map_err(|e| {
            format!(
                "failed to read page {} of {}: {}",
                page_number,
                path.display(),
                e
            )
        })?;
        let operations = Content::decode(&raw).map_err(|e| {
            format!(
                "failed to decode page {} of {}: {}",
                page_number,
                path.display(),
                e
            )
        })?;

        let mut interpreter = TextInterpreter::new(page_height(&document, page_id));
        for operation in &operations.operations {
            interpreter.apply(operation);
        }
        pages.push(interpreter.finish());
    }

    Ok(pages)
}

/// Page height from the MediaBox, following the Parent chain for inherited
/// boxes. Falls back to [`DEFAULT_PAGE_HEIGHT`] when absent or malformed.
fn page_height(document: &Document, page_id: ObjectId) -> f64 {
    let mut current = page_id;
    // Parent chains are shallow; eight levels is already generous.
    for _ in 0..8 {
        let Ok(dict) = document.get_object(current).and_then(Object::as_dict) else {
            break;
        };
        if let Some(height) = dict
            .get(b"MediaBox")
            .ok()
            .and_then(|media_box| resolve(document, media_box).as_array().ok())
            .and_then(|rectangle| media_box_height(rectangle))
        {
            return height;
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => current = parent,
            Err(_) => break,
        }
    }
    DEFAULT_PAGE_HEIGHT
}

/// Follow a reference one level; other objects pass through unchanged.
fn resolve<'a>(document: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => document.get_object(*id).unwrap_or(object),
        other => other,
    }
}

/// `|y1 - y0|` of a `[x0 y0 x1 y1]` rectangle, if it is one.
fn media_box_height(rectangle: &[Object]) -> Option<f64> {
    if rectangle.len() != 4 {
        return None;
    }
    let y0 = content::operand_number(&rectangle[1])?;
    let y1 = content::operand_number(&rectangle[3])?;
    let height = (y1 - y0).abs();
    (height > 0.0).then_some(height)
}
