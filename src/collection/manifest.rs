use serde::Deserialize;

/// The per-collection input manifest.
///
/// Read from `challenge1b_input.json` inside the collection directory. The
/// document list is ordered; PDFs resolve under the collection's `PDFs/`
/// subdirectory.
#[derive(Deserialize, Clone, Debug)]
pub struct InputManifest {
    pub persona: Persona,
    pub job_to_be_done: JobToBeDone,
    pub documents: Vec<DocumentEntry>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Persona {
    pub role: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct JobToBeDone {
    pub task: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DocumentEntry {
    pub filename: String,
    /// Display title; optional and currently informational only.
    #[serde(default)]
    pub title: Option<String>,
}
