//! Generation pipeline: locate, scan, render, then write.
//!
//! Every candidate is scanned and rendered before anything touches the output
//! directory. A required-marker failure in any file therefore aborts the run
//! with zero files written.

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{info, warn};

use crate::error::GenError;
use crate::locate::{SourceFile, locate_sources, open_source_dir, read_source};
use crate::render::render;
use crate::scan::{ScanError, scan};
use crate::vocabulary::MarkerVocabulary;
use crate::writer::{WriteOutcome, ensure_dir, write_if_changed};

/// Inputs for one generator run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Directory holding the hand-written test sources.
    pub source_dir: Utf8PathBuf,
    /// Namespace applied to every file instead of scanning for one.
    pub namespace_override: Option<String>,
    /// Markers and file conventions to apply.
    pub vocabulary: MarkerVocabulary,
}

/// A rendered companion source awaiting the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    /// Source file the artefact was generated from.
    pub source: String,
    /// File name inside the output directory.
    pub file_name: String,
    /// Complete generated text.
    pub content: String,
}

/// Run-scoped counters reported after generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Candidate sources found in the source directory.
    pub discovered: usize,
    /// Empty sources that produced no output.
    pub skipped_empty: usize,
    /// Generated files created or rewritten.
    pub updated: Vec<Utf8PathBuf>,
    /// Generated files left untouched because their content matched.
    pub unchanged: Vec<Utf8PathBuf>,
}

/// Runs the full pipeline for `request`.
///
/// # Errors
///
/// Returns the first [`GenError`] encountered. Marker failures surface before
/// any file is written.
pub fn generate(request: &GenerateRequest) -> Result<RunSummary, GenError> {
    let vocabulary = &request.vocabulary;
    info!(path = %request.source_dir, "searching for test sources");
    let source_dir = open_source_dir(&request.source_dir)?;
    let sources = locate_sources(&source_dir, &request.source_dir, vocabulary)?;
    info!(count = sources.len(), "found test sources");
    for source in &sources {
        info!(file = %source.name, "discovered");
    }

    let mut summary = RunSummary {
        discovered: sources.len(),
        ..RunSummary::default()
    };

    let mut artifacts = Vec::with_capacity(sources.len());
    for source in &sources {
        let text = read_source(&source_dir, source)?;
        if text.is_empty() {
            warn!(file = %source.name, "skipping empty source");
            summary.skipped_empty += 1;
            continue;
        }
        artifacts.push(build_artifact(source, &text, request)?);
    }

    let out_root = output_dir(&request.source_dir, vocabulary);
    let out_dir = ensure_dir(&out_root)?;
    for artifact in &artifacts {
        let target = out_root.join(&artifact.file_name);
        match write_if_changed(&out_dir, &out_root, &artifact.file_name, &artifact.content)? {
            WriteOutcome::Updated => {
                info!(file = %artifact.source, target = %target, "saved");
                summary.updated.push(target);
            }
            WriteOutcome::Unchanged => {
                info!(file = %artifact.source, target = %target, "no changes, skipping");
                summary.unchanged.push(target);
            }
        }
    }

    Ok(summary)
}

/// Scans and renders a single normalised source.
///
/// # Errors
///
/// Returns a marker error naming `source` when a required marker is missing.
pub fn build_artifact(
    source: &SourceFile,
    text: &str,
    request: &GenerateRequest,
) -> Result<RenderedArtifact, GenError> {
    let vocabulary = &request.vocabulary;
    info!(file = %source.name, "processing");
    let extraction = scan(text, vocabulary, request.namespace_override.as_deref())
        .map_err(|err| attach_file(err, &source.name, vocabulary))?;
    info!(
        file = %source.name,
        namespace = %extraction.namespace,
        suite = %extraction.suite,
        functions = extraction.tests.len(),
        "extracted test class"
    );

    Ok(RenderedArtifact {
        source: source.name.clone(),
        file_name: output_file_name(&source.name, vocabulary),
        content: render(vocabulary, &extraction),
    })
}

/// Forms the generated file name for `source_name`.
#[must_use]
pub fn output_file_name(source_name: &str, vocabulary: &MarkerVocabulary) -> String {
    format!("{}{source_name}", vocabulary.output_prefix)
}

/// Returns the directory generated files are written to.
#[must_use]
pub fn output_dir(source_dir: &Utf8Path, vocabulary: &MarkerVocabulary) -> Utf8PathBuf {
    source_dir.join(&vocabulary.output_dir)
}

fn attach_file(err: ScanError, file_name: &str, vocabulary: &MarkerVocabulary) -> GenError {
    let file = file_name.to_owned();
    match err {
        ScanError::MissingNamespace => GenError::MissingNamespace {
            file,
            marker: vocabulary.namespace_marker.clone(),
        },
        ScanError::MissingSuiteDeclaration => GenError::MissingSuiteDeclaration {
            file,
            marker: vocabulary.suite_marker.clone(),
        },
        ScanError::BlankSuiteName => GenError::BlankSuiteName {
            file,
            marker: vocabulary.suite_marker.clone(),
        },
    }
}
