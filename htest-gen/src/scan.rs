//! Positional marker scanning over raw test sources.
//!
//! The scanner never parses C++: each marker is an opaque token located by
//! substring search, and its argument is whatever follows on the same line.
//! A marker inside a comment or string literal is therefore indistinguishable
//! from a real declaration.

use thiserror::Error;
use tracing::warn;

use crate::vocabulary::MarkerVocabulary;

/// Identifiers extracted from one test source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Library namespace the generated file binds to.
    pub namespace: String,
    /// Name of the test class declared by the suite marker.
    pub suite: String,
    /// Test function names in the order they appear in the source.
    pub tests: Vec<String>,
}

/// Required markers missing from a source. File context is attached by the
/// orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// No override was supplied and the namespace marker is absent or empty.
    #[error("no namespace defined")]
    MissingNamespace,
    /// The suite marker does not occur in the source.
    #[error("no suite declaration")]
    MissingSuiteDeclaration,
    /// The suite marker occurs but names nothing.
    #[error("suite declaration is blank")]
    BlankSuiteName,
}

/// Removes carriage returns so line-ending style never affects extraction.
#[must_use]
pub fn normalize_line_endings(text: &str) -> String {
    text.replace('\r', "")
}

/// Extracts namespace, suite, and test names from `text`.
///
/// `text` is expected to be normalised with [`normalize_line_endings`]. When
/// `namespace_override` is present and non-blank, any namespace marker in the
/// source is ignored.
///
/// # Errors
///
/// Returns a [`ScanError`] when the namespace cannot be determined or the
/// suite marker is absent or blank.
pub fn scan(
    text: &str,
    vocabulary: &MarkerVocabulary,
    namespace_override: Option<&str>,
) -> Result<Extraction, ScanError> {
    let namespace = match namespace_override.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.to_owned(),
        None => find_argument(text, &vocabulary.namespace_marker, 0)
            .map(|(value, _)| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .ok_or(ScanError::MissingNamespace)?,
    };

    let (suite_line, mut cursor) = find_argument(text, &vocabulary.suite_marker, 0)
        .ok_or(ScanError::MissingSuiteDeclaration)?;
    let suite = strip_parens(suite_line).to_owned();
    if suite.is_empty() {
        return Err(ScanError::BlankSuiteName);
    }

    let mut tests = Vec::new();
    while let Some((line, next)) = find_argument(text, &vocabulary.test_marker, cursor) {
        cursor = next;
        let name = strip_parens(line);
        if name.is_empty() {
            warn!(marker = %vocabulary.test_marker, "skipping test marker without a name");
            continue;
        }
        tests.push(name.to_owned());
    }

    Ok(Extraction {
        namespace,
        suite,
        tests,
    })
}

/// Finds `marker` at or after `from` and returns the rest of its line along
/// with the offset just past the marker.
fn find_argument<'a>(text: &'a str, marker: &str, from: usize) -> Option<(&'a str, usize)> {
    if marker.is_empty() {
        return None;
    }
    let tail = text.get(from..)?;
    let start = from + tail.find(marker)? + marker.len();
    let rest = text.get(start..)?;
    let line = rest.split('\n').next().unwrap_or_default();
    Some((line, start))
}

fn strip_parens(argument: &str) -> &str {
    argument.trim_matches(|ch: char| ch == '(' || ch == ')' || ch.is_whitespace())
}
