//! Template rendering for generated registration sources.
//!
//! Output is a pure function of the vocabulary and the extracted identifiers,
//! so re-rendering an unchanged source yields byte-identical text. The
//! idempotent writer relies on that.

use crate::scan::Extraction;
use crate::vocabulary::{HeaderStyle, MarkerVocabulary};

/// Renders the full generated source: the declaration block followed by the
/// registration block.
#[must_use]
pub fn render(vocabulary: &MarkerVocabulary, extraction: &Extraction) -> String {
    let mut content = declaration_block(vocabulary, extraction);
    content.push_str(&registration_block(vocabulary, &extraction.suite, &extraction.tests));
    content
}

/// Renders the namespace binding, framework header, and the test class with
/// one declaration per test.
#[must_use]
pub fn declaration_block(vocabulary: &MarkerVocabulary, extraction: &Extraction) -> String {
    let mut block = String::with_capacity(256);
    push_line(
        &mut block,
        &format!("#define {} {}", vocabulary.namespace_marker, extraction.namespace),
    );
    push_header(&mut block, vocabulary);
    block.push('\n');
    push_line(
        &mut block,
        &format!("{}({})", vocabulary.suite_marker, extraction.suite),
    );
    block.push_str("{\n");
    for test in &extraction.tests {
        push_line(&mut block, &format!("\t{}({test});", vocabulary.test_marker));
    }
    block.push_str("}\n\n");
    block
}

/// Renders the run registration for `suite` with one line per test.
#[must_use]
pub fn registration_block(vocabulary: &MarkerVocabulary, suite: &str, tests: &[String]) -> String {
    let mut block = String::with_capacity(128);
    push_line(&mut block, &format!("{}({suite})", vocabulary.run_class_begin));
    for test in tests {
        push_line(
            &mut block,
            &format!("\t{}({suite}, {test})", vocabulary.run_method),
        );
    }
    push_line(&mut block, &vocabulary.run_class_end);
    block
}

fn push_header(block: &mut String, vocabulary: &MarkerVocabulary) {
    let header = &vocabulary.header;
    match vocabulary.header_style {
        HeaderStyle::Include => push_line(block, &format!("#include \"{header}\"")),
        HeaderStyle::AppleImport => {
            block.push_str("#ifdef __APPLE__\n");
            push_line(block, &format!("#import \"{header}\""));
            block.push_str("#else\n");
            push_line(block, &format!("#include \"{header}\""));
            block.push_str("#endif\n");
        }
    }
}

fn push_line(block: &mut String, line: &str) {
    block.push_str(line);
    block.push('\n');
}
