//! Marker vocabularies understood by the generator.
//!
//! A vocabulary bundles the textual markers searched for in hand-written test
//! sources together with the macro names and framework header emitted into the
//! generated companion file. The two built-in [`Profile`]s cover the
//! `hunittest` and `htest` frameworks; any field can be overridden through
//! [`VocabularyOverrides`].

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Built-in marker vocabularies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// The `htest` framework (`HTEST_*` markers, plain `#include`).
    #[default]
    Htest,
    /// The `hunittest` framework (`HL_UT_*` markers, Apple `#import` switch).
    Hunittest,
}

impl Profile {
    /// Returns the CLI-friendly name of this profile.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Htest => "htest",
            Self::Hunittest => "hunittest",
        }
    }

    /// Returns the complete vocabulary for this profile.
    #[must_use]
    pub fn vocabulary(self) -> MarkerVocabulary {
        match self {
            Self::Htest => MarkerVocabulary {
                namespace_marker: "__HTEST_LIB_NAME".to_owned(),
                suite_marker: "HTEST_CLASS".to_owned(),
                test_marker: "HTEST_FUNCTION".to_owned(),
                run_class_begin: "HTEST_RUN_CLASS_BEGIN".to_owned(),
                run_class_end: "HTEST_RUN_CLASS_END".to_owned(),
                run_method: "HTEST_RUN_METHOD".to_owned(),
                header: "htest.h".to_owned(),
                header_style: HeaderStyle::Include,
                framework_source: "htest.cpp".to_owned(),
                ..MarkerVocabulary::file_conventions()
            },
            Self::Hunittest => MarkerVocabulary {
                namespace_marker: "__HL_UT_LIB_NAME".to_owned(),
                suite_marker: "HL_UT_TEST_CLASS".to_owned(),
                test_marker: "HL_UT_TEST_FUNCTION".to_owned(),
                run_class_begin: "HL_UT_RUN_CLASS_BEGIN".to_owned(),
                run_class_end: "HL_UT_RUN_CLASS_END".to_owned(),
                run_method: "HL_UT_RUN_METHOD".to_owned(),
                header: "hunittest.h".to_owned(),
                header_style: HeaderStyle::AppleImport,
                framework_source: "hunittest.cpp".to_owned(),
                ..MarkerVocabulary::file_conventions()
            },
        }
    }
}

/// How the framework header is pulled into a generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderStyle {
    /// A single `#include "header"` line.
    Include,
    /// `#import` under `__APPLE__`, `#include` everywhere else.
    AppleImport,
}

/// Markers, macro names, and file conventions for one test framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerVocabulary {
    /// Token preceding the library namespace, e.g. `__HTEST_LIB_NAME`.
    pub namespace_marker: String,
    /// Token declaring the test class, e.g. `HTEST_CLASS`.
    pub suite_marker: String,
    /// Token declaring each test function, e.g. `HTEST_FUNCTION`.
    pub test_marker: String,
    /// Macro opening the run registration for a class.
    pub run_class_begin: String,
    /// Macro closing the run registration for a class.
    pub run_class_end: String,
    /// Macro registering a single test method.
    pub run_method: String,
    /// Framework header included by generated files.
    pub header: String,
    /// How `header` is included.
    pub header_style: HeaderStyle,
    /// Hand-written framework source that is never treated as a test file.
    pub framework_source: String,
    /// Extension identifying candidate source files.
    pub extension: String,
    /// Subdirectory of the source directory receiving generated files.
    pub output_dir: String,
    /// Prefix prepended to a source file name to form its generated name.
    pub output_prefix: String,
}

impl MarkerVocabulary {
    // Extension and output naming shared by every built-in profile; the
    // marker fields are placeholders filled in by `Profile::vocabulary`.
    fn file_conventions() -> Self {
        Self {
            namespace_marker: String::new(),
            suite_marker: String::new(),
            test_marker: String::new(),
            run_class_begin: String::new(),
            run_class_end: String::new(),
            run_method: String::new(),
            header: String::new(),
            header_style: HeaderStyle::Include,
            framework_source: String::new(),
            extension: ".cpp".to_owned(),
            output_dir: "generated".to_owned(),
            output_prefix: "_".to_owned(),
        }
    }

    /// Applies any overrides present in `overrides` and returns the result.
    #[must_use]
    pub fn apply(mut self, overrides: &VocabularyOverrides) -> Self {
        let fields = [
            (&mut self.namespace_marker, &overrides.namespace_marker),
            (&mut self.suite_marker, &overrides.suite_marker),
            (&mut self.test_marker, &overrides.test_marker),
            (&mut self.run_class_begin, &overrides.run_class_begin),
            (&mut self.run_class_end, &overrides.run_class_end),
            (&mut self.run_method, &overrides.run_method),
            (&mut self.header, &overrides.header),
            (&mut self.framework_source, &overrides.framework_source),
            (&mut self.extension, &overrides.extension),
            (&mut self.output_dir, &overrides.output_dir),
            (&mut self.output_prefix, &overrides.output_prefix),
        ];
        for (slot, value) in fields {
            if let Some(replacement) = value {
                slot.clone_from(replacement);
            }
        }
        if let Some(style) = overrides.header_style {
            self.header_style = style;
        }
        self
    }
}

impl Default for MarkerVocabulary {
    fn default() -> Self {
        Profile::default().vocabulary()
    }
}

/// Optional per-field replacements layered over a profile's vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyOverrides {
    /// Replacement namespace marker.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lossy::option_string"
    )]
    pub namespace_marker: Option<String>,
    /// Replacement suite marker.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lossy::option_string"
    )]
    pub suite_marker: Option<String>,
    /// Replacement test marker.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lossy::option_string"
    )]
    pub test_marker: Option<String>,
    /// Replacement run-class-begin macro.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lossy::option_string"
    )]
    pub run_class_begin: Option<String>,
    /// Replacement run-class-end macro.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lossy::option_string"
    )]
    pub run_class_end: Option<String>,
    /// Replacement run-method macro.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lossy::option_string"
    )]
    pub run_method: Option<String>,
    /// Replacement framework header.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lossy::option_string"
    )]
    pub header: Option<String>,
    /// Replacement header style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_style: Option<HeaderStyle>,
    /// Replacement excluded framework source name.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lossy::option_string"
    )]
    pub framework_source: Option<String>,
    /// Replacement source extension.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lossy::option_string"
    )]
    pub extension: Option<String>,
    /// Replacement output subdirectory.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lossy::option_string"
    )]
    pub output_dir: Option<String>,
    /// Replacement output file prefix.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::lossy::option_string"
    )]
    pub output_prefix: Option<String>,
}

#[cfg(test)]
mod tests {
    //! Tests for the built-in vocabularies.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hunittest_profile_uses_hl_ut_markers() {
        let vocabulary = Profile::Hunittest.vocabulary();
        assert_eq!(vocabulary.namespace_marker, "__HL_UT_LIB_NAME");
        assert_eq!(vocabulary.suite_marker, "HL_UT_TEST_CLASS");
        assert_eq!(vocabulary.test_marker, "HL_UT_TEST_FUNCTION");
        assert_eq!(vocabulary.run_method, "HL_UT_RUN_METHOD");
        assert_eq!(vocabulary.header, "hunittest.h");
        assert_eq!(vocabulary.framework_source, "hunittest.cpp");
        assert_eq!(vocabulary.header_style, HeaderStyle::AppleImport);
    }

    #[rstest]
    fn htest_profile_uses_htest_markers() {
        let vocabulary = Profile::Htest.vocabulary();
        assert_eq!(vocabulary.namespace_marker, "__HTEST_LIB_NAME");
        assert_eq!(vocabulary.suite_marker, "HTEST_CLASS");
        assert_eq!(vocabulary.test_marker, "HTEST_FUNCTION");
        assert_eq!(vocabulary.run_class_begin, "HTEST_RUN_CLASS_BEGIN");
        assert_eq!(vocabulary.run_class_end, "HTEST_RUN_CLASS_END");
        assert_eq!(vocabulary.header, "htest.h");
        assert_eq!(vocabulary.header_style, HeaderStyle::Include);
    }

    #[rstest]
    #[case(Profile::Htest)]
    #[case(Profile::Hunittest)]
    fn profiles_share_file_conventions(#[case] profile: Profile) {
        let vocabulary = profile.vocabulary();
        assert_eq!(vocabulary.extension, ".cpp");
        assert_eq!(vocabulary.output_dir, "generated");
        assert_eq!(vocabulary.output_prefix, "_");
    }

    #[rstest]
    fn overrides_replace_only_present_fields() {
        let overrides = VocabularyOverrides {
            suite_marker: Some("SUITE".to_owned()),
            header_style: Some(HeaderStyle::AppleImport),
            ..VocabularyOverrides::default()
        };
        let vocabulary = Profile::Htest.vocabulary().apply(&overrides);
        assert_eq!(vocabulary.suite_marker, "SUITE");
        assert_eq!(vocabulary.test_marker, "HTEST_FUNCTION");
        assert_eq!(vocabulary.header_style, HeaderStyle::AppleImport);
    }
}
