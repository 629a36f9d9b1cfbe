//! Scratch source directories populated with sample C++ test files.
//!
//! # Examples
//!
//! ```
//! use htest_gen_test_helpers::sources::{HTEST, SourceTree};
//!
//! let tree = SourceTree::new().expect("create tree");
//! tree.write("Map.cpp", &HTEST.source(Some("hltypes"), Some("Map"), &["insert"]))
//!     .expect("write source");
//! assert!(tree.root().join("Map.cpp").is_file());
//! ```

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use cap_std::time::SystemTime;
use tempfile::TempDir;

/// Marker spellings used to build sample sources.
#[derive(Debug, Clone, Copy)]
pub struct SampleMarkers {
    /// Namespace marker, written as `#define <marker> <namespace>`.
    pub namespace_marker: &'static str,
    /// Suite marker, written as `<marker>(<suite>)`.
    pub suite_marker: &'static str,
    /// Test marker, written as `\t<marker>(<test>)` followed by a body.
    pub test_marker: &'static str,
    /// Framework header included by the sample.
    pub header: &'static str,
}

/// Markers of the `htest` framework.
pub const HTEST: SampleMarkers = SampleMarkers {
    namespace_marker: "__HTEST_LIB_NAME",
    suite_marker: "HTEST_CLASS",
    test_marker: "HTEST_FUNCTION",
    header: "htest.h",
};

/// Markers of the `hunittest` framework.
pub const HUNITTEST: SampleMarkers = SampleMarkers {
    namespace_marker: "__HL_UT_LIB_NAME",
    suite_marker: "HL_UT_TEST_CLASS",
    test_marker: "HL_UT_TEST_FUNCTION",
    header: "hunittest.h",
};

impl SampleMarkers {
    /// Builds a hand-written test source in the framework's style.
    ///
    /// Omitting `namespace` or `suite` leaves the corresponding marker out so
    /// failure paths can be exercised.
    #[must_use]
    pub fn source(&self, namespace: Option<&str>, suite: Option<&str>, tests: &[&str]) -> String {
        let mut text = String::new();
        if let Some(name) = namespace {
            text.push_str(&format!("#define {} {name}\n", self.namespace_marker));
        }
        text.push_str(&format!("#include \"{}\"\n\n", self.header));
        if let Some(name) = suite {
            text.push_str(&format!("{}({name})\n{{\n", self.suite_marker));
        }
        for test in tests {
            text.push_str(&format!(
                "\t{}({test})\n\t{{\n\t\t// body\n\t}}\n\n",
                self.test_marker
            ));
        }
        if suite.is_some() {
            text.push_str("}\n");
        }
        text
    }
}

/// A temporary source directory removed on drop.
#[derive(Debug)]
pub struct SourceTree {
    _tempdir: TempDir,
    root: Utf8PathBuf,
    dir: Dir,
}

impl SourceTree {
    /// Creates an empty source directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created, opened,
    /// or has a non-UTF-8 path.
    pub fn new() -> Result<Self> {
        let tempdir = tempfile::tempdir().context("create temp dir")?;
        let root = Utf8PathBuf::from_path_buf(tempdir.path().to_path_buf())
            .map_err(|path| anyhow::anyhow!("non-UTF-8 temp path: {}", path.display()))?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority()).context("open temp dir")?;
        Ok(Self {
            _tempdir: tempdir,
            root,
            dir,
        })
    }

    /// Path of the source directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Path of the default `generated` output directory.
    #[must_use]
    pub fn generated_dir(&self) -> Utf8PathBuf {
        self.root.join("generated")
    }

    /// Writes a file relative to the source directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, name: &str, contents: &str) -> Result<()> {
        self.dir
            .write(name, contents)
            .with_context(|| format!("write {name}"))
    }

    /// Reads a file relative to the source directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(&self, name: &str) -> Result<String> {
        self.dir
            .read_to_string(name)
            .with_context(|| format!("read {name}"))
    }

    /// Returns the modification time of a file relative to the source
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file metadata cannot be read.
    pub fn modified(&self, name: &str) -> Result<SystemTime> {
        self.dir
            .metadata(name)
            .and_then(|meta| meta.modified())
            .with_context(|| format!("stat {name}"))
    }

    /// Lists the file names inside `generated/`, sorted. A missing directory
    /// yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be listed.
    pub fn generated_files(&self) -> Result<Vec<String>> {
        if !self.dir.is_dir("generated") {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in self.dir.read_dir("generated").context("list generated")? {
            names.push(entry.context("read entry")?.file_name().context("entry name")?);
        }
        names.sort();
        Ok(names)
    }
}
