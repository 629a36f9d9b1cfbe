//! Error types for `htest-gen`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `htest-gen` pipeline.
///
/// Every variant is fatal: the run stops at the first failure so a missing
/// generated file can never silently break a downstream compile.
#[derive(Debug, Error)]
pub enum GenError {
    /// The source directory is missing or is not a directory.
    #[error("source directory {path} does not exist or is not a directory")]
    DirectoryNotFound {
        /// Directory that was requested.
        path: Utf8PathBuf,
    },

    /// No namespace override was given and the file declares none.
    #[error("no namespace defined for {file}; pass LIB_NAME or declare {marker}")]
    MissingNamespace {
        /// Name of the offending source file.
        file: String,
        /// Namespace marker that was searched for.
        marker: String,
    },

    /// The file never declares a test class.
    #[error("no {marker} defined in {file}")]
    MissingSuiteDeclaration {
        /// Name of the offending source file.
        file: String,
        /// Suite marker that was searched for.
        marker: String,
    },

    /// The suite marker is present but names nothing.
    #[error("{marker} in {file} does not name a test class")]
    BlankSuiteName {
        /// Name of the offending source file.
        file: String,
        /// Suite marker whose argument was empty.
        marker: String,
    },

    /// An explicitly requested configuration file is missing.
    #[error("configuration file {path} not found")]
    ConfigNotFound {
        /// Path passed via `--config`.
        path: Utf8PathBuf,
    },

    /// Layered configuration failed to deserialize.
    #[error("invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Reading or writing the filesystem failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    pub(crate) fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<figment::Error> for GenError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
