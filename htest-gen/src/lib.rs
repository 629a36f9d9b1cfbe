//! Library interface for `htest-gen`.
//!
//! Scans hand-written C++ unit-test sources for namespace, test-class, and
//! test-function markers and emits companion sources that register every
//! discovered test with the framework's run macros. Generated files are only
//! rewritten when their content changes, so downstream builds stay quiet.

pub mod config;
pub mod error;
pub mod generate;
pub mod locate;
mod lossy;
pub mod render;
pub mod scan;
pub mod vocabulary;
pub mod writer;

pub use error::GenError;
pub use generate::{GenerateRequest, RunSummary, generate};
