//! Test helpers shared across crates in the `htest-gen` workspace.
//!
//! [`sources`] builds scratch source directories filled with sample
//! marker-annotated C++ files.

pub mod sources;
