//! Binds the generator feature files to the step registry.

use super::fixtures::{GenerationState, generation_state};
use rstest_bdd_macros::scenario;

#[scenario(path = "tests/features/generate.feature")]
fn declared_suite_produces_companion(generation_state: GenerationState) {
    let _ = generation_state;
}

#[scenario(path = "tests/features/rerun.feature")]
fn unchanged_source_is_not_rewritten(generation_state: GenerationState) {
    let _ = generation_state;
}

#[scenario(path = "tests/features/missing_suite.feature")]
fn missing_suite_aborts_run(generation_state: GenerationState) {
    let _ = generation_state;
}
