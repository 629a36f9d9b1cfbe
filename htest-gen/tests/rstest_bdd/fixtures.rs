//! Shared scenario state for the generator behaviour tests.

use cap_std::time::SystemTime;
use htest_gen::RunSummary;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use test_helpers::sources::SourceTree;

/// State threaded between the steps of a generator scenario.
#[derive(Debug, Default, ScenarioState)]
pub struct GenerationState {
    pub tree: Slot<SourceTree>,
    pub summary: Slot<RunSummary>,
    pub failure: Slot<String>,
    pub first_write: Slot<Vec<(String, SystemTime)>>,
}

/// Creates a clean state for each scenario.
#[fixture]
pub fn generation_state() -> GenerationState {
    GenerationState::default()
}
