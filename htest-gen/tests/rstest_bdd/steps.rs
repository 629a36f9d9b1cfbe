//! Step definitions for the generator scenarios.

use std::time::Duration;

use htest_gen::vocabulary::Profile;
use htest_gen::{GenerateRequest, generate};
use rstest_bdd_macros::{given, then, when};
use test_helpers::sources::{HTEST, SourceTree};

use super::fixtures::GenerationState;

/// Error type for step definition failures.
pub type StepError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for step definition operations.
pub type StepResult<T> = Result<T, StepError>;

fn split_tests(tests: &str) -> Vec<&str> {
    tests
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

fn write_source(state: &GenerationState, file: &str, contents: &str) -> StepResult<()> {
    state
        .tree
        .with_ref(|tree| tree.write(file, contents))
        .ok_or("source directory should exist")?
        .map_err(|err| format!("{err:#}").into())
}

fn run_generator(state: &GenerationState) -> StepResult<()> {
    let request = state
        .tree
        .with_ref(|tree| GenerateRequest {
            source_dir: tree.root().to_path_buf(),
            namespace_override: None,
            vocabulary: Profile::Htest.vocabulary(),
        })
        .ok_or("source directory should exist")?;
    match generate(&request) {
        Ok(summary) => {
            state.failure.clear();
            state.summary.set(summary);
        }
        Err(err) => {
            state.summary.clear();
            state.failure.set(err.to_string());
        }
    }
    Ok(())
}

#[given("an empty source directory")]
fn empty_source_directory(generation_state: &GenerationState) -> StepResult<()> {
    generation_state.tree.set(SourceTree::new()?);
    Ok(())
}

#[given("a source {file} declaring suite {suite} with tests {tests}")]
fn declared_source(
    generation_state: &GenerationState,
    file: String,
    suite: String,
    tests: String,
) -> StepResult<()> {
    let text = HTEST.source(Some("hltypes"), Some(&suite), &split_tests(&tests));
    write_source(generation_state, &file, &text)
}

#[given("a source {file} without a suite declaration")]
fn source_without_suite(generation_state: &GenerationState, file: String) -> StepResult<()> {
    let text = HTEST.source(Some("hltypes"), None, &["orphan"]);
    write_source(generation_state, &file, &text)
}

#[when("the generator runs")]
fn generator_runs(generation_state: &GenerationState) -> StepResult<()> {
    run_generator(generation_state)?;
    let stamps = generation_state
        .tree
        .with_ref(|tree| -> anyhow::Result<Vec<_>> {
            let mut stamps = Vec::new();
            for name in tree.generated_files()? {
                let modified = tree.modified(&format!("generated/{name}"))?;
                stamps.push((name, modified));
            }
            Ok(stamps)
        })
        .ok_or("source directory should exist")?
        .map_err(|err| format!("{err:#}"))?;
    generation_state.first_write.set(stamps);
    Ok(())
}

#[when("the generator runs again")]
fn generator_runs_again(generation_state: &GenerationState) -> StepResult<()> {
    // Coarse filesystem timestamps must be able to show a rewrite.
    std::thread::sleep(Duration::from_millis(1100));
    run_generator(generation_state)
}

#[then("the run succeeds")]
fn run_succeeds(generation_state: &GenerationState) -> StepResult<()> {
    if let Some(message) = generation_state.failure.with_ref(Clone::clone) {
        return Err(format!("generation failed: {message}").into());
    }
    Ok(())
}

#[then("the run fails naming {file}")]
fn run_fails_naming(generation_state: &GenerationState, file: String) -> StepResult<()> {
    let message = generation_state
        .failure
        .with_ref(Clone::clone)
        .ok_or("generation should have failed")?;
    assert!(message.contains(&file), "error should name {file}: {message}");
    Ok(())
}

#[then("the companion {companion} registers {suite} with tests {tests}")]
fn companion_registers(
    generation_state: &GenerationState,
    companion: String,
    suite: String,
    tests: String,
) -> StepResult<()> {
    let content = generation_state
        .tree
        .with_ref(|tree| tree.read(&format!("generated/{companion}")))
        .ok_or("source directory should exist")?
        .map_err(|err| format!("{err:#}"))?;
    assert!(content.contains(&format!("HTEST_CLASS({suite})\n")));
    for test in split_tests(&tests) {
        assert!(content.contains(&format!("\tHTEST_FUNCTION({test});\n")));
        assert!(content.contains(&format!("\tHTEST_RUN_METHOD({suite}, {test})\n")));
    }
    Ok(())
}

#[then("the companion {companion} was not rewritten")]
fn companion_not_rewritten(generation_state: &GenerationState, companion: String) -> StepResult<()> {
    let before = generation_state
        .first_write
        .with_ref(|stamps| {
            stamps
                .iter()
                .find(|(name, _)| *name == companion)
                .map(|(_, modified)| *modified)
        })
        .flatten()
        .ok_or("companion should have been written by the first run")?;
    let after = generation_state
        .tree
        .with_ref(|tree| tree.modified(&format!("generated/{companion}")))
        .ok_or("source directory should exist")?
        .map_err(|err| format!("{err:#}"))?;
    assert_eq!(before, after, "{companion} should keep its modification time");
    let unchanged = generation_state
        .summary
        .with_ref(|summary| summary.unchanged.len())
        .ok_or("second run should have succeeded")?;
    assert_eq!(unchanged, 1);
    Ok(())
}

#[then("no companion files exist")]
fn no_companions(generation_state: &GenerationState) -> StepResult<()> {
    let files = generation_state
        .tree
        .with_ref(SourceTree::generated_files)
        .ok_or("source directory should exist")?
        .map_err(|err| format!("{err:#}"))?;
    assert!(files.is_empty(), "unexpected generated files: {files:?}");
    Ok(())
}
