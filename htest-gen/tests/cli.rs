//! Runs the compiled `htest-gen` binary against scratch source trees.

use assert_cmd::Command;
use rstest::{fixture, rstest};
use test_helpers::sources::{HTEST, SourceTree};

#[fixture]
fn tree() -> SourceTree {
    SourceTree::new().expect("create source tree")
}

/// Builds a command isolated from the caller's configuration, running inside
/// `tree` so no stray `htest-gen.toml` is picked up.
fn htest_gen(tree: &SourceTree) -> Command {
    #[expect(
        deprecated,
        reason = "cargo_bin is the standard assert_cmd API and test panics are acceptable"
    )]
    let mut cmd = Command::cargo_bin("htest-gen").expect("binary should exist");
    cmd.current_dir(tree.root());
    for key in [
        "HTEST_GEN_PROFILE",
        "HTEST_GEN_SOURCE_DIR",
        "HTEST_GEN_LIB_NAME",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd.env("RUST_BACKTRACE", "0");
    cmd.env("RUST_LIB_BACKTRACE", "0");
    cmd
}

#[rstest]
fn generates_companions_and_exits_zero(tree: SourceTree) {
    tree.write("Map.cpp", &HTEST.source(None, Some("Map"), &["insert"]))
        .expect("write source");

    htest_gen(&tree)
        .args(["hltypes", tree.root().as_str()])
        .assert()
        .success();

    let content = tree.read("generated/_Map.cpp").expect("read companion");
    assert!(content.starts_with("#define __HTEST_LIB_NAME hltypes\n"));
}

#[rstest]
fn marker_failure_names_file_and_exits_non_zero(tree: SourceTree) {
    tree.write("Broken.cpp", &HTEST.source(Some("lib"), None, &[]))
        .expect("write source");

    let output = htest_gen(&tree)
        .args(["lib", tree.root().as_str()])
        .output()
        .expect("command should execute");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Broken.cpp"), "stderr: {stderr}");
    assert!(tree.generated_files().expect("list generated").is_empty());
}

#[rstest]
fn missing_source_directory_fails(tree: SourceTree) {
    let missing = tree.root().join("absent");
    let output = htest_gen(&tree)
        .args(["lib", missing.as_str()])
        .output()
        .expect("command should execute");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("absent"), "stderr: {stderr}");
}

#[rstest]
fn extra_positional_is_a_usage_error(tree: SourceTree) {
    htest_gen(&tree)
        .args(["lib", "dir", "surplus"])
        .assert()
        .failure()
        .code(2);
}

#[rstest]
fn config_file_selects_profile(tree: SourceTree) {
    tree.write(
        "htest-gen.toml",
        &format!("profile = \"hunittest\"\nsource_dir = \"{}\"\n", tree.root()),
    )
    .expect("write config");
    tree.write(
        "Mutex.cpp",
        "#define __HL_UT_LIB_NAME hltypes\nHL_UT_TEST_CLASS(Mutex)\n{\n\tHL_UT_TEST_FUNCTION(lock)\n}\n",
    )
    .expect("write source");

    htest_gen(&tree).assert().success();

    let content = tree.read("generated/_Mutex.cpp").expect("read companion");
    assert!(content.contains("\tHL_UT_RUN_METHOD(Mutex, lock)\n"));
}

#[rstest]
fn missing_explicit_config_fails(tree: SourceTree) {
    htest_gen(&tree)
        .args(["--config", "nowhere.toml"])
        .assert()
        .failure();
}
