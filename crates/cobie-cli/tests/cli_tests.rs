//! End-to-end tests for the `cobie-bundle` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cobie_bundle(project: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cobie-bundle").unwrap();
    cmd.current_dir(project.path())
        .env_remove("RUST_LOG")
        .env_remove("COBIE_OUT_DIR")
        .env_remove("COBIE_GLOBAL_NAME")
        .env("NO_COLOR", "1");
    cmd
}

fn interop_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let interop = dir.path().join("Interop");
    fs::create_dir(&interop).unwrap();
    fs::write(
        interop.join("JS.fs.js"),
        "export function greet() {\n    return \"hi\";\n}\n",
    )
    .unwrap();
    dir
}

#[test]
fn build_without_arguments_writes_both_artifacts() {
    let project = interop_project();

    cobie_bundle(&project)
        .assert()
        .success()
        .stderr(predicate::str::contains("cobie-coach.min.js"))
        .stderr(predicate::str::is_match(r"Build completed: [\d.]+ [KM]?B in ").unwrap());

    let out = project.path().join("fable_build");
    for name in ["cobie-coach.min.js", "cobie-coach.js"] {
        let code = fs::read_to_string(out.join(name)).unwrap();
        assert!(code.contains("COBieCoach"), "{name} should bind COBieCoach");
        assert!(code.contains("greet"));
    }
}

#[test]
fn flags_override_defaults() {
    let project = interop_project();

    cobie_bundle(&project)
        .args(["build", "--out-dir", "dist", "--package-name", "coach"])
        .args(["--global-name", "Coach"])
        .assert()
        .success();

    let code = fs::read_to_string(project.path().join("dist/coach.js")).unwrap();
    assert!(code.contains("Coach"));
    assert!(project.path().join("dist/coach.min.js").is_file());
    assert!(!project.path().join("fable_build").exists());
}

#[test]
fn config_file_is_discovered() {
    let project = interop_project();
    fs::write(project.path().join("cobie.toml"), "out_dir = \"web\"\n").unwrap();

    cobie_bundle(&project).arg("build").assert().success();

    assert!(project.path().join("web/cobie-coach.min.js").is_file());
}

#[test]
fn missing_entry_fails_and_writes_nothing() {
    let project = TempDir::new().unwrap();

    cobie_bundle(&project)
        .assert()
        .failure()
        .stderr(predicate::str::contains("JS.fs.js"));

    assert!(!project.path().join("fable_build").exists());
}

#[test]
fn invalid_global_name_is_rejected() {
    let project = interop_project();

    cobie_bundle(&project)
        .args(["--global-name", "cobie-coach"])
        .assert()
        .failure();

    assert!(!project.path().join("fable_build").exists());
}

#[test]
fn plan_prints_jobs_without_building() {
    let project = interop_project();

    let output = cobie_bundle(&project).arg("plan").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();

    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let jobs = plan.as_array().unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0]["label"], "minified");
    assert_eq!(jobs[0]["job"]["minify"], true);
    assert_eq!(jobs[0]["job"]["globalName"], "COBieCoach");
    assert_eq!(jobs[1]["label"], "debug");
    assert_eq!(jobs[1]["job"]["outfile"], "fable_build/cobie-coach.js");
    assert_eq!(jobs[1]["job"]["target"], "es2022");

    assert!(!project.path().join("fable_build").exists());
}

#[test]
fn explicit_missing_config_fails() {
    let project = interop_project();

    cobie_bundle(&project)
        .args(["plan", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.toml"));
}
