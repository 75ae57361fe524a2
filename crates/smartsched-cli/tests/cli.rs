//! End-to-end tests for the `ssched` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn ssched() -> Command {
    let mut cmd = Command::cargo_bin("ssched").expect("binary built");
    cmd.env_remove("SSCHED_LOG").env_remove("DEBUG");
    cmd
}

fn generate_into(dir: &Path) {
    ssched()
        .current_dir(dir)
        .args(["generate", "--out", "data"])
        .assert()
        .success();
}

fn analyze_json(dir: &Path, extra: &[&str]) -> serde_json::Value {
    let output = ssched()
        .current_dir(dir)
        .arg("analyze")
        .args(extra)
        .arg("--json")
        .output()
        .expect("run ssched");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn generate_writes_every_dataset() {
    let dir = tempfile::tempdir().expect("tempdir");
    ssched()
        .current_dir(dir.path())
        .args(["generate", "--out", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 10 datasets"));

    for name in [
        "small_1", "small_2", "small_3", "medium_1", "medium_2", "medium_3", "large_1", "large_2",
        "large_3", "tasks",
    ] {
        assert!(
            dir.path().join("data").join(format!("{name}.json")).exists(),
            "{name}.json missing"
        );
    }
}

#[test]
fn analyze_cyclic_tasks_degrades() {
    let dir = tempfile::tempdir().expect("tempdir");
    generate_into(dir.path());

    ssched()
        .current_dir(dir.path())
        .args(["analyze", "data/tasks.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Strongly connected components (6)"))
        .stdout(predicate::str::contains("(cycle)"))
        .stdout(predicate::str::contains("skipped:"));
}

#[test]
fn analyze_chain_json_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    generate_into(dir.path());

    let report = analyze_json(dir.path(), &["data/small_1.json"]);
    assert_eq!(report["vertex_count"], 6);
    assert_eq!(report["options"]["source"], 0);
    assert_eq!(report["critical_path"]["status"], "computed");
    assert_eq!(report["critical_path"]["length"], 15);
    assert_eq!(
        report["critical_path"]["path"],
        serde_json::json!([0, 1, 2, 3, 4, 5])
    );
    assert_eq!(
        report["shortest_paths"]["distances"],
        serde_json::json!([0, 3, 5, 9, 10, 15])
    );
}

#[test]
fn analyze_flags_override_config() {
    let dir = tempfile::tempdir().expect("tempdir");
    generate_into(dir.path());
    fs::write(
        dir.path().join("ssched.toml"),
        "[analysis]\ncondensation_weight = \"sum\"\ncritical_path = \"single-pass\"\n",
    )
    .expect("write config");

    let report = analyze_json(dir.path(), &["data/small_2.json"]);
    assert_eq!(report["options"]["condensation_weight"], "sum");
    assert_eq!(report["options"]["critical_path"], "single-pass");

    let report = analyze_json(
        dir.path(),
        &["data/small_2.json", "--condensation-weight", "max", "--source", "3"],
    );
    assert_eq!(report["options"]["condensation_weight"], "max");
    assert_eq!(report["options"]["source"], 3);
}

#[test]
fn missing_dataset_fails_with_context() {
    let dir = tempfile::tempdir().expect("tempdir");
    ssched()
        .current_dir(dir.path())
        .args(["analyze", "absent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load dataset absent.json"));
}

#[test]
fn json_errors_are_structured() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = ssched()
        .current_dir(dir.path())
        .args(["analyze", "absent.json", "--json"])
        .output()
        .expect("run ssched");
    assert!(!output.status.success());
    let err: serde_json::Value = serde_json::from_slice(&output.stderr).expect("json error");
    assert!(
        err["error"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("absent.json"))
    );
}

#[test]
fn invalid_edges_are_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("bad.json"),
        r#"{"n": 2, "edges": [{"u": 0, "v": 5, "w": 1}]}"#,
    )
    .expect("write");

    ssched()
        .current_dir(dir.path())
        .args(["analyze", "bad.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid edges"));
}

#[test]
fn dot_renders_condensation() {
    let dir = tempfile::tempdir().expect("tempdir");
    generate_into(dir.path());

    ssched()
        .current_dir(dir.path())
        .args(["dot", "data/tasks.json", "--condensed"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph {"))
        .stdout(predicate::str::contains("label = \"1\""));
}
