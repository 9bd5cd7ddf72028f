//! Manifest loading failures and the validate command.

use super::common::TestProject;
use serde_json::json;

#[test]
fn test_missing_manifest_is_fatal() {
    let project = TestProject::new().unwrap();

    let output = project.run_sync().unwrap();
    output.assert_failure();
    assert_eq!(output.code, Some(1));
    output.assert_stderr_contains("dependencies.json");
}

#[test]
fn test_malformed_manifest_halts_before_any_sync() {
    let project = TestProject::new().unwrap();
    project.write_manifest("{ not valid json ]").unwrap();

    let output = project.run_sync().unwrap();
    output.assert_failure();
    output.assert_stderr_contains("dependencies.json");

    // No synchronization was attempted
    assert!(!project.root_path().exists());
}

#[test]
fn test_duplicate_names_rejected() {
    let project = TestProject::new().unwrap();
    project
        .write_manifest(
            &json!([
                { "name": "dup", "url": "u1" },
                { "name": "dup", "url": "u2" }
            ])
            .to_string(),
        )
        .unwrap();

    let output = project.run_sync().unwrap();
    output.assert_failure();
    output.assert_stderr_contains("duplicate");
    assert!(!project.root_path().exists());
}

#[test]
fn test_validate_accepts_good_manifest() {
    let project = TestProject::new().unwrap();
    project
        .write_manifest(
            &json!([
                { "name": "glfw", "url": "https://github.com/glfw/glfw.git", "revision": "3.3.8" },
                { "name": "glm", "url": "https://github.com/g-truc/glm.git" }
            ])
            .to_string(),
        )
        .unwrap();

    let output = project
        .run_depsync(&["validate", "--manifest-path", "dependencies.json"])
        .unwrap();
    output.assert_success();
    assert!(output.stdout.contains("glfw"));
    assert!(output.stdout.contains("3.3.8"));
    assert!(output.stdout.contains("default branch"));
    assert!(output.stdout.contains("2 dependencies"));

    // validate never touches the sync root
    assert!(!project.root_path().exists());
}

#[test]
fn test_validate_rejects_unknown_fields() {
    let project = TestProject::new().unwrap();
    project
        .write_manifest(
            &json!([{ "name": "x", "url": "u", "branch": "main" }]).to_string(),
        )
        .unwrap();

    let output = project
        .run_depsync(&["validate", "--manifest-path", "dependencies.json"])
        .unwrap();
    output.assert_failure();
    output.assert_stderr_contains("branch");
}
