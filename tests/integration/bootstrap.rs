//! Full bootstrap runs against local git fixtures.

use super::common::{TestGit, TestProject, head_of};
use serde_json::json;
use std::fs;

#[test]
fn test_sync_clones_and_reports_success() {
    let project = TestProject::new().unwrap();
    let source = project.create_source_repo("glfw").unwrap();
    project
        .write_manifest(&json!([{ "name": "glfw", "url": source.url() }]).to_string())
        .unwrap();

    let output = project.run_sync().unwrap();
    output.assert_success();

    let checkout = project.checkout_path("glfw");
    assert!(checkout.join(".git").exists());
    assert!(checkout.join("README.md").exists());
    assert!(output.stdout.contains("1 dependencies synchronized"));
}

#[test]
fn test_sync_is_idempotent() {
    let project = TestProject::new().unwrap();
    let source = project.create_source_repo("dep").unwrap();
    source.git.tag("v1.0.0").unwrap();
    project
        .write_manifest(
            &json!([{ "name": "dep", "url": source.url(), "revision": "v1.0.0" }]).to_string(),
        )
        .unwrap();

    project.run_sync().unwrap().assert_success();
    let head_after_first = head_of(&project.checkout_path("dep"));

    // No intervening external change: the second run must succeed and
    // leave the working copy exactly where the first did
    project.run_sync().unwrap().assert_success();
    assert_eq!(head_of(&project.checkout_path("dep")), head_after_first);
}

#[test]
fn test_sync_recovers_from_partial_state() {
    let project = TestProject::new().unwrap();
    let source = project.create_source_repo("dep").unwrap();
    project
        .write_manifest(&json!([{ "name": "dep", "url": source.url() }]).to_string())
        .unwrap();

    // A directory without git metadata, as an interrupted clone leaves behind
    let checkout = project.checkout_path("dep");
    fs::create_dir_all(&checkout).unwrap();
    fs::write(checkout.join("partial.bin"), "half-written").unwrap();

    project.run_sync().unwrap().assert_success();

    assert!(checkout.join(".git").exists());
    assert!(!checkout.join("partial.bin").exists());
    assert_eq!(head_of(&checkout), source.git.head().unwrap());
}

#[test]
fn test_sync_enforces_pin_over_diverged_checkout() {
    let project = TestProject::new().unwrap();
    let source = project.create_source_repo("dep").unwrap();
    let pinned = source.git.head().unwrap();
    source.git.tag("v1.0.0").unwrap();
    source
        .add_file("later.txt", "later", "commit after the pin")
        .unwrap();
    project
        .write_manifest(
            &json!([{ "name": "dep", "url": source.url(), "revision": "v1.0.0" }]).to_string(),
        )
        .unwrap();

    project.run_sync().unwrap().assert_success();
    let checkout = project.checkout_path("dep");
    assert_eq!(head_of(&checkout), pinned);

    // Diverge the working copy with a local commit, then re-sync
    let local = TestGit::new(&checkout);
    local.config_user().unwrap();
    fs::write(checkout.join("local.txt"), "local work").unwrap();
    local.commit_all("local divergence").unwrap();
    assert_ne!(head_of(&checkout), pinned);

    project.run_sync().unwrap().assert_success();
    assert_eq!(head_of(&checkout), pinned);
    assert!(!checkout.join("local.txt").exists());
    assert!(!checkout.join("later.txt").exists());
}

#[test]
fn test_sync_removes_contamination() {
    let project = TestProject::new().unwrap();
    let source = project.create_source_repo("dep").unwrap();
    source
        .add_file(".gitignore", "*.o\n", "ignore build output")
        .unwrap();
    project
        .write_manifest(&json!([{ "name": "dep", "url": source.url() }]).to_string())
        .unwrap();

    project.run_sync().unwrap().assert_success();

    // Contaminate: an untracked file and an ignored build artifact
    let checkout = project.checkout_path("dep");
    fs::write(checkout.join("stray.txt"), "untracked").unwrap();
    fs::write(checkout.join("build.o"), "ignored").unwrap();

    project.run_sync().unwrap().assert_success();

    assert!(!checkout.join("stray.txt").exists());
    assert!(!checkout.join("build.o").exists());
    assert!(checkout.join("README.md").exists());
}

#[test]
fn test_sync_unpinned_follows_remote_tip() {
    let project = TestProject::new().unwrap();
    let source = project.create_source_repo("dep").unwrap();
    project
        .write_manifest(&json!([{ "name": "dep", "url": source.url() }]).to_string())
        .unwrap();

    project.run_sync().unwrap().assert_success();
    let checkout = project.checkout_path("dep");
    assert_eq!(head_of(&checkout), source.git.head().unwrap());

    // The remote moves; an unpinned dependency must follow
    source.add_file("new.txt", "new", "advance tip").unwrap();
    project.run_sync().unwrap().assert_success();

    assert_eq!(head_of(&checkout), source.git.head().unwrap());
    assert!(checkout.join("new.txt").exists());
}

#[test]
fn test_sync_fails_fast_in_manifest_order() {
    let project = TestProject::new().unwrap();
    let first = project.create_source_repo("first").unwrap();
    let third = project.create_source_repo("third").unwrap();
    project
        .write_manifest(
            &json!([
                { "name": "first", "url": first.url() },
                { "name": "second", "url": "/no/such/repository" },
                { "name": "third", "url": third.url() }
            ])
            .to_string(),
        )
        .unwrap();

    let output = project.run_sync().unwrap();
    output.assert_failure();
    assert_eq!(output.code, Some(1));
    output.assert_stderr_contains("second");

    // The first dependency was synchronized before the failure; the third
    // was never attempted
    assert!(project.checkout_path("first").join(".git").exists());
    assert!(!project.checkout_path("third").exists());
}

#[test]
fn test_sync_unknown_revision_fails_with_context() {
    let project = TestProject::new().unwrap();
    let source = project.create_source_repo("dep").unwrap();
    project
        .write_manifest(
            &json!([{ "name": "dep", "url": source.url(), "revision": "v9.9.9" }]).to_string(),
        )
        .unwrap();

    let output = project.run_sync().unwrap();
    output.assert_failure();
    output.assert_stderr_contains("v9.9.9");
    output.assert_stderr_contains("dep");
}

#[test]
fn test_sync_multiple_dependencies_in_order() {
    let project = TestProject::new().unwrap();
    let a = project.create_source_repo("alpha").unwrap();
    let b = project.create_source_repo("beta").unwrap();
    b.git.tag("v2.0.0").unwrap();
    project
        .write_manifest(
            &json!([
                { "name": "alpha", "url": a.url() },
                { "name": "beta", "url": b.url(), "revision": "v2.0.0" }
            ])
            .to_string(),
        )
        .unwrap();

    let output = project.run_sync().unwrap();
    output.assert_success();
    assert!(output.stdout.contains("2 dependencies synchronized"));
    assert!(project.checkout_path("alpha").join(".git").exists());
    assert!(project.checkout_path("beta").join(".git").exists());
}
