use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pipesync() -> Command {
    let mut cmd = Command::cargo_bin("pipesync").expect("binary");
    cmd.env_remove("PIPESYNC_URL")
        .env_remove("PIPESYNC_USER")
        .env_remove("PIPESYNC_API_TOKEN");
    cmd
}

#[test]
fn sync_on_empty_tree_is_a_noop_without_a_server() {
    let root = TempDir::new().unwrap();

    pipesync()
        .arg("sync")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no changes"));

    assert!(
        !root.path().join("pipesync.json").exists(),
        "no-op sync must not write state"
    );
}

#[test]
fn sync_without_url_fails_once_changes_exist() {
    let root = TempDir::new().unwrap();
    std::fs::write(root.path().join("build.Jenkinsfile"), "node { }").unwrap();

    pipesync()
        .arg("sync")
        .arg(root.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--url"));

    assert!(
        !root.path().join("pipesync.json").exists(),
        "failed sync must not write state"
    );
}

#[test]
fn dry_run_prints_plan_and_writes_no_state() {
    let root = TempDir::new().unwrap();
    std::fs::create_dir_all(root.path().join("ci")).unwrap();
    std::fs::write(root.path().join("ci/deploy.Jenkinsfile"), "node { }").unwrap();

    pipesync()
        .arg("sync")
        .arg(root.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[dry-run]")
                .and(predicate::str::contains("ci/deploy.Jenkinsfile")),
        );

    assert!(!root.path().join("pipesync.json").exists());
}

#[test]
fn diff_lists_new_files_as_changed_json() {
    let root = TempDir::new().unwrap();
    std::fs::write(root.path().join("build.Jenkinsfile"), "node { }").unwrap();

    pipesync()
        .arg("diff")
        .arg(root.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"changed\"")
                .and(predicate::str::contains("build.Jenkinsfile")),
        );
}

#[test]
fn corrupt_state_file_is_a_hard_error() {
    let root = TempDir::new().unwrap();
    std::fs::write(root.path().join("pipesync.json"), "{ not json").unwrap();

    pipesync()
        .arg("diff")
        .arg(root.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse"));
}
