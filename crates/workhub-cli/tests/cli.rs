use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::{contains, starts_with};
use tempfile::TempDir;

fn workhub(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("workhub"));
    cmd.env("WORKHUB_DIR", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env_remove("WORKHUB_DB_PATH")
        .env_remove("WORKHUB_PASSWORD");
    cmd
}

fn login(dir: &TempDir, username: &str, password: &str) {
    workhub(dir)
        .args(["login", username, "--password", password])
        .assert()
        .success();
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    workhub(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("WorkHub"));
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    workhub(&dir).arg("--version").assert().success();
}

#[test]
fn test_cli_completions() {
    let dir = TempDir::new().unwrap();
    workhub(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(starts_with("_workhub"));
}

#[test]
fn test_whoami_requires_login() {
    let dir = TempDir::new().unwrap();
    workhub(&dir)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(contains("Not signed in"));
}

#[test]
fn test_bad_password_is_rejected() {
    let dir = TempDir::new().unwrap();
    workhub(&dir)
        .args(["login", "viewer", "--password", "wrongpass"])
        .assert()
        .failure()
        .stderr(contains("Invalid username or password"));
}

#[test]
fn test_session_persists_between_commands() {
    let dir = TempDir::new().unwrap();
    login(&dir, "qa-manager", "qa123");

    workhub(&dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("qa-manager"))
        .stdout(contains("editor"));

    workhub(&dir)
        .args(["workspace", "list"])
        .assert()
        .success()
        .stdout(contains("Quality Assurance"))
        .stdout(contains("Documentation"))
        .stdout(contains("Development").not());

    workhub(&dir).arg("logout").assert().success();
    workhub(&dir).arg("whoami").assert().failure();
}

#[test]
fn test_admin_lists_all_workspaces_as_json() {
    let dir = TempDir::new().unwrap();
    login(&dir, "admin", "admin123");

    let output = workhub(&dir)
        .args(["workspace", "list", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let workspaces: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(workspaces.as_array().unwrap().len(), 7);
}

#[test]
fn test_upload_persists_metadata_but_not_content() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("plan.txt");
    std::fs::write(&source, "milestones").unwrap();
    login(&dir, "dev-lead", "dev123");

    workhub(&dir)
        .args(["file", "upload", "planning", source.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Uploaded plan.txt"));

    let output = workhub(&dir)
        .args(["file", "list", "planning", "--format", "json"])
        .output()
        .unwrap();
    let files: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(files[0]["name"], "plan.txt");
    assert_eq!(files[0]["mime_type"], "text/plain");
    let file_id = files[0]["id"].as_str().unwrap().to_string();

    workhub(&dir)
        .args(["file", "download", "planning", &file_id])
        .assert()
        .failure()
        .stderr(contains("no longer available"));
}

#[test]
fn test_viewer_cannot_upload() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("a.txt");
    std::fs::write(&source, "a").unwrap();
    login(&dir, "viewer", "view123");

    workhub(&dir)
        .args(["file", "upload", "dev", source.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("Permission denied"));
}

#[test]
fn test_admin_workspace_lifecycle() {
    let dir = TempDir::new().unwrap();
    login(&dir, "admin", "admin123");

    workhub(&dir)
        .args([
            "workspace",
            "add",
            "Release Notes",
            "--title",
            "Release Notes",
            "--description",
            "Changelogs",
            "--color",
            "teal",
            "--grant",
            "1,3",
        ])
        .assert()
        .success()
        .stdout(contains("release-notes"));

    workhub(&dir)
        .args(["workspace", "access", "release-notes"])
        .assert()
        .success()
        .stdout(contains("qa-manager"));

    workhub(&dir)
        .args(["workspace", "delete", "qa"])
        .assert()
        .success();

    workhub(&dir)
        .args(["admin", "activity", "--search", "workspace delete"])
        .assert()
        .success()
        .stdout(contains("Quality Assurance"));

    login(&dir, "qa-manager", "qa123");
    workhub(&dir)
        .args(["workspace", "list"])
        .assert()
        .success()
        .stdout(contains("Release Notes"))
        .stdout(contains("Quality Assurance").not());
}

#[test]
fn test_admin_commands_require_admin() {
    let dir = TempDir::new().unwrap();
    login(&dir, "reviewer", "review123");

    workhub(&dir)
        .args(["admin", "users"])
        .assert()
        .failure()
        .stderr(contains("not an admin"));

    login(&dir, "admin", "admin123");
    workhub(&dir)
        .args(["admin", "users"])
        .assert()
        .success()
        .stdout(contains("Total users:    7"));
}

#[test]
fn test_file_list_shows_kind() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("archive.bin");
    std::fs::write(&source, [0u8, 1, 2]).unwrap();
    login(&dir, "dev-lead", "dev123");

    workhub(&dir)
        .args(["file", "upload", "planning", source.to_str().unwrap()])
        .assert()
        .success();

    workhub(&dir)
        .args(["file", "list", "planning"])
        .assert()
        .success()
        .stdout(contains("Kind"))
        .stdout(contains("other"));
}
