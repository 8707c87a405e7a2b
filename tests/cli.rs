//! Command line behaviour of the relgit binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const RELGIT_ENV: &[&str] = &[
    "RELGIT_CONFIG",
    "RELGIT_REPO_URL",
    "RELGIT_GIT_HTTP_USERNAME",
    "RELGIT_GIT_HTTP_PASSWORD",
    "RELGIT_REPO_PATH",
    "RELGIT_BRANCH",
    "RELGIT_RELEASE_PATH",
    "RELGIT_REPO_TREE",
    "RELGIT_GIT_SSH",
    "RELGIT_EXPORT",
];

fn relgit(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("relgit").unwrap();
    cmd.current_dir(dir.path()).arg("--no-color");
    for var in RELGIT_ENV {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    relgit(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("revision"))
        .stdout(predicate::str::contains("mirror"));
}

#[test]
fn test_init_writes_template_once() {
    let dir = TempDir::new().unwrap();
    relgit(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("relgit.yaml"));

    let written = fs::read_to_string(dir.path().join("relgit.yaml")).unwrap();
    assert!(written.contains("repo_url:"));

    relgit(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_missing_configuration_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    relgit(&dir)
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--repo-url"));
}

#[test]
fn test_invalid_reference_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    relgit(&dir)
        .args(["revision", "--repo-url", "url", "--repo-path", "m", "--release-path", "r"])
        .args(["--branch", "bad..ref"])
        .assert()
        .code(2);
}

#[test]
fn test_credentials_on_ssh_url_are_rejected() {
    let dir = TempDir::new().unwrap();
    relgit(&dir)
        .args(["check", "--repo-url", "git@example.com:repo.git"])
        .args(["--repo-path", "m", "--release-path", "r"])
        .args(["--git-http-username", "hello"])
        .env("RELGIT_GIT_HTTP_PASSWORD", "topsecret")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("topsecret").not());
}

#[test]
fn test_revision_needs_an_existing_mirror() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("relgit.yaml"),
        "repo_url: url\nrepo_path: mirror\nrelease_path: release\n",
    )
    .unwrap();

    relgit(&dir)
        .arg("revision")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Mirror not found"));
}

#[test]
#[ignore = "needs git and rsync on PATH"]
fn test_deploy_json_report() {
    for tool in ["git", "rsync"] {
        let found = std::process::Command::new(tool)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        assert!(found, "`{tool}` is not available; this test needs it on PATH");
    }

    let dir = TempDir::new().unwrap();
    let origin = dir.path().join("origin");
    fs::create_dir_all(&origin).unwrap();
    let git = |args: &[&str]| {
        let status = std::process::Command::new("git")
            .args(["-c", "user.name=relgit", "-c", "user.email=relgit@example.com"])
            .args(["-c", "commit.gpgsign=false"])
            .args(args)
            .current_dir(&origin)
            .status()
            .unwrap();
        assert!(status.success());
    };
    git(&["init", "--quiet"]);
    git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
    fs::write(origin.join("README.md"), "hello\n").unwrap();
    git(&["add", "-A"]);
    git(&["commit", "--quiet", "-m", "first"]);

    let output = relgit(&dir)
        .args(["deploy", "--json", "--branch", "main"])
        .args(["--repo-url", &origin.to_string_lossy()])
        .args(["--repo-path", "mirror", "--release-path", "release"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mirror_action"], "cloned");
    assert_eq!(report["resolved"]["classification"], "branch");
    assert_eq!(report["resolved"]["tracking_name"], "origin/main");
    assert!(dir.path().join("release/README.md").exists());
}
