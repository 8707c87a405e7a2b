//! Release export commands against a scripted runner.

mod common;

use pretty_assertions::assert_eq;

use common::mock_services::RecordingRunner;
use common::test_helpers::strategy;
use relgit::domain::entities::{DeployConfig, ExportMode};
use relgit::infrastructure::scm::{ScmError, ScmStrategy};

fn app_config() -> DeployConfig {
    DeployConfig::new("url", "/m", "/r").with_repo_tree("app")
}

#[tokio::test]
async fn test_subtree_is_copied_with_trailing_slash() {
    let runner = RecordingRunner::new();
    runner.answer_test("test -d /m/app", true);

    strategy(&app_config(), &runner).release().await.unwrap();

    assert_eq!(
        runner.lines(),
        vec![
            "test -d /m/app",
            "rsync -ar --copy-links --exclude=.git* /m/app/ /r",
        ]
    );
}

#[tokio::test]
async fn test_whole_mirror_without_subtree() {
    let runner = RecordingRunner::new();
    runner.answer_test("test -d /m", true);

    let config = DeployConfig::new("url", "/m", "/r");
    strategy(&config, &runner).release().await.unwrap();

    assert_eq!(
        runner.run_lines(),
        vec!["rsync -ar --copy-links --exclude=.git* /m/ /r"]
    );
}

#[tokio::test]
async fn test_preserving_links() {
    let runner = RecordingRunner::new();
    runner.answer_test("test -d /m/app", true);

    let config = app_config().with_export(ExportMode::PreserveLinks);
    strategy(&config, &runner).release().await.unwrap();

    assert_eq!(runner.run_lines(), vec!["rsync -ar --exclude=.git* /m/app/ /r"]);
}

#[tokio::test]
async fn test_archive_export_of_subtree() {
    let runner = RecordingRunner::new();
    runner.answer_test("test -d /m/app", true);

    let config = app_config().with_export(ExportMode::Archive);
    strategy(&config, &runner).release().await.unwrap();

    assert_eq!(
        runner.run_lines(),
        vec![
            "mkdir -p /r",
            "git archive --format=tar --output=.git/relgit-export.tar HEAD:app",
            "tar --exclude=.git* -xf /m/.git/relgit-export.tar -C /r",
            "rm -f /m/.git/relgit-export.tar",
        ]
    );
}

#[tokio::test]
async fn test_failed_extraction_still_removes_the_archive() {
    let runner = RecordingRunner::new();
    runner.answer_test("test -d /m/app", true);
    runner.fail_run(
        "tar --exclude=.git* -xf /m/.git/relgit-export.tar -C /r",
        "tar: /r: Cannot open: Permission denied",
    );

    let config = app_config().with_export(ExportMode::Archive);
    let err = strategy(&config, &runner).release().await.unwrap_err();

    assert!(matches!(err, ScmError::ExportFailed { .. }));
    assert!(err.to_string().contains("Permission denied"));
    assert_eq!(
        runner.run_lines().last().map(String::as_str),
        Some("rm -f /m/.git/relgit-export.tar")
    );
}

#[tokio::test]
async fn test_failed_archive_skips_extraction_but_cleans_up() {
    let runner = RecordingRunner::new();
    runner.answer_test("test -d /m/app", true);
    runner.fail_run(
        "git archive --format=tar --output=.git/relgit-export.tar HEAD:app",
        "fatal: not a valid object name: HEAD:app",
    );

    let config = app_config().with_export(ExportMode::Archive);
    strategy(&config, &runner).release().await.unwrap_err();

    assert_eq!(
        runner.run_lines(),
        vec![
            "mkdir -p /r",
            "git archive --format=tar --output=.git/relgit-export.tar HEAD:app",
            "rm -f /m/.git/relgit-export.tar",
        ]
    );
}

#[tokio::test]
async fn test_rsync_copy_is_additive() {
    let runner = RecordingRunner::new();
    runner.answer_test("test -d /m", true);

    let config = DeployConfig::new("url", "/m", "/r");
    let scm = strategy(&config, &runner);
    scm.release().await.unwrap();
    scm.release().await.unwrap();

    let copies = runner.get_call_history();
    let rsync: Vec<_> = copies.iter().filter(|c| c.argv[0] == "rsync").collect();
    assert_eq!(rsync.len(), 2);
    assert_eq!(rsync[0].argv, rsync[1].argv);
    assert!(rsync[0].argv.iter().all(|arg| !arg.starts_with("--delete")));
}

#[tokio::test]
async fn test_missing_subtree_fails_without_copying() {
    let runner = RecordingRunner::new();

    let err = strategy(&app_config(), &runner).release().await.unwrap_err();

    assert!(matches!(err, ScmError::ExportFailed { .. }));
    assert!(runner.run_lines().is_empty());
}

#[tokio::test]
async fn test_copy_failure_is_reported() {
    let runner = RecordingRunner::new();
    runner.answer_test("test -d /m/app", true);
    runner.fail_run(
        "rsync -ar --copy-links --exclude=.git* /m/app/ /r",
        "rsync: change_dir \"/m/app\" failed",
    );

    let err = strategy(&app_config(), &runner).release().await.unwrap_err();
    assert!(matches!(err, ScmError::ExportFailed { .. }));
    assert!(err.to_string().contains("change_dir"));
}
