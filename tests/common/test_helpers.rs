//! Test helper functions

use std::sync::Arc;

use relgit::domain::entities::DeployConfig;
use relgit::infrastructure::scm::{GitMirrorStrategy, ScmFactory};

use super::mock_services::RecordingRunner;

pub const MIRROR: &str = "/path/to/repo";
pub const RELEASE: &str = "/release";
pub const REVISION: &str = "81cec13b777ff46348693d327fc8e7832f79bf44";

/// Configuration pointing at the scripted mirror and release paths
pub fn config(url: &str, branch: &str) -> DeployConfig {
    DeployConfig::new(url, MIRROR, RELEASE).with_branch(branch)
}

/// Strategy wired to a recording runner
pub fn strategy(config: &DeployConfig, runner: &RecordingRunner) -> GitMirrorStrategy {
    ScmFactory::create_strategy(config, Arc::new(runner.clone())).expect("valid configuration")
}

/// Script an existing mirror in which `reference` is a remote branch
pub fn script_branch(runner: &RecordingRunner, reference: &str) {
    runner.answer_test(&format!("test -d {MIRROR}/.git"), true);
    runner.answer_test(
        &format!("git rev-parse --verify --quiet origin/{reference}"),
        true,
    );
    runner.answer_capture(
        &format!("git rev-list --max-count=1 origin/{reference}"),
        &format!("{REVISION}\n"),
    );
}

/// Script an existing mirror in which `reference` is a tag or commit
pub fn script_fixed_point(runner: &RecordingRunner, reference: &str) {
    runner.answer_test(&format!("test -d {MIRROR}/.git"), true);
    runner.answer_test(
        &format!("git rev-parse --verify --quiet {reference}^{{commit}}"),
        true,
    );
    runner.answer_capture(
        &format!("git rev-list --max-count=1 {reference}"),
        REVISION,
    );
}
