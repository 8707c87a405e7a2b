pub mod check;
pub mod deploy;
pub mod init;
pub mod mirror;
pub mod release;
pub mod revision;

pub use check::*;
pub use deploy::*;
pub use init::*;
pub use mirror::*;
pub use release::*;
pub use revision::*;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use crate::application::use_cases::DeployReleaseUseCase;
use crate::common::result::RelgitResult;
use crate::domain::entities::DeployConfig;
use crate::infrastructure::process::{CommandRunner, LocalCommandRunner};
use crate::infrastructure::scm::ScmFactory;

/// Wire the local runner and the mirror strategy for one deploy
pub(crate) fn build_use_case(config: &DeployConfig) -> RelgitResult<DeployReleaseUseCase> {
    let runner: Arc<dyn CommandRunner> = Arc::new(LocalCommandRunner::new());
    let strategy = ScmFactory::create_strategy(config, runner)?;
    Ok(DeployReleaseUseCase::new(Arc::new(strategy)))
}

/// Create a spinner for indeterminate operations
pub(crate) fn create_spinner(use_color: bool, message: &str) -> ProgressBar {
    if !use_color {
        return ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠁", "⠂", "⠄", "⡀", "⢀", "⠠", "⠐", "⠈", "✓"])
        .template("{spinner:.green} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
