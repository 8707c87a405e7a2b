use super::export_strategy::{ExportStrategy, GitArchiveExport, RsyncExport};
use super::git_mirror::GitMirrorStrategy;
use crate::domain::entities::{ConfigError, DeployConfig, ExportMode};
use crate::infrastructure::process::CommandRunner;
use std::sync::Arc;

/// Factory for creating mirror strategies from a deploy configuration
pub struct ScmFactory;

impl ScmFactory {
    /// Create a mirror strategy for one deploy
    ///
    /// Credentials, reference and release target are validated here, so a
    /// misconfigured deploy fails before any command runs.
    pub fn create_strategy(
        config: &DeployConfig,
        runner: Arc<dyn CommandRunner>,
    ) -> Result<GitMirrorStrategy, ConfigError> {
        let location = config.repository_location()?;
        let reference = config.reference()?;

        Ok(
            GitMirrorStrategy::new(runner, location, reference, config.release_target())
                .with_git_environment(config.git_environment())
                .with_exporter(Self::create_exporter(config.export)),
        )
    }

    /// Create the export strategy for the given mode
    pub fn create_exporter(mode: ExportMode) -> Box<dyn ExportStrategy> {
        match mode {
            ExportMode::CopyLinks => Box::new(RsyncExport::copy_links()),
            ExportMode::PreserveLinks => Box::new(RsyncExport::preserve_links()),
            ExportMode::Archive => Box::new(GitArchiveExport::new()),
        }
    }
}
