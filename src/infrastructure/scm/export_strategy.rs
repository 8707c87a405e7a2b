//! Strategies for copying the checked-out tree from the mirror into a
//! release directory.

use async_trait::async_trait;
use std::path::Path;
use tracing::{info, instrument, warn};

use super::git_commands::GitCommands;
use super::scm_interface::ScmError;
use crate::domain::entities::ReleaseTarget;
use crate::infrastructure::process::{CommandLine, CommandRunner};

/// Pattern for version-control metadata left out of every release
pub const VCS_EXCLUDE: &str = ".git*";

/// Archive file written inside the mirror's git directory
const ARCHIVE_FILE: &str = "relgit-export.tar";

/// A way of materializing the release tree
#[async_trait]
pub trait ExportStrategy: Send + Sync {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Copy the mirror (or its configured subtree) into the release path
    async fn export(
        &self,
        runner: &dyn CommandRunner,
        git: &GitCommands,
        target: &ReleaseTarget,
    ) -> Result<(), ScmError>;
}

/// Fail with a clear message when the (sub)tree to export is missing.
async fn ensure_source_exists(
    runner: &dyn CommandRunner,
    source: &Path,
) -> Result<(), ScmError> {
    let probe = CommandLine::new("test").flag("-d").path(source);
    if runner.test(&probe).await? {
        Ok(())
    } else {
        Err(ScmError::export_failed(format!(
            "source directory {} does not exist",
            source.display()
        )))
    }
}

/// rsync based export.
///
/// `rsync -ar [--copy-links] --exclude=.git* <source>/ <release>` is an
/// additive copy: files already in the release path but absent from the
/// mirror are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsyncExport {
    copy_links: bool,
}

impl RsyncExport {
    /// Replace symbolic links with the content they point to.
    pub fn copy_links() -> Self {
        Self { copy_links: true }
    }

    /// Keep symbolic links as links.
    pub fn preserve_links() -> Self {
        Self { copy_links: false }
    }

    pub fn command(&self, mirror_path: &Path, target: &ReleaseTarget) -> CommandLine {
        let mut cmd = CommandLine::new("rsync").flag("-ar");
        if self.copy_links {
            cmd = cmd.flag("--copy-links");
        }
        cmd.joined("--exclude", VCS_EXCLUDE)
            .value(target.source_arg(mirror_path))
            .path(&target.release_path)
    }
}

impl Default for RsyncExport {
    fn default() -> Self {
        Self::copy_links()
    }
}

#[async_trait]
impl ExportStrategy for RsyncExport {
    fn name(&self) -> &'static str {
        if self.copy_links {
            "rsync"
        } else {
            "rsync-preserve-links"
        }
    }

    #[instrument(skip_all, fields(release = %target.release_path.display()))]
    async fn export(
        &self,
        runner: &dyn CommandRunner,
        git: &GitCommands,
        target: &ReleaseTarget,
    ) -> Result<(), ScmError> {
        ensure_source_exists(runner, &target.source_dir(git.mirror_path())).await?;

        runner
            .run(&self.command(git.mirror_path(), target))
            .await
            .map_err(|e| ScmError::export_failed(e.to_string()))?;

        info!(strategy = self.name(), "release tree exported");
        Ok(())
    }
}

/// Export through `git archive` of the mirror's checked-out `HEAD`.
///
/// Only committed content ends up in the release: symbolic links stay
/// links and submodule contents are not included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GitArchiveExport;

impl GitArchiveExport {
    pub fn new() -> Self {
        Self
    }

    fn tree_ish(target: &ReleaseTarget) -> String {
        match &target.subtree {
            Some(tree) => format!("HEAD:{}", tree.to_string_lossy().trim_end_matches('/')),
            None => "HEAD".to_string(),
        }
    }

    /// Commands in execution order: create the release directory, write the
    /// archive, unpack it, remove it.
    pub fn commands(&self, git: &GitCommands, target: &ReleaseTarget) -> [CommandLine; 4] {
        // git runs inside the mirror, the other tools from the caller's directory
        let in_git_dir = Path::new(".git").join(ARCHIVE_FILE);
        let archive = git.mirror_path().join(&in_git_dir);
        [
            CommandLine::new("mkdir").flag("-p").path(&target.release_path),
            git.archive(&Self::tree_ish(target), &in_git_dir),
            CommandLine::new("tar")
                .joined("--exclude", VCS_EXCLUDE)
                .flag("-xf")
                .path(&archive)
                .separate("-C", target.release_path.to_string_lossy()),
            CommandLine::new("rm").flag("-f").path(&archive),
        ]
    }
}

#[async_trait]
impl ExportStrategy for GitArchiveExport {
    fn name(&self) -> &'static str {
        "git-archive"
    }

    #[instrument(skip_all, fields(release = %target.release_path.display()))]
    async fn export(
        &self,
        runner: &dyn CommandRunner,
        git: &GitCommands,
        target: &ReleaseTarget,
    ) -> Result<(), ScmError> {
        ensure_source_exists(runner, &target.source_dir(git.mirror_path())).await?;

        let [mkdir, archive, extract, cleanup] = self.commands(git, target);
        runner
            .run(&mkdir)
            .await
            .map_err(|e| ScmError::export_failed(e.to_string()))?;

        let unpacked = match runner.run(&archive).await {
            Ok(()) => runner.run(&extract).await,
            Err(e) => Err(e),
        };
        // the archive may be partially written even when a step failed
        let removed = runner.run(&cleanup).await;

        match (unpacked, removed) {
            (Err(e), removed) => {
                if let Err(cleanup_err) = removed {
                    warn!(error = %cleanup_err, "could not remove export archive");
                }
                Err(ScmError::export_failed(e.to_string()))
            }
            (Ok(()), Err(e)) => Err(ScmError::export_failed(e.to_string())),
            (Ok(()), Ok(())) => {
                info!(strategy = self.name(), "release tree exported");
                Ok(())
            }
        }
    }
}
