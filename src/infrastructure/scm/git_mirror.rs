use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::{info, instrument, warn};

use super::classifier::{classify, latest_revision};
use super::export_strategy::{ExportStrategy, RsyncExport};
use super::git_commands::GitCommands;
use super::scm_interface::{MirrorAction, ScmError, ScmStrategy, UpdateStage};
use crate::domain::entities::{ReleaseTarget, RepositoryLocation, ResolvedReference, TrackedReference};
use crate::domain::value_objects::ReferenceSpec;
use crate::infrastructure::process::CommandRunner;

/// Git strategy that keeps a mirror checkout, resolves one reference in it
/// and exports the checked-out tree.
///
/// One instance serves one deploy. The classification made while updating
/// the mirror is remembered and reused by [`ScmStrategy::resolve_revision`],
/// so checkout and revision lookup can never disagree about whether the
/// reference is a branch.
pub struct GitMirrorStrategy {
    runner: Arc<dyn CommandRunner>,
    location: RepositoryLocation,
    reference: ReferenceSpec,
    target: ReleaseTarget,
    git: GitCommands,
    exporter: Box<dyn ExportStrategy>,
    tracked: Mutex<Option<TrackedReference>>,
}

impl GitMirrorStrategy {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        location: RepositoryLocation,
        reference: ReferenceSpec,
        target: ReleaseTarget,
    ) -> Self {
        let git = GitCommands::new(location.mirror_path.clone(), Vec::new());
        Self {
            runner,
            location,
            reference,
            target,
            git,
            exporter: Box::new(RsyncExport::default()),
            tracked: Mutex::new(None),
        }
    }

    /// Environment applied to every git command (`GIT_SSH`, prompts off).
    pub fn with_git_environment(mut self, env: Vec<(String, String)>) -> Self {
        self.git = GitCommands::new(self.location.mirror_path.clone(), env);
        self
    }

    pub fn with_exporter(mut self, exporter: Box<dyn ExportStrategy>) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn reference(&self) -> &ReferenceSpec {
        &self.reference
    }

    pub fn exporter_name(&self) -> &'static str {
        self.exporter.name()
    }

    fn cached(&self) -> Option<TrackedReference> {
        self.tracked
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn remember(&self, tracked: &TrackedReference) {
        *self
            .tracked
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(tracked.clone());
    }

    async fn classify_and_remember(&self) -> Result<TrackedReference, ScmError> {
        let tracked = classify(self.runner.as_ref(), &self.git, &self.reference).await?;
        self.remember(&tracked);
        Ok(tracked)
    }

    #[instrument(skip(self), fields(mirror = %self.location.mirror_path.display()))]
    async fn clone_mirror(&self) -> Result<(), ScmError> {
        info!(url = %self.location.url, "cloning mirror");
        self.runner
            .run(&self.git.clone(&self.location.url))
            .await
            .map_err(|e| ScmError::clone_failed(e.to_string()))?;

        // A fresh clone sits on the remote's default branch; move it onto
        // the configured reference.
        let tracked = self.classify_and_remember().await?;
        self.checkout(&tracked).await
    }

    #[instrument(skip(self), fields(mirror = %self.location.mirror_path.display()))]
    async fn update_mirror(&self) -> Result<(), ScmError> {
        info!(url = %self.location.url, "updating mirror");
        self.runner
            .run(&self.git.set_remote_url(&self.location.url))
            .await
            .map_err(|e| ScmError::update_failed(UpdateStage::SetUrl, e.to_string()))?;

        self.runner
            .run(&self.git.remote_update())
            .await
            .map_err(|e| ScmError::update_failed(UpdateStage::Fetch, e.to_string()))?;

        let tracked = self.classify_and_remember().await?;
        self.checkout(&tracked).await
    }

    async fn checkout(&self, tracked: &TrackedReference) -> Result<(), ScmError> {
        info!(
            tracking_name = %tracked.tracking_name,
            classification = %tracked.classification,
            "checking out"
        );
        self.runner
            .run(&self.git.checkout_detached(&tracked.tracking_name))
            .await
            .map_err(|e| ScmError::update_failed(UpdateStage::Checkout, e.to_string()))?;

        self.runner
            .run(&self.git.submodule_update())
            .await
            .map_err(|e| ScmError::update_failed(UpdateStage::Submodules, e.to_string()))
    }
}

#[async_trait]
impl ScmStrategy for GitMirrorStrategy {
    async fn mirror_exists(&self) -> bool {
        match self.runner.test(&self.git.mirror_exists()).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!(error = %e, "could not test for mirror, assuming it is absent");
                false
            }
        }
    }

    #[instrument(skip_all)]
    async fn check_reachable(&self) -> Result<(), ScmError> {
        self.runner
            .run(&self.git.ls_remote(&self.location.url))
            .await
            .map_err(|e| ScmError::unreachable(self.location.url.redacted(), e.to_string()))?;
        info!(url = %self.location.url, "remote is reachable");
        Ok(())
    }

    async fn ensure_mirror(&self) -> Result<MirrorAction, ScmError> {
        if self.mirror_exists().await {
            self.update_mirror().await?;
            Ok(MirrorAction::Updated)
        } else {
            self.clone_mirror().await?;
            Ok(MirrorAction::Cloned)
        }
    }

    #[instrument(skip_all)]
    async fn resolve_revision(&self) -> Result<ResolvedReference, ScmError> {
        let tracked = match self.cached() {
            Some(tracked) => tracked,
            None => self.classify_and_remember().await?,
        };

        let revision = latest_revision(self.runner.as_ref(), &self.git, &tracked).await?;
        let resolved = tracked.resolved(revision);
        info!(
            reference = %resolved.reference,
            tracking_name = %resolved.tracking_name,
            revision = %resolved.revision,
            "resolved revision"
        );
        Ok(resolved)
    }

    async fn release(&self) -> Result<(), ScmError> {
        self.exporter
            .export(self.runner.as_ref(), &self.git, &self.target)
            .await
    }

    fn location(&self) -> &RepositoryLocation {
        &self.location
    }

    fn target(&self) -> &ReleaseTarget {
        &self.target
    }
}
