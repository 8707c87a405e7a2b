use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

use crate::domain::entities::ResolvedReference;
use crate::infrastructure::scm::{MirrorAction, ScmError, ScmStrategy};

/// DeployRelease関連のエラー
#[derive(Debug, Error)]
pub enum DeployReleaseError {
    #[error("Mirror not found at {0}; run `relgit mirror` first")]
    MirrorMissing(PathBuf),

    #[error(transparent)]
    Scm(#[from] ScmError),
}

/// デプロイ結果のレポート
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    /// リポジトリURL（認証情報はマスク済み）
    pub repository: String,

    /// ミラーのパス
    pub mirror_path: PathBuf,

    /// ミラーをクローンしたか更新したか
    pub mirror_action: MirrorAction,

    /// 解決されたリファレンス
    pub resolved: ResolvedReference,

    /// リリース先
    pub release_path: PathBuf,

    /// 完了時刻
    pub deployed_at: DateTime<Utc>,
}

/// Mirror, resolve and release in one pipeline.
///
/// Each step awaits the previous one and the first error aborts the rest.
/// The single-step methods exist for the CLI subcommands.
pub struct DeployReleaseUseCase {
    scm: Arc<dyn ScmStrategy>,
}

impl DeployReleaseUseCase {
    pub fn new(scm: Arc<dyn ScmStrategy>) -> Self {
        Self { scm }
    }

    /// Probe the remote without touching the mirror
    pub async fn check(&self) -> Result<(), DeployReleaseError> {
        Ok(self.scm.check_reachable().await?)
    }

    /// Probe the remote, then clone or update the mirror
    pub async fn mirror(&self) -> Result<MirrorAction, DeployReleaseError> {
        self.scm.check_reachable().await?;
        Ok(self.scm.ensure_mirror().await?)
    }

    /// Resolve the reference in an existing mirror without updating it
    pub async fn revision(&self) -> Result<ResolvedReference, DeployReleaseError> {
        self.require_mirror().await?;
        Ok(self.scm.resolve_revision().await?)
    }

    /// Export the mirror's current checkout
    pub async fn release(&self) -> Result<PathBuf, DeployReleaseError> {
        self.require_mirror().await?;
        self.scm.release().await?;
        Ok(self.scm.target().release_path.clone())
    }

    /// Full pipeline: check, ensure the mirror, resolve, release
    #[instrument(skip_all, fields(mirror = %self.scm.location().mirror_path.display()))]
    pub async fn deploy(&self) -> Result<DeployReport, DeployReleaseError> {
        self.scm.check_reachable().await?;
        let mirror_action = self.scm.ensure_mirror().await?;
        let resolved = self.scm.resolve_revision().await?;
        self.scm.release().await?;

        let report = DeployReport {
            repository: self.scm.location().url.redacted().to_string(),
            mirror_path: self.scm.location().mirror_path.clone(),
            mirror_action,
            resolved,
            release_path: self.scm.target().release_path.clone(),
            deployed_at: Utc::now(),
        };
        info!(
            revision = %report.resolved.revision,
            release = %report.release_path.display(),
            "deploy finished"
        );
        Ok(report)
    }

    async fn require_mirror(&self) -> Result<(), DeployReleaseError> {
        if self.scm.mirror_exists().await {
            Ok(())
        } else {
            Err(DeployReleaseError::MirrorMissing(
                self.scm.location().mirror_path.clone(),
            ))
        }
    }
}
