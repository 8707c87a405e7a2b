use crate::domain::entities::{ReleaseTarget, RepositoryLocation, ResolvedReference};
use crate::infrastructure::process::CommandExecutorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operations the deploy pipeline drives, in pipeline order.
///
/// Implementations are created for one deploy and may keep state between
/// calls (the classification computed while updating the mirror is reused
/// when the revision is resolved).
#[async_trait]
pub trait ScmStrategy: Send + Sync {
    /// Whether the mirror already holds a git checkout. Never fails.
    async fn mirror_exists(&self) -> bool;

    /// Probe the remote without cloning it
    async fn check_reachable(&self) -> Result<(), ScmError>;

    /// Clone the mirror if it is missing, update it otherwise
    async fn ensure_mirror(&self) -> Result<MirrorAction, ScmError>;

    /// Classify the reference and read the exact revision from the mirror
    async fn resolve_revision(&self) -> Result<ResolvedReference, ScmError>;

    /// Copy the mirror's checked-out tree into the release directory
    async fn release(&self) -> Result<(), ScmError>;

    /// Repository this strategy works on
    fn location(&self) -> &RepositoryLocation;

    /// Where `release` writes to
    fn target(&self) -> &ReleaseTarget;
}

/// What `ensure_mirror` had to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorAction {
    Cloned,
    Updated,
}

impl fmt::Display for MirrorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MirrorAction::Cloned => write!(f, "cloned"),
            MirrorAction::Updated => write!(f, "updated"),
        }
    }
}

/// Step of bringing a mirror up to date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStage {
    SetUrl,
    Fetch,
    Checkout,
    Submodules,
}

impl fmt::Display for UpdateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateStage::SetUrl => write!(f, "remote set-url"),
            UpdateStage::Fetch => write!(f, "remote update"),
            UpdateStage::Checkout => write!(f, "checkout"),
            UpdateStage::Submodules => write!(f, "submodule update"),
        }
    }
}

/// Errors that can occur while mirroring, resolving or exporting
#[derive(Debug, thiserror::Error)]
pub enum ScmError {
    #[error("Repository {url} is not reachable: {message}")]
    UnreachableRemote { url: String, message: String },

    #[error("Clone operation failed: {message}")]
    CloneFailed { message: String },

    #[error("Mirror update failed during {stage}: {message}")]
    UpdateFailed { stage: UpdateStage, message: String },

    #[error("Reference '{reference}' is neither a remote branch nor a tag or commit in the mirror")]
    UnresolvableReference { reference: String },

    #[error("Export failed: {message}")]
    ExportFailed { message: String },

    #[error("Command execution failed: {0}")]
    Command(#[from] CommandExecutorError),
}

impl ScmError {
    /// Create an unreachable remote error
    pub fn unreachable(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnreachableRemote {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a clone failed error
    pub fn clone_failed(message: impl Into<String>) -> Self {
        Self::CloneFailed {
            message: message.into(),
        }
    }

    /// Create an update failed error for one stage
    pub fn update_failed(stage: UpdateStage, message: impl Into<String>) -> Self {
        Self::UpdateFailed {
            stage,
            message: message.into(),
        }
    }

    /// Create an unresolvable reference error
    pub fn unresolvable(reference: impl Into<String>) -> Self {
        Self::UnresolvableReference {
            reference: reference.into(),
        }
    }

    /// Create an export failed error
    pub fn export_failed(message: impl Into<String>) -> Self {
        Self::ExportFailed {
            message: message.into(),
        }
    }
}
