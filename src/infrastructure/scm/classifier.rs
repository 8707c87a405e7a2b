//! Reference classification, shared by the mirror update and revision lookup.

use tracing::{debug, instrument, warn};

use super::git_commands::GitCommands;
use super::scm_interface::ScmError;
use crate::domain::entities::TrackedReference;
use crate::domain::value_objects::ReferenceSpec;
use crate::infrastructure::process::CommandRunner;

/// Decide whether `reference` is a remote branch or a fixed point.
///
/// `origin/<ref>` is checked first, so a name that is both a branch and a
/// tag classifies as a branch. A fixed point must resolve to a commit in
/// the mirror; otherwise the reference is rejected. A name that only
/// resolves through a local branch (left behind by the initial clone after
/// the branch was deleted upstream) is rejected as well.
#[instrument(skip(runner, git), fields(reference = %reference))]
pub async fn classify(
    runner: &dyn CommandRunner,
    git: &GitCommands,
    reference: &ReferenceSpec,
) -> Result<TrackedReference, ScmError> {
    let remote_name = reference.remote_tracking_name();
    if runner.test(&git.verify_ref(&remote_name)).await? {
        debug!(tracking_name = %remote_name, "classified as branch");
        return Ok(TrackedReference::branch(reference.clone()));
    }

    if runner.test(&git.verify_commit(reference.as_str())).await? {
        if runner.test(&git.local_branch(reference.as_str())).await? {
            warn!(reference = %reference, "only a stale local branch matches, remote branch is gone");
            return Err(ScmError::unresolvable(reference.as_str()));
        }
        debug!(tracking_name = %reference, "classified as fixed point");
        return Ok(TrackedReference::fixed_point(reference.clone()));
    }

    Err(ScmError::unresolvable(reference.as_str()))
}

/// Read the most recent commit reachable from the tracked name.
#[instrument(skip(runner, git, tracked), fields(tracking_name = %tracked.tracking_name))]
pub async fn latest_revision(
    runner: &dyn CommandRunner,
    git: &GitCommands,
    tracked: &TrackedReference,
) -> Result<String, ScmError> {
    let output = runner
        .capture(&git.latest_revision(&tracked.tracking_name))
        .await?;

    match output.lines().next().map(str::trim) {
        Some(revision) if !revision.is_empty() => Ok(revision.to_string()),
        _ => Err(ScmError::unresolvable(tracked.reference.as_str())),
    }
}
