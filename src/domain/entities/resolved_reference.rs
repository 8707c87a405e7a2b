use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::value_objects::reference_spec::ReferenceSpec;

/// How a reference relates to the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// `origin/<ref>` exists: follow the remote branch.
    Branch,
    /// A tag or commit id, used as-is.
    FixedPoint,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Branch => write!(f, "branch"),
            Classification::FixedPoint => write!(f, "fixed point"),
        }
    }
}

/// Outcome of classifying a reference against a mirror: the classification
/// together with the name used for checkout and revision lookup.
///
/// The two are only ever produced together so that every later git command
/// uses the exact name that was checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedReference {
    pub reference: ReferenceSpec,
    pub classification: Classification,
    pub tracking_name: String,
}

impl TrackedReference {
    pub fn branch(reference: ReferenceSpec) -> Self {
        Self {
            tracking_name: reference.remote_tracking_name(),
            reference,
            classification: Classification::Branch,
        }
    }

    pub fn fixed_point(reference: ReferenceSpec) -> Self {
        Self {
            tracking_name: reference.as_str().to_string(),
            reference,
            classification: Classification::FixedPoint,
        }
    }

    /// Attach the revision read from the mirror.
    pub fn resolved(self, revision: impl Into<String>) -> ResolvedReference {
        ResolvedReference {
            reference: self.reference,
            classification: self.classification,
            tracking_name: self.tracking_name,
            revision: revision.into(),
        }
    }
}

/// A reference resolved to the exact commit that gets released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedReference {
    /// Reference as configured
    pub reference: ReferenceSpec,
    pub classification: Classification,
    /// `origin/<ref>` for branches, the reference itself for fixed points
    pub tracking_name: String,
    /// Full commit id
    pub revision: String,
}

impl ResolvedReference {
    pub fn is_branch(&self) -> bool {
        self.classification == Classification::Branch
    }

    /// Abbreviated revision for display.
    pub fn short_revision(&self) -> &str {
        let end = self
            .revision
            .char_indices()
            .nth(7)
            .map(|(i, _)| i)
            .unwrap_or(self.revision.len());
        &self.revision[..end]
    }
}

impl fmt::Display for ResolvedReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} via {}) at {}",
            self.reference, self.classification, self.tracking_name, self.revision
        )
    }
}
