use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// Reference used when none is configured
pub const DEFAULT_REFERENCE: &str = "master";

/// Reference name related errors
#[derive(Debug, Error, PartialEq)]
pub enum ReferenceSpecError {
    #[error("Reference name cannot be empty")]
    Empty,

    #[error("Reference name must not start with '-': {0}")]
    LeadingDash(String),

    #[error("Invalid reference name: {0}")]
    InvalidFormat(String),
}

fn allowed_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\x00-\x20\x7F~^:?*\[\\]+$").expect("reference pattern is valid")
    })
}

/// The configured reference: a branch, a tag or a commit id.
///
/// Which of the three it is cannot be told from the string alone; that is
/// decided by classification against a mirror. The value is validated only
/// enough to be safely passed to git as a single argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReferenceSpec(String);

impl ReferenceSpec {
    pub fn new(name: &str) -> Result<Self, ReferenceSpecError> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(ReferenceSpecError::Empty);
        }
        if trimmed.starts_with('-') {
            return Err(ReferenceSpecError::LeadingDash(trimmed.to_string()));
        }
        if trimmed.contains("..") || trimmed.contains("@{") || trimmed.ends_with('/') {
            return Err(ReferenceSpecError::InvalidFormat(trimmed.to_string()));
        }
        if !allowed_chars().is_match(trimmed) {
            return Err(ReferenceSpecError::InvalidFormat(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Remote-tracking name this reference would have if it were a branch.
    pub fn remote_tracking_name(&self) -> String {
        format!("origin/{}", self.0)
    }
}

impl Default for ReferenceSpec {
    fn default() -> Self {
        Self(DEFAULT_REFERENCE.to_string())
    }
}

impl fmt::Display for ReferenceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ReferenceSpec {
    type Err = ReferenceSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ReferenceSpec {
    type Error = ReferenceSpecError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<ReferenceSpec> for String {
    fn from(value: ReferenceSpec) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_branches_tags_and_commits() {
        for name in [
            "main",
            "real-branch",
            "feature/login",
            "v1.2.0",
            "81cec13b777ff46348693d327fc8e7832f79bf44",
            "release_2024.10",
        ] {
            assert!(ReferenceSpec::new(name).is_ok(), "{name} should be accepted");
        }
    }

    #[test]
    fn test_remote_tracking_name() {
        let spec = ReferenceSpec::new("main").unwrap();
        assert_eq!(spec.remote_tracking_name(), "origin/main");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(ReferenceSpec::new("").unwrap_err(), ReferenceSpecError::Empty);
        assert_eq!(ReferenceSpec::new("  ").unwrap_err(), ReferenceSpecError::Empty);
    }

    #[test]
    fn test_rejects_option_like_names() {
        assert!(matches!(
            ReferenceSpec::new("--orphan"),
            Err(ReferenceSpecError::LeadingDash(_))
        ));
    }

    #[test]
    fn test_rejects_revision_syntax() {
        for name in ["main~1", "main^", "a..b", "HEAD@{1}", "a:b", "feat*", "a b", "dir/"] {
            assert!(ReferenceSpec::new(name).is_err(), "{name} should be rejected");
        }
    }

    #[test]
    fn test_default_is_master() {
        assert_eq!(ReferenceSpec::default().as_str(), "master");
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let spec: ReferenceSpec = serde_yaml::from_str("v1.2.0").unwrap();
        assert_eq!(spec.as_str(), "v1.2.0");
        assert!(serde_yaml::from_str::<ReferenceSpec>("\"-x\"").is_err());
    }
}
