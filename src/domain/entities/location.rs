use std::path::{Path, PathBuf};

use crate::domain::value_objects::repo_url::RepoUrl;

/// Where the repository comes from and where its mirror lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocation {
    pub url: RepoUrl,
    pub mirror_path: PathBuf,
}

impl RepositoryLocation {
    pub fn new(url: RepoUrl, mirror_path: impl Into<PathBuf>) -> Self {
        Self {
            url,
            mirror_path: mirror_path.into(),
        }
    }
}

/// Destination of the exported tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTarget {
    pub release_path: PathBuf,
    /// Subdirectory of the repository to export instead of its root
    pub subtree: Option<PathBuf>,
}

impl ReleaseTarget {
    pub fn new(release_path: impl Into<PathBuf>) -> Self {
        Self {
            release_path: release_path.into(),
            subtree: None,
        }
    }

    pub fn with_subtree(mut self, subtree: impl Into<PathBuf>) -> Self {
        self.subtree = Some(subtree.into());
        self
    }

    /// Directory inside the mirror that gets copied.
    pub fn source_dir(&self, mirror_path: &Path) -> PathBuf {
        match &self.subtree {
            Some(tree) => mirror_path.join(tree),
            None => mirror_path.to_path_buf(),
        }
    }

    /// Source directory rendered with a trailing slash, so copy tools
    /// transfer its contents rather than the directory itself.
    pub fn source_arg(&self, mirror_path: &Path) -> String {
        let rendered = self.source_dir(mirror_path).to_string_lossy().into_owned();
        if rendered.ends_with('/') {
            rendered
        } else {
            format!("{rendered}/")
        }
    }
}
