//! Builders for every git invocation the mirror strategy issues.
//!
//! Keeping them in one place makes argument order easy to audit and lets
//! tests compare the exact argv without running git.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::repo_url::RepoUrl;
use crate::infrastructure::process::CommandLine;

/// Name of the remote the mirror tracks
pub const REMOTE_NAME: &str = "origin";

/// Command builder bound to one mirror directory and one git environment.
#[derive(Debug, Clone)]
pub struct GitCommands {
    mirror_path: PathBuf,
    env: Vec<(String, String)>,
}

impl GitCommands {
    pub fn new(mirror_path: impl Into<PathBuf>, env: Vec<(String, String)>) -> Self {
        Self {
            mirror_path: mirror_path.into(),
            env,
        }
    }

    pub fn mirror_path(&self) -> &Path {
        &self.mirror_path
    }

    fn git(&self) -> CommandLine {
        CommandLine::git().envs(self.env.iter().cloned())
    }

    fn in_mirror(&self) -> CommandLine {
        self.git().within(&self.mirror_path)
    }

    fn url_arg(cmd: CommandLine, url: &RepoUrl) -> CommandLine {
        if url.has_credentials() {
            cmd.sensitive(url.authenticated(), url.redacted())
        } else {
            cmd.value(url.authenticated())
        }
    }

    /// `test -d <mirror>/.git`
    pub fn mirror_exists(&self) -> CommandLine {
        CommandLine::new("test")
            .flag("-d")
            .path(self.mirror_path.join(".git"))
    }

    /// `git ls-remote <url> HEAD`
    pub fn ls_remote(&self, url: &RepoUrl) -> CommandLine {
        let cmd = self.git().value("ls-remote");
        Self::url_arg(cmd, url).value("HEAD")
    }

    /// `git clone <url> <mirror>`
    pub fn clone(&self, url: &RepoUrl) -> CommandLine {
        let cmd = self.git().value("clone");
        Self::url_arg(cmd, url).path(&self.mirror_path)
    }

    /// `git remote set-url origin <url>`
    pub fn set_remote_url(&self, url: &RepoUrl) -> CommandLine {
        let cmd = self
            .in_mirror()
            .value("remote")
            .value("set-url")
            .value(REMOTE_NAME);
        Self::url_arg(cmd, url)
    }

    /// `git remote update --prune`
    pub fn remote_update(&self) -> CommandLine {
        self.in_mirror()
            .value("remote")
            .value("update")
            .flag("--prune")
    }

    /// `git checkout --detach <tracking name>`
    pub fn checkout_detached(&self, tracking_name: &str) -> CommandLine {
        self.in_mirror()
            .value("checkout")
            .flag("--detach")
            .value(tracking_name)
    }

    /// `git submodule update --init --recursive`
    pub fn submodule_update(&self) -> CommandLine {
        self.in_mirror()
            .value("submodule")
            .value("update")
            .flag("--init")
            .flag("--recursive")
    }

    /// `git rev-parse --verify --quiet <name>`
    pub fn verify_ref(&self, name: &str) -> CommandLine {
        self.in_mirror()
            .value("rev-parse")
            .flag("--verify")
            .flag("--quiet")
            .value(name)
    }

    /// `git rev-parse --verify --quiet <name>^{commit}`
    pub fn verify_commit(&self, name: &str) -> CommandLine {
        self.verify_ref(&format!("{name}^{{commit}}"))
    }

    /// `git show-ref --verify --quiet refs/heads/<name>`
    pub fn local_branch(&self, name: &str) -> CommandLine {
        self.in_mirror()
            .value("show-ref")
            .flag("--verify")
            .flag("--quiet")
            .value(format!("refs/heads/{name}"))
    }

    /// `git rev-list --max-count=1 <tracking name>`
    pub fn latest_revision(&self, tracking_name: &str) -> CommandLine {
        self.in_mirror()
            .value("rev-list")
            .joined("--max-count", "1")
            .value(tracking_name)
    }

    /// `git archive --format=tar --output=<file> <tree-ish>`
    pub fn archive(&self, tree_ish: &str, output: &Path) -> CommandLine {
        self.in_mirror()
            .value("archive")
            .joined("--format", "tar")
            .joined("--output", output.to_string_lossy())
            .value(tree_ish)
    }
}
