pub mod commands;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::exit;

use crate::common::error::RelgitError;
use crate::common::result::RelgitResult;
use crate::domain::entities::{ConfigError, DeployConfig, ExportMode, DEFAULT_CONFIG_FILE};

/// relgit - Mirror a git repository, resolve a reference and export a release tree
#[derive(Parser)]
#[command(name = "relgit")]
#[command(about = "Mirror a git repository, resolve a reference and export a release tree")]
#[command(version)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_DATE"),
    " for ",
    env!("BUILD_TARGET"),
    ")"
))]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "RELGIT_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    pub config: PathBuf,

    #[command(flatten)]
    pub overrides: ConfigOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

/// Values that take precedence over the configuration file
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Remote repository URL
    #[arg(long, global = true, env = "RELGIT_REPO_URL")]
    pub repo_url: Option<String>,

    /// HTTP username embedded into the URL
    #[arg(long, global = true, env = "RELGIT_GIT_HTTP_USERNAME")]
    pub git_http_username: Option<String>,

    /// HTTP password embedded into the URL
    #[arg(long, global = true, env = "RELGIT_GIT_HTTP_PASSWORD", hide_env_values = true)]
    pub git_http_password: Option<String>,

    /// Local mirror directory
    #[arg(long, global = true, env = "RELGIT_REPO_PATH")]
    pub repo_path: Option<PathBuf>,

    /// Branch, tag or commit to release
    #[arg(short, long, global = true, env = "RELGIT_BRANCH")]
    pub branch: Option<String>,

    /// Directory the release tree is written to
    #[arg(long, global = true, env = "RELGIT_RELEASE_PATH")]
    pub release_path: Option<PathBuf>,

    /// Release only this subdirectory of the repository
    #[arg(long, global = true, env = "RELGIT_REPO_TREE")]
    pub repo_tree: Option<PathBuf>,

    /// SSH wrapper script handed to git as GIT_SSH
    #[arg(long, global = true, env = "RELGIT_GIT_SSH")]
    pub git_ssh: Option<PathBuf>,

    /// How the tree is copied: copy-links, preserve-links or archive
    #[arg(long, global = true, env = "RELGIT_EXPORT")]
    pub export: Option<ExportMode>,
}

impl ConfigOverrides {
    /// Apply the overrides on top of an optional file configuration.
    ///
    /// Without a file, `repo_url`, `repo_path` and `release_path` must all
    /// be given here.
    pub fn apply(&self, base: Option<DeployConfig>) -> Result<DeployConfig, ConfigError> {
        let mut config = match base {
            Some(config) => config,
            None => {
                let (Some(url), Some(repo_path), Some(release_path)) =
                    (&self.repo_url, &self.repo_path, &self.release_path)
                else {
                    return Err(ConfigError::Invalid(
                        "no configuration file; --repo-url, --repo-path and --release-path are required"
                            .to_string(),
                    ));
                };
                DeployConfig::new(url.clone(), repo_path.clone(), release_path.clone())
            }
        };

        if let Some(url) = &self.repo_url {
            config.repo_url = url.clone();
        }
        if let Some(username) = &self.git_http_username {
            config.git_http_username = Some(username.clone());
        }
        if let Some(password) = &self.git_http_password {
            config.git_http_password = Some(password.clone());
        }
        if let Some(path) = &self.repo_path {
            config.repo_path = path.clone();
        }
        if let Some(branch) = &self.branch {
            config.branch = branch.clone();
        }
        if let Some(path) = &self.release_path {
            config.release_path = path.clone();
        }
        if let Some(tree) = &self.repo_tree {
            config.repo_tree = Some(tree.clone());
        }
        if let Some(wrapper) = &self.git_ssh {
            config.git_ssh = Some(wrapper.clone());
        }
        if let Some(export) = self.export {
            config.export = export;
        }

        config.validate_all()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a commented relgit.yaml template
    Init {
        /// Directory where to create the relgit.yaml file (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Force overwrite existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Check that the remote repository is reachable
    Check,

    /// Clone the mirror, or update it if it already exists
    Mirror,

    /// Print the revision the reference resolves to in the mirror
    Revision,

    /// Copy the mirror's checkout into the release path
    Release,

    /// Check, mirror, resolve and release in one go
    Deploy {
        /// Print the deploy report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn new() -> Self {
        Self { cli: Cli::parse() }
    }

    pub fn verbose(&self) -> bool {
        self.cli.verbose
    }

    pub async fn run(self) -> anyhow::Result<()> {
        if self.cli.no_color {
            colored::control::set_override(false);
        }

        match self.handle_command().await {
            Ok(()) => Ok(()),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                let code = e
                    .downcast_ref::<RelgitError>()
                    .map_or(1, RelgitError::exit_code);
                exit(code);
            }
        }
    }

    async fn handle_command(&self) -> anyhow::Result<()> {
        use commands::*;

        let use_color = !self.cli.no_color;
        match &self.cli.command {
            Commands::Init { path, force } => {
                InitCommand::new(path.clone(), *force).execute().await
            }
            Commands::Check => CheckCommand::new(self.load_config()?).execute().await,
            Commands::Mirror => {
                MirrorCommand::new(self.load_config()?, use_color)
                    .execute()
                    .await
            }
            Commands::Revision => RevisionCommand::new(self.load_config()?).execute().await,
            Commands::Release => {
                ReleaseCommand::new(self.load_config()?, use_color)
                    .execute()
                    .await
            }
            Commands::Deploy { json } => {
                DeployCommand::new(self.load_config()?, *json, use_color)
                    .execute()
                    .await
            }
        }
    }

    fn load_config(&self) -> RelgitResult<DeployConfig> {
        Ok(load_config(&self.cli.config, &self.cli.overrides)?)
    }
}

impl Default for CliApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the configuration file when present and apply the overrides.
pub fn load_config(path: &Path, overrides: &ConfigOverrides) -> Result<DeployConfig, ConfigError> {
    let base = if path.exists() {
        Some(DeployConfig::read_from_path(path)?)
    } else {
        None
    };
    overrides.apply(base)
}
