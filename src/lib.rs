//! # relgit - release exporter for git repositories
//!
//! `relgit` keeps a local mirror of a remote git repository, resolves a
//! branch, tag or commit id to an exact revision inside that mirror and
//! exports the checked-out tree (optionally a subdirectory of it) into a
//! release directory.
//!
//! ## Quick Start
//!
//! ```bash
//! relgit init
//! $EDITOR relgit.yaml
//! relgit deploy
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: configuration, repository locations and resolved references
//! - [`application`]: the deploy pipeline
//! - [`infrastructure`]: command execution and git mirror strategies
//! - [`presentation`]: CLI interface
//! - [`common`]: shared error handling and templates
//!
//! ## Pipeline
//!
//! 1. `check_reachable`: `git ls-remote <url> HEAD`
//! 2. `ensure_mirror`: clone when `<repo_path>/.git` is missing, otherwise
//!    `remote set-url`, `remote update --prune`, detached checkout and
//!    `submodule update --init --recursive`
//! 3. `resolve_revision`: `origin/<ref>` when it exists (branch), the
//!    reference itself otherwise (tag or commit)
//! 4. `release`: `rsync -ar --copy-links --exclude=.git* <mirror>[/<tree>]/ <release>`
//!
//! ## Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use relgit::application::use_cases::DeployReleaseUseCase;
//! use relgit::domain::entities::DeployConfig;
//! use relgit::infrastructure::{LocalCommandRunner, ScmFactory};
//!
//! # async fn example() -> relgit::Result<()> {
//! let config = DeployConfig::load_from_path("relgit.yaml")?;
//! let strategy = ScmFactory::create_strategy(&config, Arc::new(LocalCommandRunner::new()))?;
//! let report = DeployReleaseUseCase::new(Arc::new(strategy)).deploy().await?;
//!
//! println!("released {}", report.resolved.revision);
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types for convenience
pub use crate::common::error::RelgitError;
pub use crate::common::result::RelgitResult as Result;
