/// Git mirror operations infrastructure
///
/// This module keeps a mirror checkout of the application repository,
/// resolves the configured reference inside it and exports the tree
/// into release directories.

pub mod classifier;
pub mod export_strategy;
pub mod git_commands;
pub mod git_mirror;
pub mod scm_factory;
pub mod scm_interface;

pub use export_strategy::{ExportStrategy, GitArchiveExport, RsyncExport};
pub use git_commands::GitCommands;
pub use git_mirror::GitMirrorStrategy;
pub use scm_factory::ScmFactory;
pub use scm_interface::{MirrorAction, ScmError, ScmStrategy, UpdateStage};
