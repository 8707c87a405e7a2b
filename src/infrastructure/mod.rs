/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - Process execution (command lines, runners)
/// - Git mirror operations (clone, update, resolve, export)
pub mod process;
pub mod scm;

// Re-export commonly used types
pub use process::{CommandLine, CommandRunner, LocalCommandRunner};
pub use scm::{
    scm_factory::ScmFactory,
    scm_interface::{MirrorAction, ScmError, ScmStrategy},
};
