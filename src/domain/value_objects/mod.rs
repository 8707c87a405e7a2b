pub mod reference_spec;
pub mod repo_url;

pub use reference_spec::{ReferenceSpec, ReferenceSpecError};
pub use repo_url::{RepoUrl, RepoUrlError};
