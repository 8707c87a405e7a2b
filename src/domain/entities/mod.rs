pub mod deploy_config;
pub mod location;
pub mod resolved_reference;

pub use deploy_config::{ConfigError, DeployConfig, ExportMode, DEFAULT_CONFIG_FILE};
pub use location::{ReleaseTarget, RepositoryLocation};
pub use resolved_reference::{Classification, ResolvedReference, TrackedReference};
