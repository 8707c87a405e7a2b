pub mod deploy_release;

pub use deploy_release::{DeployReleaseError, DeployReleaseUseCase, DeployReport};
