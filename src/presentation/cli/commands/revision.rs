use anyhow::Result;

use super::build_use_case;
use crate::common::error::RelgitError;
use crate::domain::entities::DeployConfig;

/// Handler for the revision command
///
/// Prints only the revision on stdout so the output can be captured by scripts.
pub struct RevisionCommand {
    config: DeployConfig,
}

impl RevisionCommand {
    pub fn new(config: DeployConfig) -> Self {
        Self { config }
    }

    pub async fn execute(&self) -> Result<()> {
        let use_case = build_use_case(&self.config)?;
        let resolved = use_case.revision().await.map_err(RelgitError::from)?;
        println!("{}", resolved.revision);
        Ok(())
    }
}
