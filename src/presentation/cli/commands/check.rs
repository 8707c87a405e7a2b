use anyhow::Result;
use colored::Colorize;

use super::build_use_case;
use crate::common::error::RelgitError;
use crate::domain::entities::DeployConfig;

/// Handler for the check command
pub struct CheckCommand {
    config: DeployConfig,
}

impl CheckCommand {
    pub fn new(config: DeployConfig) -> Self {
        Self { config }
    }

    pub async fn execute(&self) -> Result<()> {
        let use_case = build_use_case(&self.config)?;
        use_case.check().await.map_err(RelgitError::from)?;

        println!(
            "{} {} is reachable",
            "✓".green().bold(),
            self.config.repository_location()?.url
        );
        Ok(())
    }
}
