use anyhow::Result;
use colored::Colorize;

use super::{build_use_case, create_spinner};
use crate::common::error::RelgitError;
use crate::domain::entities::DeployConfig;

/// Handler for the release command
pub struct ReleaseCommand {
    config: DeployConfig,
    use_color: bool,
}

impl ReleaseCommand {
    pub fn new(config: DeployConfig, use_color: bool) -> Self {
        Self { config, use_color }
    }

    pub async fn execute(&self) -> Result<()> {
        let use_case = build_use_case(&self.config)?;

        let spinner = create_spinner(self.use_color, "Exporting release tree...");
        let result = use_case.release().await;
        spinner.finish_and_clear();

        let release_path = result.map_err(RelgitError::from)?;
        println!(
            "{} Released into {} ({})",
            "✓".green().bold(),
            release_path.display(),
            self.config.export
        );
        Ok(())
    }
}
