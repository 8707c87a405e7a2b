use anyhow::Result;
use colored::Colorize;

use super::{build_use_case, create_spinner};
use crate::common::error::RelgitError;
use crate::domain::entities::DeployConfig;

/// Handler for the mirror command
pub struct MirrorCommand {
    config: DeployConfig,
    use_color: bool,
}

impl MirrorCommand {
    pub fn new(config: DeployConfig, use_color: bool) -> Self {
        Self { config, use_color }
    }

    pub async fn execute(&self) -> Result<()> {
        let use_case = build_use_case(&self.config)?;

        let spinner = create_spinner(self.use_color, "Updating mirror...");
        let result = use_case.mirror().await;
        spinner.finish_and_clear();

        let action = result.map_err(RelgitError::from)?;
        println!(
            "{} Mirror {} at {}",
            "✓".green().bold(),
            action,
            self.config.repo_path.display()
        );
        Ok(())
    }
}
