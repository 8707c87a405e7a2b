use anyhow::Result;
use colored::Colorize;

use super::{build_use_case, create_spinner};
use crate::application::use_cases::DeployReport;
use crate::common::error::RelgitError;
use crate::domain::entities::DeployConfig;

/// Handler for the deploy command
pub struct DeployCommand {
    config: DeployConfig,
    json: bool,
    use_color: bool,
}

impl DeployCommand {
    pub fn new(config: DeployConfig, json: bool, use_color: bool) -> Self {
        Self {
            config,
            json,
            use_color,
        }
    }

    pub async fn execute(&self) -> Result<()> {
        let use_case = build_use_case(&self.config)?;

        let spinner = create_spinner(
            self.use_color && !self.json,
            &format!("Deploying {}...", self.config.branch),
        );
        let result = use_case.deploy().await;
        spinner.finish_and_clear();

        let report = result.map_err(RelgitError::from)?;
        if self.json {
            let json = serde_json::to_string_pretty(&report).map_err(RelgitError::from)?;
            println!("{}", json);
        } else {
            print_report(&report);
        }
        Ok(())
    }
}

fn print_report(report: &DeployReport) {
    println!("{} Deploy completed!", "✓".green().bold());
    println!("  Repository: {}", report.repository);
    println!(
        "  Mirror:     {} ({})",
        report.mirror_path.display(),
        report.mirror_action
    );
    let resolved = &report.resolved;
    if resolved.is_branch() {
        println!(
            "  Reference:  {} [{} {}] -> {}",
            resolved.reference.as_str().bold(),
            resolved.classification,
            resolved.tracking_name,
            resolved.short_revision().yellow()
        );
    } else {
        println!(
            "  Reference:  {} [{}] -> {}",
            resolved.reference.as_str().bold(),
            resolved.classification,
            resolved.short_revision().yellow()
        );
    }
    println!("  Release:    {}", report.release_path.display());
    println!(
        "  Finished:   {}",
        report.deployed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}
