use anyhow::Result;
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::common::error::RelgitError;
use crate::common::templates::get_relgit_template;
use crate::domain::entities::DEFAULT_CONFIG_FILE;

/// Write a relgit.yaml template
pub struct InitCommand {
    /// Directory where to create the relgit.yaml file
    pub path: Option<PathBuf>,
    /// Force overwrite existing file
    pub force: bool,
}

impl InitCommand {
    pub fn new(path: Option<PathBuf>, force: bool) -> Self {
        Self { path, force }
    }

    /// Execute the init command
    pub async fn execute(&self) -> Result<()> {
        let target_file = self.write_template()?;

        println!("✅ Successfully created {} template file", DEFAULT_CONFIG_FILE);
        println!("📁 Location: {}", target_file.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Edit repo_url, repo_path and release_path");
        println!("   2. Run 'relgit check' to verify the remote is reachable");
        println!("   3. Run 'relgit deploy' to mirror, resolve and release");

        Ok(())
    }

    fn write_template(&self) -> Result<PathBuf, RelgitError> {
        let target_dir = match &self.path {
            Some(path) => path.clone(),
            None => env::current_dir()?,
        };
        let target_file = target_dir.join(DEFAULT_CONFIG_FILE);

        if target_file.exists() && !self.force {
            return Err(RelgitError::filesystem_error(
                format!(
                    "File {} already exists. Use --force to overwrite.",
                    target_file.display()
                ),
                Some(target_file),
            ));
        }

        fs::create_dir_all(&target_dir).map_err(|e| {
            RelgitError::filesystem_error_with_source(
                "Failed to create directory",
                Some(target_dir.clone()),
                e,
            )
        })?;
        fs::write(&target_file, get_relgit_template()).map_err(|e| {
            RelgitError::filesystem_error_with_source(
                "Failed to write template",
                Some(target_file.clone()),
                e,
            )
        })?;

        Ok(target_file)
    }
}
