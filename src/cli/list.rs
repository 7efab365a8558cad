//! The `list` command: show the project's dependency configurations.
//!
//! Useful for discovering what `export --configuration` will accept. Offers
//! a plain table (default) and JSON for scripting.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::project::{Configuration, Project};

/// Command to list dependency configurations.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    format: String,

    /// Show only resolvable configurations
    #[arg(long)]
    resolvable: bool,
}

impl ListCommand {
    /// Execute the listing against the project at `project_path` (or the
    /// discovered one).
    pub fn execute(self, project_path: Option<PathBuf>) -> Result<()> {
        self.validate_arguments()?;

        let path = Project::find_project_file(project_path)?;
        let project = Project::load(&path)?;

        let configurations: Vec<&Configuration> = project
            .configurations
            .iter()
            .filter(|c| !self.resolvable || c.resolvable)
            .collect();

        match self.format.as_str() {
            "json" => self.output_json(&project, &configurations)?,
            _ => Self::output_table(&project, &configurations),
        }
        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "table" | "json" => Ok(()),
            other => Err(anyhow::anyhow!(
                "Invalid format '{other}'. Valid formats are: table, json"
            )),
        }
    }

    fn output_table(project: &Project, configurations: &[&Configuration]) {
        if configurations.is_empty() {
            println!("No configurations found.");
            return;
        }

        println!("Configurations for project '{}':", project.name);
        for configuration in configurations {
            let resolvable = if configuration.resolvable {
                "resolvable"
            } else {
                "not resolvable"
            };
            println!(
                "  {} ({resolvable}, {} components)",
                configuration.name,
                configuration.resolution.components.len()
            );
        }
    }

    fn output_json(&self, project: &Project, configurations: &[&Configuration]) -> Result<()> {
        let json = serde_json::json!({
            "project": project.name,
            "configurations": configurations
                .iter()
                .map(|c| {
                    serde_json::json!({
                        "name": c.name,
                        "resolvable": c.resolvable,
                        "components": c.resolution.components.len(),
                    })
                })
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        Ok(())
    }
}
