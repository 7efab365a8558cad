//! The `export` command: write one configuration's resolved dependency
//! graph to a DOT file.
//!
//! Effective option values are layered: built-in defaults, then command-line
//! flags, then property overrides (`export.*` keys from the snapshot's
//! `[properties]` table or `-P` flags) — a present override always wins.

use anyhow::Result;
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::merged_properties;
use crate::export::{ExportOptions, export_dot};
use crate::project::Project;

/// Command to export a dependency configuration as a DOT digraph.
#[derive(Args, Debug)]
pub struct ExportCommand {
    /// Name of the dependency configuration to export
    #[arg(short, long)]
    configuration: Option<String>,

    /// Output file for the DOT graph; relative paths land under the
    /// project's build directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render each component's artifacts into its node label
    #[arg(long)]
    show_artifacts: bool,
}

impl ExportCommand {
    /// Execute the export against the project at `project_path` (or the
    /// discovered one).
    pub fn execute(
        self,
        project_path: Option<PathBuf>,
        cli_properties: &BTreeMap<String, String>,
    ) -> Result<()> {
        let path = Project::find_project_file(project_path)?;
        let project = Project::load(&path)?;

        let options = self.into_options(&project, cli_properties)?;
        let destination = export_dot(&project, &options)?;

        println!(
            "Exported configuration '{}' to {}",
            options.configuration_name,
            destination.display()
        );
        Ok(())
    }

    /// Fold flags and property overrides into an [`ExportOptions`] group.
    fn into_options(
        self,
        project: &Project,
        cli_properties: &BTreeMap<String, String>,
    ) -> Result<ExportOptions> {
        let mut options = ExportOptions::default();
        if let Some(configuration) = self.configuration {
            options.configuration_name = configuration;
        }
        if let Some(output) = self.output {
            options.output_file = output;
        }
        if self.show_artifacts {
            options.show_artifacts = true;
        }
        options.apply_overrides(&merged_properties(project, cli_properties))?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_project() -> (tempfile::TempDir, Project) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("depdot.toml");
        std::fs::write(
            &path,
            r#"
[properties]
"export.configurationName" = "fromProps"

[[configurations]]
name = "fromProps"

[[configurations.components]]
kind = "project"
path = ":"
"#,
        )
        .unwrap();
        let project = Project::load(&path).unwrap();
        (dir, project)
    }

    #[test]
    fn test_property_override_wins_over_flag() {
        let (_dir, project) = demo_project();
        let cmd = ExportCommand {
            configuration: Some("fromFlag".to_string()),
            output: None,
            show_artifacts: false,
        };
        let options = cmd.into_options(&project, &BTreeMap::new()).unwrap();
        assert_eq!(options.configuration_name, "fromProps");
    }

    #[test]
    fn test_cli_property_wins_over_project_property() {
        let (_dir, project) = demo_project();
        let cmd = ExportCommand {
            configuration: None,
            output: None,
            show_artifacts: false,
        };
        let cli_properties = BTreeMap::from([(
            "export.configurationName".to_string(),
            "fromCli".to_string(),
        )]);
        let options = cmd.into_options(&project, &cli_properties).unwrap();
        assert_eq!(options.configuration_name, "fromCli");
    }

    #[test]
    fn test_flags_apply_when_no_override_present() {
        let (_dir, mut project) = demo_project();
        project.properties.clear();
        let cmd = ExportCommand {
            configuration: Some("fromFlag".to_string()),
            output: Some(PathBuf::from("custom.dot")),
            show_artifacts: true,
        };
        let options = cmd.into_options(&project, &BTreeMap::new()).unwrap();
        assert_eq!(options.configuration_name, "fromFlag");
        assert_eq!(options.output_file, PathBuf::from("custom.dot"));
        assert!(options.show_artifacts);
    }
}
