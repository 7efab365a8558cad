//! The `render` command: export a configuration's graph, then run Graphviz
//! on the result.
//!
//! Rendering is logically chained after the export — the subprocess consumes
//! the freshly written DOT file. Both option groups are overridable
//! independently through their property prefixes (`export.*`, `render.*`).

use anyhow::Result;
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::merged_properties;
use crate::export::{ExportOptions, export_dot};
use crate::project::Project;
use crate::render::{RenderOptions, render};

/// Command to render a dependency configuration to an image.
#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Name of the dependency configuration to export and render
    #[arg(short, long)]
    configuration: Option<String>,

    /// Output file for the intermediate DOT graph
    #[arg(long)]
    dot_output: Option<PathBuf>,

    /// Render each component's artifacts into its node label
    #[arg(long)]
    show_artifacts: bool,

    /// Graphviz output format, passed as -T<format>
    #[arg(short = 'T', long)]
    format: Option<String>,

    /// Output image file; relative paths land under the project's build
    /// directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Name or path of the Graphviz executable
    #[arg(long)]
    graphviz: Option<String>,
}

impl RenderCommand {
    /// Execute export-then-render against the project at `project_path` (or
    /// the discovered one).
    pub fn execute(
        self,
        project_path: Option<PathBuf>,
        cli_properties: &BTreeMap<String, String>,
    ) -> Result<()> {
        let path = Project::find_project_file(project_path)?;
        let project = Project::load(&path)?;
        let properties = merged_properties(&project, cli_properties);

        let mut export_options = ExportOptions::default();
        if let Some(configuration) = self.configuration {
            export_options.configuration_name = configuration;
        }
        if let Some(dot_output) = self.dot_output {
            export_options.output_file = dot_output;
        }
        if self.show_artifacts {
            export_options.show_artifacts = true;
        }
        export_options.apply_overrides(&properties)?;

        let mut render_options = RenderOptions::default();
        if let Some(format) = self.format {
            render_options.format = format;
        }
        if let Some(output) = self.output {
            render_options.output_file = output;
        }
        if let Some(graphviz) = self.graphviz {
            render_options.graphviz_executable = graphviz;
        }
        render_options.apply_overrides(&properties);

        let dot_file = export_dot(&project, &export_options)?;
        let destination = render(&project, &render_options, &dot_file)?;

        println!(
            "Rendered configuration '{}' to {}",
            export_options.configuration_name,
            destination.display()
        );
        Ok(())
    }
}
