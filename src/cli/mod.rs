//! Command-line interface for depdot.
//!
//! Each command lives in its own module with its own argument struct and
//! execution logic:
//!
//! - `export` — export a configuration's resolved dependency graph to DOT
//! - `render` — export, then render the DOT file with Graphviz
//! - `list` — list the project's dependency configurations
//!
//! # Global Options
//!
//! All commands share:
//! - `--project <path>` — explicit path to the `depdot.toml` snapshot
//!   (default: search current directory and parents)
//! - `-P key=value` — set a property override; repeatable; wins over the
//!   snapshot's `[properties]` table
//! - `--verbose` / `--quiet` — logging verbosity
//!
//! # Examples
//!
//! ```bash
//! depdot export --configuration runtimeClasspath
//! depdot render -P render.format=png
//! depdot list --format json
//! ```

mod export;
mod list;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::project::Project;

/// Main CLI structure for depdot.
///
/// Uses the `clap` derive API; options marked `global = true` are available
/// to every subcommand.
#[derive(Parser)]
#[command(
    name = "depdot",
    about = "Export resolved dependency graphs to Graphviz DOT and render them",
    version,
    long_about = "depdot consumes a resolution snapshot (depdot.toml) describing a project's \
                  pre-resolved dependency configurations, exports a configuration's graph to \
                  Graphviz DOT, and can render the result with an external Graphviz executable."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the project snapshot file (depdot.toml).
    ///
    /// By default depdot searches for depdot.toml in the current directory
    /// and its parents.
    #[arg(long, global = true)]
    project: Option<PathBuf>,

    /// Set a property override, e.g. `-P export.showArtifacts=true`.
    ///
    /// Repeatable. Overrides given here win over the snapshot's
    /// `[properties]` table, which in turn wins over command-line flags and
    /// built-in defaults.
    #[arg(short = 'P', long = "property", global = true, value_name = "KEY=VALUE")]
    properties: Vec<String>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Export a configuration's resolved dependency graph to a DOT file.
    Export(export::ExportCommand),

    /// Export a configuration's graph, then render it with Graphviz.
    Render(render::RenderCommand),

    /// List the project's dependency configurations.
    List(list::ListCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// Initializes logging from the verbosity flags, parses `-P` overrides,
    /// and dispatches to the subcommand.
    pub fn execute(self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        let properties = parse_property_flags(&self.properties)?;

        match self.command {
            Commands::Export(cmd) => cmd.execute(self.project, &properties),
            Commands::Render(cmd) => cmd.execute(self.project, &properties),
            Commands::List(cmd) => cmd.execute(self.project),
        }
    }
}

/// Initialize the tracing subscriber once, honoring `RUST_LOG` when set.
fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse repeated `-P key=value` flags into a property map.
fn parse_property_flags(flags: &[String]) -> Result<BTreeMap<String, String>> {
    let mut properties = BTreeMap::new();
    for flag in flags {
        let (key, value) = flag.split_once('=').ok_or_else(|| {
            anyhow::anyhow!("Invalid property '{flag}': expected the form key=value")
        })?;
        properties.insert(key.to_string(), value.to_string());
    }
    Ok(properties)
}

/// Merge the project's `[properties]` table with `-P` overrides; the
/// command line wins.
fn merged_properties(
    project: &Project,
    cli_properties: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = project.properties.clone();
    merged.extend(
        cli_properties
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    merged
}
