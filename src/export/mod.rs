//! Dependency-graph export to Graphviz DOT.
//!
//! Given a project's pre-resolved dependency graph and an [`ExportOptions`]
//! group, [`export_dot`] writes a single DOT digraph file describing it. The
//! walk is two-pass: every component gets a node declaration first (assigned
//! a sequential integer id on first visit), then every resolved dependency
//! edge gets a directed edge line. The same graph in the same enumeration
//! order always produces byte-identical output.
//!
//! Project-local components render as green boxes, external modules as
//! yellow ovals. With `show_artifacts` enabled, a node that has artifacts
//! renders as an HTML-like table instead: header row with the display name,
//! one grey row per artifact.
//!
//! Any unresolved edge aborts the export with the upstream failure; bytes
//! already flushed stay on disk, so a failed export's output must be treated
//! as unreliable.

use anyhow::Result;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::core::DepdotError;
use crate::graph::{ComponentId, DependencyEdge, ResolutionResult, ResolvedComponent};
use crate::project::Project;
use crate::utils::ensure_dir;

/// Property-key prefix for export option overrides.
pub const EXPORT_PROPERTY_PREFIX: &str = "export";

/// Fill color for project-local components.
const PROJECT_FILL_COLOR: &str = "#88ff88";
/// Fill color for external module components.
const MODULE_FILL_COLOR: &str = "#ffff88";

/// Options controlling a dependency-graph export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Name of the dependency configuration to export
    pub configuration_name: String,
    /// Output file; relative paths resolve against the project's build
    /// directory at export time
    pub output_file: PathBuf,
    /// Whether to render each component's artifacts into its node label
    pub show_artifacts: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            configuration_name: "default".to_string(),
            output_file: PathBuf::from("dependencies.dot"),
            show_artifacts: false,
        }
    }
}

impl ExportOptions {
    /// Apply property overrides from a flat string-keyed map.
    ///
    /// Recognized keys are `export.configurationName`, `export.outputFile`
    /// and `export.showArtifacts` — an explicit mapping per field, no
    /// reflection. A present override always wins over the in-memory value.
    pub fn apply_overrides(
        &mut self,
        properties: &BTreeMap<String, String>,
    ) -> Result<(), DepdotError> {
        if let Some(value) = property(properties, "configurationName") {
            self.configuration_name = value.to_string();
        }
        if let Some(value) = property(properties, "outputFile") {
            self.output_file = PathBuf::from(value);
        }
        if let Some(value) = property(properties, "showArtifacts") {
            self.show_artifacts = parse_bool_property(
                &format!("{EXPORT_PROPERTY_PREFIX}.showArtifacts"),
                value,
            )?;
        }
        Ok(())
    }
}

fn property<'a>(properties: &'a BTreeMap<String, String>, field: &str) -> Option<&'a str> {
    properties
        .get(&format!("{EXPORT_PROPERTY_PREFIX}.{field}"))
        .map(String::as_str)
}

/// Parse a property value as a boolean, rejecting anything but
/// `true`/`false`.
pub(crate) fn parse_bool_property(key: &str, value: &str) -> Result<bool, DepdotError> {
    value.parse::<bool>().map_err(|_| DepdotError::InvalidPropertyValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: "expected 'true' or 'false'".to_string(),
    })
}

/// Export one configuration's resolved graph to a DOT file.
///
/// Returns the resolved output path on success. Fails before a complete file
/// exists when the configuration cannot be found, the graph contains an
/// unresolved edge, or the file cannot be written.
pub fn export_dot(project: &Project, options: &ExportOptions) -> Result<PathBuf> {
    let configuration = project.find_resolvable_configuration(&options.configuration_name)?;

    let destination = project.resolve_output_path(&options.output_file);
    if let Some(parent) = destination.parent() {
        ensure_dir(parent)?;
    }

    debug!(
        configuration = %configuration.name,
        destination = %destination.display(),
        show_artifacts = options.show_artifacts,
        "exporting dependency graph"
    );

    // Single buffered writer for the whole file, closed on every exit path.
    let file = File::create(&destination)?;
    let mut writer = BufWriter::new(file);
    write_dot(&configuration.resolution, options.show_artifacts, &mut writer)?;
    writer.flush()?;

    info!(
        "exported configuration '{}' to {}",
        configuration.name,
        destination.display()
    );
    Ok(destination)
}

/// Write a resolved graph as a DOT digraph to `writer`.
///
/// Node ids are assigned sequentially in enumeration order, so the same
/// graph always serializes identically. Nodes are all written before edges;
/// duplicate edges collapse to one line.
pub fn write_dot<W: Write>(
    resolution: &ResolutionResult,
    show_artifacts: bool,
    writer: &mut W,
) -> Result<()> {
    writeln!(writer, "digraph G {{")?;
    writeln!(writer, "    #rankdir=\"LR\";")?;

    let mut ids: HashMap<String, usize> = HashMap::new();
    for component in &resolution.components {
        let next = ids.len();
        let id = *ids.entry(component.display_name()).or_insert(next);
        writeln!(writer, "    node_{id} [{}];", node_attributes(component, show_artifacts))?;
    }

    let mut links: HashSet<(usize, usize)> = HashSet::new();
    for component in &resolution.components {
        let parent = ids[&component.display_name()];
        for edge in &component.dependencies {
            match edge {
                DependencyEdge::Resolved { target } => {
                    let child = *ids.get(target).ok_or_else(|| {
                        DepdotError::ProjectValidationError {
                            reason: format!("resolved edge targets unknown component '{target}'"),
                        }
                    })?;
                    if links.insert((parent, child)) {
                        writeln!(writer, "    node_{parent} -> node_{child};")?;
                    }
                }
                DependencyEdge::Unresolved { requested, failure } => {
                    return Err(DepdotError::UnresolvedDependency {
                        requested: requested.clone(),
                        failure: failure.clone(),
                    }
                    .into());
                }
            }
        }
    }

    writeln!(writer, "}}")?;
    Ok(())
}

/// Render one component's node attribute list.
///
/// Attribute order is fixed (label, shape, style, margin, fillcolor) so that
/// output stays deterministic.
fn node_attributes(component: &ResolvedComponent, show_artifacts: bool) -> String {
    let artifact_table = show_artifacts && !component.artifacts.is_empty();

    let (shape, color) = match &component.id {
        ComponentId::Project { .. } => (if artifact_table { "none" } else { "box" }, PROJECT_FILL_COLOR),
        ComponentId::Module { .. } => (if artifact_table { "none" } else { "oval" }, MODULE_FILL_COLOR),
    };

    let label = if artifact_table {
        artifact_table_label(component)
    } else {
        quote(&escape_label(&component.display_name()))
    };

    let margin = if artifact_table { ", margin=\"0\"" } else { "" };
    format!("label={label}, shape=\"{shape}\", style=\"filled\"{margin}, fillcolor=\"{color}\"")
}

/// HTML-like table label: header row with the display name, one grey row per
/// artifact.
fn artifact_table_label(component: &ResolvedComponent) -> String {
    let rows: String = component
        .artifacts
        .iter()
        .map(|artifact| format!("<TR><TD BGCOLOR=\"lightgrey\">{}</TD></TR>", artifact.description()))
        .collect();

    format!(
        "<<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\" CELLPADDING=\"2\">\
         <TR><TD>{}</TD></TR>{rows}</TABLE>>",
        component.display_name()
    )
}

fn quote(s: &str) -> String {
    format!("\"{s}\"")
}

fn escape_label(input: &str) -> String {
    input.replace('\\', "\\\\").replace('"', "\\\"")
}
