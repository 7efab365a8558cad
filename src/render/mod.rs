//! Rendering exported DOT files with Graphviz.
//!
//! The renderer is a single synchronous external-process invocation:
//! `<graphvizExecutable> -T<format> -o<outputFile> <dotInputFile>`, standard
//! streams inherited, awaited to completion with no timeout and no retry. A
//! missing executable or a non-zero exit is fatal and reported naming the
//! tool.

use anyhow::Result;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

use crate::core::DepdotError;
use crate::project::Project;
use crate::utils::ensure_dir;

/// Property-key prefix for render option overrides.
pub const RENDER_PROPERTY_PREFIX: &str = "render";

/// Options controlling a render invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Graphviz output format, passed as `-T<format>`
    pub format: String,
    /// Output image file; relative paths resolve against the project's build
    /// directory at render time
    pub output_file: PathBuf,
    /// Name or path of the Graphviz executable to invoke
    pub graphviz_executable: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: "svg".to_string(),
            output_file: PathBuf::from("renderedDependencies"),
            graphviz_executable: "dot".to_string(),
        }
    }
}

impl RenderOptions {
    /// Apply property overrides from a flat string-keyed map.
    ///
    /// Recognized keys are `render.format`, `render.outputFile` and
    /// `render.graphvizExecutable`. A present override always wins over the
    /// in-memory value.
    pub fn apply_overrides(&mut self, properties: &BTreeMap<String, String>) {
        if let Some(value) = property(properties, "format") {
            self.format = value.to_string();
        }
        if let Some(value) = property(properties, "outputFile") {
            self.output_file = PathBuf::from(value);
        }
        if let Some(value) = property(properties, "graphvizExecutable") {
            self.graphviz_executable = value.to_string();
        }
    }
}

fn property<'a>(properties: &'a BTreeMap<String, String>, field: &str) -> Option<&'a str> {
    properties
        .get(&format!("{RENDER_PROPERTY_PREFIX}.{field}"))
        .map(String::as_str)
}

/// Render a DOT file to an image by invoking Graphviz.
///
/// Returns the resolved output path on success.
pub fn render(project: &Project, options: &RenderOptions, dot_file: &Path) -> Result<PathBuf> {
    let destination = project.resolve_output_path(&options.output_file);
    if let Some(parent) = destination.parent() {
        ensure_dir(parent)?;
    }

    let executable = which::which(&options.graphviz_executable).map_err(|_| {
        DepdotError::GraphvizNotFound {
            executable: options.graphviz_executable.clone(),
        }
    })?;

    let args = render_args(options, &destination, dot_file);
    debug!(
        executable = %executable.display(),
        ?args,
        "invoking graphviz"
    );

    // status() inherits this process's standard streams and blocks until the
    // subprocess exits.
    let status = Command::new(&executable).args(&args).status()?;
    if !status.success() {
        return Err(DepdotError::GraphvizFailed {
            tool: options.graphviz_executable.clone(),
            status: status
                .code()
                .map_or_else(|| status.to_string(), |code| code.to_string()),
        }
        .into());
    }

    info!("rendered {} to {}", dot_file.display(), destination.display());
    Ok(destination)
}

/// Argument list for the Graphviz invocation:
/// `-T<format> -o<outputFile> <dotInputFile>`.
fn render_args(options: &RenderOptions, destination: &Path, dot_file: &Path) -> Vec<OsString> {
    let mut output_flag = OsString::from("-o");
    output_flag.push(destination);
    vec![
        OsString::from(format!("-T{}", options.format)),
        output_flag,
        dot_file.as_os_str().to_os_string(),
    ]
}
