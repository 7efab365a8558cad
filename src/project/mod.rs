//! Project snapshot loading and validation.
//!
//! A depdot project file (`depdot.toml`) is a resolution snapshot: it
//! describes a build project's named dependency configurations and, for each
//! resolvable one, the dependency graph the host build system already
//! resolved. It is the stand-in for the host's in-memory object model — this
//! tool only consumes it, it never resolves dependencies.
//!
//! # File Format
//!
//! ```toml
//! name = "my-app"
//! build_dir = "build"
//!
//! [properties]
//! "export.showArtifacts" = "true"
//!
//! [[configurations]]
//! name = "runtimeClasspath"
//! resolvable = true
//!
//! [[configurations.components]]
//! kind = "project"
//! path = ":"
//! dependencies = ["com.example:libA:1.0"]
//!
//! [[configurations.components]]
//! kind = "module"
//! group = "com.example"
//! name = "libA"
//! version = "1.0"
//!
//! [[configurations.components.artifacts]]
//! type = "jar"
//! ```
//!
//! Resolved dependency edges are bare strings naming the selected component's
//! display name; unresolved edges are tables carrying the upstream failure:
//! `{ requested = "com.example:gone:2.0", failure = "not found" }`.
//!
//! The file is discovered in the current directory or any parent (like a
//! build manifest), or passed explicitly with `--project`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::core::DepdotError;
use crate::graph::{Artifact, ComponentId, DependencyEdge, ResolutionResult, ResolvedComponent};

/// Default project file name searched for in the working directory and its
/// parents.
pub const PROJECT_FILE_NAME: &str = "depdot.toml";

/// A build project as described by a resolution snapshot.
#[derive(Debug, Clone)]
pub struct Project {
    /// Project name; defaults to the snapshot's directory name
    pub name: String,
    /// Directory containing the snapshot file
    root_dir: PathBuf,
    /// Build output directory, relative to `root_dir` unless absolute
    build_dir: PathBuf,
    /// Flat string-keyed property map used for option overrides
    pub properties: BTreeMap<String, String>,
    /// The project's dependency configurations
    pub configurations: Vec<Configuration>,
}

/// A named dependency configuration and its pre-resolved graph.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Configuration name (e.g. `runtimeClasspath`)
    pub name: String,
    /// Whether the configuration can be resolved, and therefore exported
    pub resolvable: bool,
    /// The host-resolved component graph
    pub resolution: ResolutionResult,
}

impl Project {
    /// Load and validate a project snapshot from `path`.
    ///
    /// Performs read → parse → validate, resolving the build directory
    /// against the snapshot's parent directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file {}", path.display()))?;

        let raw: ProjectFile = toml::from_str(&content)
            .map_err(|e| DepdotError::ProjectParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
            .with_context(|| format!("Invalid TOML syntax in project file: {}", path.display()))?;

        let root_dir = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Project path has no parent directory"))?
            .to_path_buf();

        let name = raw.name.unwrap_or_else(|| {
            root_dir
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("project")
                .to_string()
        });

        let configurations = raw
            .configurations
            .into_iter()
            .map(ConfigurationFile::into_configuration)
            .collect::<Result<Vec<_>>>()?;

        let project = Self {
            name,
            root_dir,
            build_dir: raw.build_dir.unwrap_or_else(|| PathBuf::from("build")),
            properties: raw.properties,
            configurations,
        };
        project.validate()?;

        Ok(project)
    }

    /// Locate the project file: the explicit path if given, otherwise
    /// `depdot.toml` in the current directory or any parent.
    pub fn find_project_file(explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(anyhow::anyhow!(
                    "Project file {} not found",
                    path.display()
                ));
            }
            return Ok(path);
        }

        let mut dir = std::env::current_dir()?;
        loop {
            let candidate = dir.join(PROJECT_FILE_NAME);
            if candidate.exists() {
                return Ok(candidate);
            }
            if !dir.pop() {
                return Err(DepdotError::ProjectNotFound.into());
            }
        }
    }

    /// Names of all resolvable configurations, in declaration order.
    #[must_use]
    pub fn resolvable_names(&self) -> Vec<&str> {
        self.configurations
            .iter()
            .filter(|c| c.resolvable)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Find the single resolvable configuration with the given name.
    ///
    /// Zero matches and more than one match both fail with an error that
    /// enumerates the resolvable configuration names.
    pub fn find_resolvable_configuration(&self, name: &str) -> Result<&Configuration, DepdotError> {
        let mut matches = self
            .configurations
            .iter()
            .filter(|c| c.resolvable && c.name == name);

        match (matches.next(), matches.next()) {
            (Some(configuration), None) => Ok(configuration),
            _ => Err(DepdotError::ConfigurationNotFound {
                name: name.to_string(),
                resolvable: format!(
                    "[{}]",
                    self.resolvable_names()
                        .iter()
                        .map(|n| format!("'{n}'"))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }),
        }
    }

    /// The project's build output directory (absolute or project-relative).
    #[must_use]
    pub fn build_output_dir(&self) -> PathBuf {
        if self.build_dir.is_absolute() {
            self.build_dir.clone()
        } else {
            self.root_dir.join(&self.build_dir)
        }
    }

    /// Resolve an output path: absolute paths pass through, relative ones
    /// land under the build output directory. Resolution happens at call
    /// time, never at configuration time.
    #[must_use]
    pub fn resolve_output_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.build_output_dir().join(path)
        }
    }

    /// Structural validation of every configuration's resolved graph:
    /// component display names must be unique and resolved edges must point
    /// at components in the same configuration.
    fn validate(&self) -> Result<()> {
        for configuration in &self.configurations {
            let mut seen = HashSet::new();
            for component in &configuration.resolution.components {
                let display = component.display_name();
                if !seen.insert(display.clone()) {
                    return Err(DepdotError::ProjectValidationError {
                        reason: format!(
                            "duplicate component '{display}' in configuration '{}'",
                            configuration.name
                        ),
                    }
                    .into());
                }
            }

            for component in &configuration.resolution.components {
                for edge in &component.dependencies {
                    if let DependencyEdge::Resolved { target } = edge
                        && !seen.contains(target)
                    {
                        return Err(DepdotError::ProjectValidationError {
                            reason: format!(
                                "component '{}' depends on '{target}', which is not part of \
                                 configuration '{}'",
                                component.display_name(),
                                configuration.name
                            ),
                        }
                        .into());
                    }
                }
            }
        }
        Ok(())
    }
}

// Wire format. Kept separate from the public model so that the closed
// ComponentId enum stays the only identity representation past this point.

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectFile {
    name: Option<String>,
    build_dir: Option<PathBuf>,
    #[serde(default)]
    properties: BTreeMap<String, String>,
    #[serde(default)]
    configurations: Vec<ConfigurationFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigurationFile {
    name: String,
    #[serde(default = "default_resolvable")]
    resolvable: bool,
    #[serde(default)]
    components: Vec<ComponentFile>,
}

const fn default_resolvable() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ComponentFile {
    kind: String,
    path: Option<String>,
    group: Option<String>,
    name: Option<String>,
    version: Option<String>,
    #[serde(default)]
    artifacts: Vec<ArtifactFile>,
    #[serde(default)]
    dependencies: Vec<DependencyFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArtifactFile {
    #[serde(rename = "type")]
    artifact_type: String,
    classifier: Option<String>,
    extension: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DependencyFile {
    Resolved(String),
    Unresolved { requested: String, failure: String },
}

impl ConfigurationFile {
    fn into_configuration(self) -> Result<Configuration> {
        let components = self
            .components
            .into_iter()
            .map(|component| component.into_component(&self.name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Configuration {
            name: self.name,
            resolvable: self.resolvable,
            resolution: ResolutionResult { components },
        })
    }
}

impl ComponentFile {
    fn into_component(self, configuration: &str) -> Result<ResolvedComponent> {
        let id = match self.kind.as_str() {
            "project" => ComponentId::Project {
                path: self.path.ok_or_else(|| DepdotError::ProjectValidationError {
                    reason: format!(
                        "project component in configuration '{configuration}' is missing 'path'"
                    ),
                })?,
            },
            "module" => {
                let missing = |field: &str| DepdotError::ProjectValidationError {
                    reason: format!(
                        "module component in configuration '{configuration}' is missing '{field}'"
                    ),
                };
                ComponentId::Module {
                    group: self.group.ok_or_else(|| missing("group"))?,
                    name: self.name.ok_or_else(|| missing("name"))?,
                    version: self.version.ok_or_else(|| missing("version"))?,
                }
            }
            other => {
                return Err(DepdotError::UnsupportedComponentKind {
                    kind: other.to_string(),
                }
                .into());
            }
        };

        let artifacts = self
            .artifacts
            .into_iter()
            .map(|a| Artifact {
                artifact_type: a.artifact_type,
                classifier: a.classifier,
                extension: a.extension,
            })
            .collect();

        let dependencies = self
            .dependencies
            .into_iter()
            .map(|d| match d {
                DependencyFile::Resolved(target) => DependencyEdge::Resolved { target },
                DependencyFile::Unresolved { requested, failure } => {
                    DependencyEdge::Unresolved { requested, failure }
                }
            })
            .collect();

        Ok(ResolvedComponent {
            id,
            artifacts,
            dependencies,
        })
    }
}
