//! The in-memory model of a resolved dependency graph.
//!
//! A [`ResolutionResult`] is what the host build system hands us after
//! dependency resolution has already happened: a set of
//! [`ResolvedComponent`]s in the host's enumeration order, each exposing the
//! dependency edges that were selected for it. depdot treats this model as
//! read-only — it never resolves anything itself.
//!
//! Component identity is a closed two-variant enum: a component is either
//! local to the build ([`ComponentId::Project`]) or an external published
//! module ([`ComponentId::Module`]). Snapshots declaring any other kind are
//! rejected at load time, so code matching on [`ComponentId`] can be
//! exhaustive.

/// Identity of a resolved component.
///
/// Exactly two kinds exist. The display name mirrors what build tools print:
/// `project :sub` for local projects, `group:name:version` for modules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// A project-local component, identified by its project path (e.g. `:sub`).
    Project {
        /// The project path within the build (e.g. `:` or `:sub:util`)
        path: String,
    },
    /// An external published module, identified by its coordinates.
    Module {
        /// Group / organization (e.g. `com.example`)
        group: String,
        /// Module name
        name: String,
        /// Resolved version
        version: String,
    },
}

impl ComponentId {
    /// Human-readable display name, used as the node label in exports.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Project { path } => format!("project {path}"),
            Self::Module {
                group,
                name,
                version,
            } => format!("{group}:{name}:{version}"),
        }
    }

    /// Whether this component is local to the build.
    #[must_use]
    pub const fn is_project(&self) -> bool {
        matches!(self, Self::Project { .. })
    }
}

/// A physical artifact realized for a component.
///
/// Purely additive to node labeling when artifact display is enabled; never
/// affects graph topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Artifact type (e.g. `jar`, `aar`)
    pub artifact_type: String,
    /// Optional classifier (e.g. `sources`, `javadoc`)
    pub classifier: Option<String>,
    /// Optional file extension; conventionally equal to the type
    pub extension: Option<String>,
}

impl Artifact {
    /// Render the artifact as `type: T, classifier: C, extension: E`.
    ///
    /// Empty fields are dropped, and the extension is dropped when it equals
    /// the type (the common case, where repeating it adds nothing).
    #[must_use]
    pub fn description(&self) -> String {
        let extension = self
            .extension
            .as_deref()
            .filter(|ext| *ext != self.artifact_type);

        [
            ("type", Some(self.artifact_type.as_str())),
            ("classifier", self.classifier.as_deref()),
            ("extension", extension),
        ]
        .into_iter()
        .filter_map(|(key, value)| match value {
            Some(value) if !value.is_empty() => Some(format!("{key}: {value}")),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// A directed dependency edge as the host resolved it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyEdge {
    /// The dependency resolved; `target` is the selected component's display
    /// name, which must belong to a component in the same [`ResolutionResult`].
    Resolved {
        /// Display name of the selected child component
        target: String,
    },
    /// The dependency failed to resolve upstream. Any unresolved edge aborts
    /// an export as a whole.
    Unresolved {
        /// The dependency as it was requested
        requested: String,
        /// The upstream failure text, verbatim
        failure: String,
    },
}

/// A resolved node in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedComponent {
    /// Identity of the component
    pub id: ComponentId,
    /// Artifacts realized for this component (may be empty)
    pub artifacts: Vec<Artifact>,
    /// Dependency edges declared by this component, in declaration order
    pub dependencies: Vec<DependencyEdge>,
}

impl ResolvedComponent {
    /// Display name of this component's identity.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.id.display_name()
    }
}

/// The full resolved component set reachable from a configuration's root.
///
/// Components are stored in the host's enumeration order; that order drives
/// the deterministic node-id assignment during export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionResult {
    /// All resolved components, in enumeration order
    pub components: Vec<ResolvedComponent>,
}
