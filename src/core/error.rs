//! Error handling for depdot.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`DepdotError`]) for precise handling in code
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions
//!    for CLI users
//!
//! Every failure is fatal to the current operation: nothing in this tool is
//! retried or partially recovered. Errors are produced at the library seams as
//! [`DepdotError`] values, travel through the application layer as
//! [`anyhow::Error`], and are converted back into a displayable
//! [`ErrorContext`] at the binary boundary via [`user_friendly_error`].
//!
//! # Error Categories
//!
//! - **Configuration**: [`DepdotError::ConfigurationNotFound`] — the requested
//!   dependency configuration is absent or not resolvable; the message
//!   enumerates the valid alternatives.
//! - **Resolution**: [`DepdotError::UnresolvedDependency`] — an edge in the
//!   graph failed to resolve upstream; the original failure text is carried
//!   unchanged.
//! - **Unsupported input**: [`DepdotError::UnsupportedComponentKind`] —
//!   defensive, indicates the snapshot came from a host whose component model
//!   we do not understand.
//! - **External tool**: [`DepdotError::GraphvizNotFound`] and
//!   [`DepdotError::GraphvizFailed`] — the renderer subprocess could not be
//!   located or exited non-zero.
//! - **Project file**: [`DepdotError::ProjectNotFound`],
//!   [`DepdotError::ProjectParseError`],
//!   [`DepdotError::ProjectValidationError`].

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for depdot operations.
///
/// Each variant represents a specific failure mode and carries the context
/// needed to report it: file paths, configuration names, upstream failure
/// text. Messages are written for end users, not just developers.
#[derive(Error, Debug)]
pub enum DepdotError {
    /// The requested dependency configuration does not exist or is not
    /// flagged as resolvable.
    ///
    /// The message enumerates the resolvable configuration names so the
    /// caller can correct the input, mirroring what a build tool would print.
    #[error(
        "Configuration '{name}' doesn't exist or cannot be resolved, \
         resolvable configurations in this project are {resolvable}"
    )]
    ConfigurationNotFound {
        /// The configuration name that was requested
        name: String,
        /// Bracketed, quoted list of resolvable configuration names
        resolvable: String,
    },

    /// A dependency edge in the resolved graph failed to resolve upstream.
    ///
    /// The export is aborted as a whole; the upstream failure text is
    /// propagated unchanged so the root cause stays visible.
    #[error("Failed to resolve dependency '{requested}': {failure}")]
    UnresolvedDependency {
        /// The dependency as it was requested (coordinate or project path)
        requested: String,
        /// The upstream resolution failure, verbatim
        failure: String,
    },

    /// A component in the snapshot declared an identity kind other than
    /// `project` or `module`.
    ///
    /// Defensive: this means the snapshot was produced by a host whose
    /// component model has grown beyond what this tool understands.
    #[error("Unsupported component kind '{kind}'")]
    UnsupportedComponentKind {
        /// The unrecognized kind string from the snapshot
        kind: String,
    },

    /// The Graphviz executable could not be found.
    #[error("Graphviz executable '{executable}' not found in PATH")]
    GraphvizNotFound {
        /// The executable name or path that was looked up
        executable: String,
    },

    /// The Graphviz subprocess exited with a non-zero status.
    #[error("Error invoking '{tool}': exited with status {status}")]
    GraphvizFailed {
        /// The external tool that failed
        tool: String,
        /// The exit status as reported by the OS
        status: String,
    },

    /// Project snapshot file not found.
    #[error("Project file depdot.toml not found in current directory or any parent directory")]
    ProjectNotFound,

    /// Project snapshot parsing error.
    #[error("Invalid project file syntax in {file}")]
    ProjectParseError {
        /// Path to the file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Project snapshot validation error.
    #[error("Project validation failed: {reason}")]
    ProjectValidationError {
        /// Reason why validation failed
        reason: String,
    },

    /// A property override carried a value the target field cannot accept.
    #[error("Invalid value '{value}' for property '{key}': {reason}")]
    InvalidPropertyValue {
        /// The flat property key, e.g. `export.showArtifacts`
        key: String,
        /// The offending value
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information.
///
/// Wraps a [`DepdotError`] with optional suggestions and details. When
/// displayed, errors show:
/// 1. **Error**: the main message, in red
/// 2. **Details**: additional context, in yellow (optional)
/// 3. **Suggestion**: actionable steps to resolve the issue, in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DepdotError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: DepdotError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion, displayed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining why the error occurred, displayed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with suggestions.
///
/// This is the main entry point for converting arbitrary errors into
/// user-friendly messages for CLI display. [`DepdotError`] values get
/// tailored suggestions; everything else is reported with its full cause
/// chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<DepdotError>() {
        Ok(depdot_error) => return create_error_context(depdot_error),
        Err(other) => other,
    };

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(DepdotError::ProjectParseError {
            file: "depdot.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion(
            "Check the TOML syntax in your depdot.toml file. Verify quotes, brackets, and indentation",
        );
    }

    // Generic error: include the full error chain for better diagnostics.
    let mut message = error.to_string();
    let chain: Vec<String> = error
        .chain()
        .skip(1)
        .map(std::string::ToString::to_string)
        .collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(DepdotError::Other { message })
}

/// Map each [`DepdotError`] variant to a context with tailored suggestions.
fn create_error_context(error: DepdotError) -> ErrorContext {
    match &error {
        DepdotError::ConfigurationNotFound { .. } => ErrorContext::new(error).with_suggestion(
            "Pick one of the listed configurations with --configuration or \
             the export.configurationName property",
        ),
        DepdotError::UnresolvedDependency { .. } => ErrorContext::new(error)
            .with_details(
                "The resolved graph contains an edge whose resolution failed upstream; \
                 the export was aborted and its output is unreliable",
            )
            .with_suggestion(
                "Fix the resolution failure in the host build and regenerate the snapshot",
            ),
        DepdotError::UnsupportedComponentKind { .. } => ErrorContext::new(error)
            .with_details("Only 'project' and 'module' component kinds are supported"),
        DepdotError::GraphvizNotFound { .. } => ErrorContext::new(error).with_suggestion(
            "Install Graphviz (https://graphviz.org/download/) or point \
             render.graphvizExecutable at the executable",
        ),
        DepdotError::GraphvizFailed { .. } => ErrorContext::new(error).with_details(
            "The renderer subprocess inherited this terminal's streams; \
             its own error output is above",
        ),
        DepdotError::ProjectNotFound => ErrorContext::new(error)
            .with_suggestion("Create a depdot.toml snapshot or pass --project <path>"),
        DepdotError::ProjectParseError { .. } => {
            ErrorContext::new(error).with_suggestion("Check the TOML syntax in the project file")
        }
        _ => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_not_found_message_enumerates_names() {
        let error = DepdotError::ConfigurationNotFound {
            name: "missing".to_string(),
            resolvable: "['default', 'runtimeClasspath']".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("'missing'"));
        assert!(message.contains("'default'"));
        assert!(message.contains("'runtimeClasspath'"));
    }

    #[test]
    fn test_unresolved_dependency_carries_upstream_failure() {
        let error = DepdotError::UnresolvedDependency {
            requested: "com.example:gone:2.0".to_string(),
            failure: "Could not find com.example:gone:2.0".to_string(),
        };
        assert!(
            error
                .to_string()
                .contains("Could not find com.example:gone:2.0")
        );
    }

    #[test]
    fn test_error_context_display_format() {
        let context = ErrorContext::new(DepdotError::ProjectNotFound)
            .with_details("some details")
            .with_suggestion("some suggestion");
        let text = context.to_string();
        assert!(text.contains("depdot.toml"));
        assert!(text.contains("Details: some details"));
        assert!(text.contains("Suggestion: some suggestion"));
    }

    #[test]
    fn test_user_friendly_error_downcasts_depdot_errors() {
        let error = anyhow::Error::from(DepdotError::GraphvizNotFound {
            executable: "dot".to_string(),
        });
        let context = user_friendly_error(error);
        assert!(matches!(
            context.error,
            DepdotError::GraphvizNotFound { .. }
        ));
        assert!(context.suggestion.is_some());
    }

    #[test]
    fn test_user_friendly_error_keeps_cause_chain() {
        let root = anyhow::anyhow!("root cause");
        let wrapped = root.context("outer context");
        let context = user_friendly_error(wrapped);
        let message = context.error.to_string();
        assert!(message.contains("outer context"));
        assert!(message.contains("Caused by:"));
        assert!(message.contains("root cause"));
    }
}
