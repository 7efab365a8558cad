//! depdot — export resolved dependency graphs to Graphviz DOT and render
//! them.
//!
//! depdot consumes a **resolution snapshot** (`depdot.toml`): a description
//! of a build project's named dependency configurations and, for each, the
//! dependency graph the host build system already resolved. It never
//! performs dependency resolution itself — the snapshot is the boundary with
//! the host.
//!
//! # Architecture Overview
//!
//! - [`project`] — snapshot loading, validation, and configuration lookup
//! - [`graph`] — the in-memory resolved-graph model (components, artifacts,
//!   edges)
//! - [`export`] — the two-pass DOT exporter with deterministic node ids
//! - [`render`] — synchronous Graphviz subprocess invocation
//! - [`cli`] — the `export`, `render` and `list` commands
//! - [`core`] — the error taxonomy and user-facing error reporting
//! - [`utils`] — small filesystem helpers
//!
//! Everything is single-threaded and synchronous; the only blocking
//! operation is the Graphviz subprocess, awaited to completion. Every error
//! is fatal to the current operation — there are no retries and no partial
//! successes.
//!
//! # Example
//!
//! ```bash
//! # Export the runtimeClasspath configuration to build/dependencies.dot
//! depdot export --configuration runtimeClasspath
//!
//! # Render it to SVG, overriding the renderer format via a property
//! depdot render --configuration runtimeClasspath -P render.format=svg
//! ```

pub mod cli;
pub mod core;
pub mod export;
pub mod graph;
pub mod project;
pub mod render;
pub mod utils;
