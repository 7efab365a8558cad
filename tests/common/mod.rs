//! Common test utilities and fixtures for depdot integration tests.

// Not every helper is used by every integration test file.
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// A snapshot with one resolvable configuration: root project depending on
/// an external module and a subproject.
pub const SAMPLE_PROJECT: &str = r#"
name = "demo"

[[configurations]]
name = "runtimeClasspath"

[[configurations.components]]
kind = "project"
path = ":"
dependencies = ["com.example:libA:1.0", "project :sub"]

[[configurations.components]]
kind = "module"
group = "com.example"
name = "libA"
version = "1.0"

[[configurations.components.artifacts]]
type = "jar"
extension = "jar"

[[configurations.components.artifacts]]
type = "jar"
classifier = "sources"

[[configurations.components]]
kind = "project"
path = ":sub"
"#;

/// A snapshot whose only configuration contains an unresolved edge.
pub const UNRESOLVED_PROJECT: &str = r#"
[[configurations]]
name = "default"

[[configurations.components]]
kind = "project"
path = ":"
dependencies = [{ requested = "com.example:gone:2.0", failure = "Could not find com.example:gone:2.0" }]
"#;

/// Write a snapshot file named depdot.toml into `dir`.
pub fn write_project(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("depdot.toml");
    fs::write(&path, content).unwrap();
    path
}

/// A command invoking the depdot binary under test.
pub fn depdot() -> Command {
    Command::cargo_bin("depdot").unwrap()
}

/// Write an executable stub script that records its arguments and exits with
/// `exit_code`. Returns the script path.
#[cfg(unix)]
pub fn write_stub_renderer(dir: &Path, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let args_file = dir.join("renderer-args.txt");
    let script = dir.join("fake-dot");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\nexit {exit_code}\n",
            args_file.display()
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

/// Arguments recorded by the stub renderer, one per line.
#[cfg(unix)]
pub fn recorded_renderer_args(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("renderer-args.txt"))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
