//! Integration tests for the `depdot export` command.

mod common;

use common::{SAMPLE_PROJECT, UNRESOLVED_PROJECT, depdot, write_project};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_export_writes_dot_file_under_build_dir() {
    let dir = TempDir::new().unwrap();
    let project = write_project(dir.path(), SAMPLE_PROJECT);

    depdot()
        .arg("--project")
        .arg(&project)
        .args(["export", "--configuration", "runtimeClasspath"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported configuration 'runtimeClasspath'"));

    let output = dir.path().join("build").join("dependencies.dot");
    let content = fs::read_to_string(output).unwrap();
    assert!(content.starts_with("digraph G {"));
    assert!(content.ends_with("}\n"));
}

#[test]
fn test_export_node_and_edge_structure() {
    let dir = TempDir::new().unwrap();
    let project = write_project(dir.path(), SAMPLE_PROJECT);

    depdot()
        .arg("--project")
        .arg(&project)
        .args(["export", "--configuration", "runtimeClasspath"])
        .assert()
        .success();

    let content =
        fs::read_to_string(dir.path().join("build").join("dependencies.dot")).unwrap();

    // Three nodes with ids assigned in discovery order, two edges from the root.
    assert!(content.contains("node_0 [label=\"project :\", shape=\"box\""));
    assert!(content.contains("node_1 [label=\"com.example:libA:1.0\", shape=\"oval\""));
    assert!(content.contains("node_2 [label=\"project :sub\", shape=\"box\""));
    assert!(content.contains("    node_0 -> node_1;"));
    assert!(content.contains("    node_0 -> node_2;"));
    assert_eq!(content.lines().filter(|l| l.contains(" [label=")).count(), 3);
    assert_eq!(content.lines().filter(|l| l.contains(" -> ")).count(), 2);
}

#[test]
fn test_export_is_reproducible() {
    let dir = TempDir::new().unwrap();
    let project = write_project(dir.path(), SAMPLE_PROJECT);
    let output = dir.path().join("build").join("dependencies.dot");

    depdot()
        .arg("--project")
        .arg(&project)
        .args(["export", "--configuration", "runtimeClasspath"])
        .assert()
        .success();
    let first = fs::read(&output).unwrap();

    depdot()
        .arg("--project")
        .arg(&project)
        .args(["export", "--configuration", "runtimeClasspath"])
        .assert()
        .success();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_show_artifacts_renders_tables() {
    let dir = TempDir::new().unwrap();
    let project = write_project(dir.path(), SAMPLE_PROJECT);

    depdot()
        .arg("--project")
        .arg(&project)
        .args([
            "export",
            "--configuration",
            "runtimeClasspath",
            "--show-artifacts",
        ])
        .assert()
        .success();

    let content =
        fs::read_to_string(dir.path().join("build").join("dependencies.dot")).unwrap();

    // libA has two artifacts: table node with one grey row each.
    assert!(content.contains("shape=\"none\""));
    assert_eq!(content.matches("BGCOLOR=\"lightgrey\"").count(), 2);
    assert!(content.contains("type: jar, classifier: sources"));
    // The components without artifacts keep their plain shapes.
    assert!(content.contains("label=\"project :\", shape=\"box\""));
}

#[test]
fn test_show_artifacts_via_property_override() {
    let dir = TempDir::new().unwrap();
    let project = write_project(dir.path(), SAMPLE_PROJECT);

    depdot()
        .arg("--project")
        .arg(&project)
        .args(["-P", "export.showArtifacts=true"])
        .args(["export", "--configuration", "runtimeClasspath"])
        .assert()
        .success();

    let content =
        fs::read_to_string(dir.path().join("build").join("dependencies.dot")).unwrap();
    assert!(content.contains("<TABLE"));
}

#[test]
fn test_custom_output_path_resolves_against_build_dir() {
    let dir = TempDir::new().unwrap();
    let project = write_project(dir.path(), SAMPLE_PROJECT);

    depdot()
        .arg("--project")
        .arg(&project)
        .args([
            "export",
            "--configuration",
            "runtimeClasspath",
            "--output",
            "graphs/deps.dot",
        ])
        .assert()
        .success();

    assert!(dir.path().join("build").join("graphs").join("deps.dot").exists());
}

#[test]
fn test_missing_configuration_lists_resolvable_names() {
    let dir = TempDir::new().unwrap();
    let project = write_project(dir.path(), SAMPLE_PROJECT);

    depdot()
        .arg("--project")
        .arg(&project)
        .args(["export", "--configuration", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration 'nope' doesn't exist"))
        .stderr(predicate::str::contains("'runtimeClasspath'"));
}

#[test]
fn test_default_configuration_name_is_default() {
    let dir = TempDir::new().unwrap();
    let project = write_project(dir.path(), SAMPLE_PROJECT);

    // No --configuration flag: falls back to 'default', which doesn't exist
    // in the sample project.
    depdot()
        .arg("--project")
        .arg(&project)
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration 'default'"));
}

#[test]
fn test_unresolved_dependency_aborts_export() {
    let dir = TempDir::new().unwrap();
    let project = write_project(dir.path(), UNRESOLVED_PROJECT);

    depdot()
        .arg("--project")
        .arg(&project)
        .args(["export", "--configuration", "default"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("com.example:gone:2.0"))
        .stderr(predicate::str::contains("Could not find com.example:gone:2.0"));
}

#[test]
fn test_invalid_show_artifacts_property_rejected() {
    let dir = TempDir::new().unwrap();
    let project = write_project(dir.path(), SAMPLE_PROJECT);

    depdot()
        .arg("--project")
        .arg(&project)
        .args(["-P", "export.showArtifacts=maybe"])
        .args(["export", "--configuration", "runtimeClasspath"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("export.showArtifacts"));
}

#[test]
fn test_project_discovery_walks_parent_directories() {
    let dir = TempDir::new().unwrap();
    write_project(dir.path(), SAMPLE_PROJECT);
    let nested = dir.path().join("sub").join("dir");
    fs::create_dir_all(&nested).unwrap();

    depdot()
        .current_dir(&nested)
        .args(["export", "--configuration", "runtimeClasspath"])
        .assert()
        .success();

    assert!(dir.path().join("build").join("dependencies.dot").exists());
}

#[test]
fn test_missing_project_file_reports_not_found() {
    let dir = TempDir::new().unwrap();

    depdot()
        .current_dir(dir.path())
        .args(["export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("depdot.toml not found"));
}
