/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to correct output, using `assert_cmd` and `tempfile` for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Write a config file at the specified path.
fn write_config(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

fn read_json(path: PathBuf) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ============================================================================
// Config discovery
// ============================================================================

#[test]
fn test_config_discovered_in_working_directory() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir.path().join("cvrf2csaf.config.yml"),
        r#"
publisher_name: Discovered Publisher
output_dir: csaf
indent: 0
"#,
    );

    cargo_bin_cmd!("cvrf2csaf")
        .current_dir(dir.path())
        .arg("--input-file")
        .arg(fixture("minimal.xml"))
        .assert()
        .success();

    let written = dir.path().join("csaf").join("acme_sa_2017.json");
    let raw = fs::read_to_string(&written).unwrap();
    assert!(raw.starts_with("{\n\"document\""));
    let document = read_json(written);
    assert_eq!(
        document["document"]["publisher"]["name"],
        serde_json::json!("Discovered Publisher")
    );
}

#[test]
fn test_explicit_config_path() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("custom.yml");
    write_config(
        &config_path,
        r#"
force_insert_default_reference_category: yes
output_dir: out
"#,
    );

    cargo_bin_cmd!("cvrf2csaf")
        .current_dir(dir.path())
        .arg("--input-file")
        .arg(fixture("reference_without_type.xml"))
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let document = read_json(dir.path().join("out").join("acme_sa_2017.json"));
    assert_eq!(
        document["document"]["references"][0]["category"],
        serde_json::json!("external")
    );
}

#[test]
fn test_missing_explicit_config_is_error() {
    let dir = TempDir::new().unwrap();
    cargo_bin_cmd!("cvrf2csaf")
        .current_dir(dir.path())
        .arg("--input-file")
        .arg(fixture("minimal.xml"))
        .args(["--config", "does-not-exist.yml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to read config file"));
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_invalid_boolean_in_config() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir.path().join("cvrf2csaf.config.yml"),
        "remove_CVSS_values_without_vector: sometimes\n",
    );

    cargo_bin_cmd!("cvrf2csaf")
        .current_dir(dir.path())
        .arg("--input-file")
        .arg(fixture("minimal.xml"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("remove_CVSS_values_without_vector"))
        .stderr(predicate::str::contains("sometimes"));
}

#[test]
fn test_unsupported_cvss3_version_in_config() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir.path().join("cvrf2csaf.config.yml"),
        "default_CVSS3_version: \"3.2\"\n",
    );

    cargo_bin_cmd!("cvrf2csaf")
        .current_dir(dir.path())
        .arg("--input-file")
        .arg(fixture("minimal.xml"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("default_CVSS3_version"));
}

#[test]
fn test_unknown_config_key_warns() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir.path().join("cvrf2csaf.config.yml"),
        "output_format: xml\n",
    );

    cargo_bin_cmd!("cvrf2csaf")
        .current_dir(dir.path())
        .arg("--input-file")
        .arg(fixture("minimal.xml"))
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Unknown config field 'output_format' will be ignored.",
        ));
}

// ============================================================================
// Layering
// ============================================================================

#[test]
fn test_cli_overrides_config_values() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir.path().join("cvrf2csaf.config.yml"),
        r#"
publisher_name: Config Publisher
output_dir: from-config
"#,
    );

    cargo_bin_cmd!("cvrf2csaf")
        .current_dir(dir.path())
        .arg("--input-file")
        .arg(fixture("minimal.xml"))
        .args(["--publisher-name", "CLI Publisher"])
        .args(["--output-dir", "from-cli"])
        .assert()
        .success();

    assert!(!dir.path().join("from-config").exists());
    let document = read_json(dir.path().join("from-cli").join("acme_sa_2017.json"));
    assert_eq!(
        document["document"]["publisher"]["name"],
        serde_json::json!("CLI Publisher")
    );
}

#[test]
fn test_force_from_config_writes_invalid_document() {
    let dir = TempDir::new().unwrap();
    write_config(&dir.path().join("cvrf2csaf.config.yml"), "force: y\n");

    cargo_bin_cmd!("cvrf2csaf")
        .current_dir(dir.path())
        .arg("--input-file")
        .arg(fixture("invalid_status.xml"))
        .assert()
        .code(1);

    assert!(dir.path().join("acme_sa_2017_invalid.json").is_file());
}

#[test]
fn test_csaf_version_from_config() {
    let dir = TempDir::new().unwrap();
    write_config(
        &dir.path().join("cvrf2csaf.config.yml"),
        "csaf_version: \"2.0\"\nensure_ascii: false\n",
    );

    cargo_bin_cmd!("cvrf2csaf")
        .current_dir(dir.path())
        .arg("--input-file")
        .arg(fixture("minimal.xml"))
        .assert()
        .success();

    let document = read_json(dir.path().join("acme_sa_2017.json"));
    assert_eq!(
        document["document"]["csaf_version"],
        serde_json::json!("2.0")
    );
}
