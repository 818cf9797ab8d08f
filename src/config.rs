//! Configuration file support for cvrf2csaf.
//!
//! Provides YAML-based configuration through `cvrf2csaf.config.yml` files,
//! including data structures, file loading, validation and the layering of
//! defaults, config file and command-line flags into [`Settings`].

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::adapters::outbound::formatters::DEFAULT_INDENT;
use crate::conversion::domain::ConversionConfig;
use crate::shared::error::ConversionError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "cvrf2csaf.config.yml";

/// Directory written to when neither config nor CLI name one
pub const DEFAULT_OUTPUT_DIR: &str = "./";

/// Largest accepted JSON indentation
pub const MAX_INDENT: usize = 8;

const SUPPORTED_CVSS3_VERSIONS: [&str; 2] = ["3.0", "3.1"];

/// A boolean as written by hand in YAML: `true`, `yes`, `1`, `"n"`, ...
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Switch {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Switch {
    /// The boolean this value stands for, if any
    pub fn resolve(&self) -> Option<bool> {
        match self {
            Switch::Bool(value) => Some(*value),
            Switch::Int(1) => Some(true),
            Switch::Int(0) => Some(false),
            Switch::Int(_) => None,
            Switch::Text(text) => match text.trim().to_lowercase().as_str() {
                "true" | "yes" | "1" | "y" => Some(true),
                "false" | "no" | "0" | "n" => Some(false),
                _ => None,
            },
        }
    }

    fn raw(&self) -> String {
        match self {
            Switch::Bool(value) => value.to_string(),
            Switch::Int(value) => value.to_string(),
            Switch::Text(text) => text.clone(),
        }
    }
}

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub csaf_version: Option<String>,
    pub publisher_name: Option<String>,
    pub publisher_namespace: Option<String>,
    pub fix_insert_current_version_into_revision_history: Option<Switch>,
    pub force_insert_default_reference_category: Option<Switch>,
    #[serde(rename = "remove_CVSS_values_without_vector")]
    pub remove_cvss_values_without_vector: Option<Switch>,
    pub force: Option<Switch>,
    #[serde(rename = "default_CVSS3_version")]
    pub default_cvss3_version: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub indent: Option<usize>,
    pub ensure_ascii: Option<Switch>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);
    tracing::debug!("Loaded config file {}", path.display());

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn invalid(key: &str, value: String, hint: &str) -> anyhow::Error {
    ConversionError::InvalidConfig {
        key: key.to_string(),
        value,
        hint: hint.to_string(),
    }
    .into()
}

/// Resolves an optional switch, naming `key` when the value is not a boolean
fn resolve_switch(key: &str, switch: Option<&Switch>) -> Result<Option<bool>> {
    switch
        .map(|switch| {
            switch.resolve().ok_or_else(|| {
                invalid(
                    key,
                    switch.raw(),
                    "Use true/yes/1/y or false/no/0/n for boolean settings",
                )
            })
        })
        .transpose()
}

/// Checks a CVSS v3 minor version given on the command line or in the config
pub fn validate_cvss3_version(key: &str, version: &str) -> Result<()> {
    if SUPPORTED_CVSS3_VERSIONS.contains(&version) {
        return Ok(());
    }
    Err(invalid(
        key,
        version.to_string(),
        "Supported CVSS v3 versions are 3.0 and 3.1",
    ))
}

pub fn validate_indent(key: &str, indent: usize) -> Result<()> {
    if indent <= MAX_INDENT {
        return Ok(());
    }
    Err(invalid(
        key,
        indent.to_string(),
        "Use an indentation between 0 and 8 spaces",
    ))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    for (key, switch) in config.switches() {
        resolve_switch(key, switch)?;
    }
    if let Some(version) = config.default_cvss3_version.as_deref() {
        validate_cvss3_version("default_CVSS3_version", version)?;
    }
    if let Some(indent) = config.indent {
        validate_indent("indent", indent)?;
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        tracing::warn!("Unknown config field '{}' will be ignored.", key);
    }
}

impl ConfigFile {
    fn switches(&self) -> [(&'static str, Option<&Switch>); 5] {
        [
            (
                "fix_insert_current_version_into_revision_history",
                self.fix_insert_current_version_into_revision_history
                    .as_ref(),
            ),
            (
                "force_insert_default_reference_category",
                self.force_insert_default_reference_category.as_ref(),
            ),
            (
                "remove_CVSS_values_without_vector",
                self.remove_cvss_values_without_vector.as_ref(),
            ),
            ("force", self.force.as_ref()),
            ("ensure_ascii", self.ensure_ascii.as_ref()),
        ]
    }
}

/// Fully resolved settings of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub conversion: ConversionConfig,
    /// Write the document even when it fails validation
    pub force: bool,
    pub output_dir: PathBuf,
    pub indent: usize,
    pub ensure_ascii: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            conversion: ConversionConfig::default(),
            force: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            indent: DEFAULT_INDENT,
            ensure_ascii: false,
        }
    }
}

impl Settings {
    /// Overlays every value the config file sets
    ///
    /// # Errors
    /// Returns an error if a boolean key holds something that is not a boolean
    pub fn apply_config(&mut self, file: &ConfigFile) -> Result<()> {
        let conversion = &mut self.conversion;
        if let Some(version) = &file.csaf_version {
            conversion.csaf_version = version.clone();
        }
        if let Some(name) = &file.publisher_name {
            conversion.publisher_name = Some(name.clone());
        }
        if let Some(namespace) = &file.publisher_namespace {
            conversion.publisher_namespace = Some(namespace.clone());
        }
        if let Some(version) = &file.default_cvss3_version {
            conversion.default_cvss3_version = version.clone();
        }

        let [fix_revision, default_reference, remove_cvss, force, ensure_ascii] = file
            .switches()
            .map(|(key, switch)| resolve_switch(key, switch));
        if let Some(value) = fix_revision? {
            conversion.fix_insert_current_version_into_revision_history = value;
        }
        if let Some(value) = default_reference? {
            conversion.force_insert_default_reference_category = value;
        }
        if let Some(value) = remove_cvss? {
            conversion.remove_cvss_values_without_vector = value;
        }
        if let Some(value) = force? {
            self.force = value;
        }
        if let Some(value) = ensure_ascii? {
            self.ensure_ascii = value;
        }

        if let Some(dir) = &file.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(indent) = file.indent {
            self.indent = indent;
        }
        Ok(())
    }
}
