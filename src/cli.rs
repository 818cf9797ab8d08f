use clap::Parser;
use std::path::PathBuf;

use cvrf2csaf::config::{validate_indent, Settings};
use cvrf2csaf::shared::Result;

/// CVSS v3 minor versions accepted for score sets that do not name one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cvss3Version {
    V3_0,
    V3_1,
}

impl std::str::FromStr for Cvss3Version {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "3.0" => Ok(Cvss3Version::V3_0),
            "3.1" => Ok(Cvss3Version::V3_1),
            _ => Err(format!(
                "Invalid CVSS v3 version: {}. Please specify '3.0' or '3.1'",
                s
            )),
        }
    }
}

impl Cvss3Version {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cvss3Version::V3_0 => "3.0",
            Cvss3Version::V3_1 => "3.1",
        }
    }
}

/// Convert CVRF v1.2 XML advisories into CSAF v2.0 JSON documents
#[derive(Parser, Debug)]
#[command(name = "cvrf2csaf")]
#[command(version)]
#[command(about = "Convert CVRF v1.2 XML advisories into CSAF v2.0 JSON documents", long_about = None)]
pub struct Args {
    /// CVRF XML input file to convert
    #[arg(long, value_name = "PATH")]
    pub input_file: PathBuf,

    /// Directory the CSAF document is written to (default: ./)
    #[arg(long, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,

    /// Also print the CSAF document to stdout
    #[arg(long)]
    pub print: bool,

    /// Write the document even when it fails validation
    #[arg(long)]
    pub force: bool,

    /// Config file (default: ./cvrf2csaf.config.yml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Publisher name used when the input does not provide one
    #[arg(long)]
    pub publisher_name: Option<String>,

    /// Publisher namespace used when the input does not provide one
    #[arg(long)]
    pub publisher_namespace: Option<String>,

    /// Append the current version to the revision history when it is missing there
    #[arg(long)]
    pub fix_insert_current_version_into_revision_history: bool,

    /// Use category "external" for references without a Type
    #[arg(long)]
    pub force_insert_default_reference_category: bool,

    /// Drop CVSS score sets that carry no vector
    #[arg(long = "remove-CVSS-values-without-vector")]
    pub remove_cvss_values_without_vector: bool,

    /// CVSS v3 version assumed when neither namespace nor vector names one
    #[arg(long = "default-CVSS3-version", value_name = "VERSION")]
    pub default_cvss3_version: Option<Cvss3Version>,

    /// JSON indentation in spaces
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,

    /// Escape all non-ASCII characters in the JSON output
    #[arg(long)]
    pub ensure_ascii: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Overlays the flags given on the command line onto `settings`
    ///
    /// Boolean flags can only switch a setting on.
    ///
    /// # Errors
    /// Returns an error if `--indent` is out of range
    pub fn apply_to(&self, settings: &mut Settings) -> Result<()> {
        let conversion = &mut settings.conversion;
        if let Some(name) = &self.publisher_name {
            conversion.publisher_name = Some(name.clone());
        }
        if let Some(namespace) = &self.publisher_namespace {
            conversion.publisher_namespace = Some(namespace.clone());
        }
        if let Some(version) = self.default_cvss3_version {
            conversion.default_cvss3_version = version.as_str().to_string();
        }
        conversion.fix_insert_current_version_into_revision_history |=
            self.fix_insert_current_version_into_revision_history;
        conversion.force_insert_default_reference_category |=
            self.force_insert_default_reference_category;
        conversion.remove_cvss_values_without_vector |= self.remove_cvss_values_without_vector;

        settings.force |= self.force;
        settings.ensure_ascii |= self.ensure_ascii;
        if let Some(dir) = &self.output_dir {
            settings.output_dir = dir.clone();
        }
        if let Some(indent) = self.indent {
            validate_indent("--indent", indent)?;
            settings.indent = indent;
        }
        Ok(())
    }
}
