use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a clean conversion,
/// a conversion that produced an invalid document, and outright failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the converted document is valid
    Success = 0,
    /// The conversion finished but the resulting document is invalid
    InvalidDocument = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unreadable input, bad configuration, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidDocument => write!(f, "Invalid Document (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for advisory conversion.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Input file not found: {path}\n\n💡 Hint: {suggestion}")]
    InputNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse CVRF input: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the input is well-formed CVRF v1.2 XML")]
    InputParseError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory is writable")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid configuration value for '{key}': {value}\n\n💡 Hint: {hint}")]
    InvalidConfig {
        key: String,
        value: String,
        hint: String,
    },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

/// Structural problems met while a handler walks its CVRF subtree.
///
/// These never leave a handler: `Handler::load` turns them into diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("missing element {child} below {parent}")]
    MissingElement { parent: String, child: &'static str },

    #[error("missing attribute {attribute} on {element}")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("element {element} carries no text")]
    MissingText { element: String },
}
