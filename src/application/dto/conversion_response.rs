use crate::conversion::domain::Diagnostics;
use serde_json::Value;

/// ConversionResponse - Internal response DTO for the conversion use case
///
/// The document is present even when it is invalid; callers decide from
/// `is_valid` and the diagnostics whether it gets written.
#[derive(Debug, Clone)]
pub struct ConversionResponse {
    pub document: Value,
    pub diagnostics: Diagnostics,
    pub is_valid: bool,
    /// Cleansed tracking identifier, if the advisory had one
    pub identifier: Option<String>,
    /// File name derived from the identifier and validity
    pub file_name: String,
}

impl ConversionResponse {
    /// True when a CRITICAL diagnostic forbids writing any output
    pub fn is_fatal(&self) -> bool {
        self.diagnostics.has_critical()
    }
}
