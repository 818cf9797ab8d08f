use crate::shared::Result;
use serde_json::Value;

/// CsafFormatter port for serializing the assembled CSAF document
pub trait CsafFormatter {
    /// Formats the CSAF document as text
    ///
    /// # Arguments
    /// * `document` - The assembled CSAF document
    ///
    /// # Returns
    /// Formatted document content as a string
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, document: &Value) -> Result<String>;
}
