use crate::application::dto::{ConversionRequest, ConversionResponse};
use crate::shared::Result;

/// ConversionPort - Inbound port for the advisory conversion use case
///
/// This port defines the interface that external adapters (CLI, tests, ...)
/// use to trigger a CVRF to CSAF conversion.
pub trait ConversionPort {
    /// Converts the advisory named in the request
    ///
    /// # Errors
    /// Returns an error if:
    /// - The input file cannot be read
    /// - The input is not well-formed XML
    ///
    /// An invalid CSAF document is not an error; it is reported through
    /// `ConversionResponse::is_valid`.
    fn convert(&self, request: ConversionRequest) -> Result<ConversionResponse>;
}
