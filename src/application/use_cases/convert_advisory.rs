use crate::application::dto::{ConversionRequest, ConversionResponse};
use crate::conversion::services::{derive_csaf_filename, DocumentAssembler};
use crate::ports::inbound::ConversionPort;
use crate::ports::outbound::{AdvisoryReader, DiagnosticReporter};
use crate::shared::error::ConversionError;
use crate::shared::Result;
use roxmltree::Document;

/// ConvertAdvisoryUseCase - Core use case for CVRF to CSAF conversion
///
/// This use case orchestrates one conversion run using generic dependency
/// injection for its infrastructure dependencies.
///
/// # Type Parameters
/// * `AR` - AdvisoryReader implementation
/// * `DR` - DiagnosticReporter implementation
pub struct ConvertAdvisoryUseCase<AR, DR> {
    advisory_reader: AR,
    diagnostic_reporter: DR,
}

impl<AR, DR> ConvertAdvisoryUseCase<AR, DR>
where
    AR: AdvisoryReader,
    DR: DiagnosticReporter,
{
    /// Creates a new ConvertAdvisoryUseCase with injected dependencies
    pub fn new(advisory_reader: AR, diagnostic_reporter: DR) -> Self {
        Self {
            advisory_reader,
            diagnostic_reporter,
        }
    }

    /// Executes the conversion use case
    ///
    /// # Arguments
    /// * `request` - Input path and resolved conversion settings
    ///
    /// # Returns
    /// ConversionResponse with the CSAF document, its diagnostics and the derived file name
    pub fn execute(&self, request: ConversionRequest) -> Result<ConversionResponse> {
        // Step 1: Read the advisory
        let xml = self.advisory_reader.read_advisory(&request.input_path)?;

        // Step 2: Parse the XML tree
        let tree = Document::parse(&xml).map_err(|e| ConversionError::InputParseError {
            path: request.input_path.clone(),
            details: e.to_string(),
        })?;
        tracing::debug!("Parsed CVRF input {}", request.input_path.display());

        // Step 3: Run the handlers
        let assembled = DocumentAssembler::new(request.config).assemble(tree.root_element());

        // Step 4: Surface diagnostics
        for diagnostic in &assembled.diagnostics {
            self.diagnostic_reporter.report(diagnostic);
        }
        self.diagnostic_reporter
            .report_completion(&Self::completion_message(assembled.is_valid));

        // Step 5: Build the response
        let file_name = derive_csaf_filename(assembled.identifier.as_deref(), assembled.is_valid);
        Ok(ConversionResponse {
            document: assembled.document,
            diagnostics: assembled.diagnostics,
            is_valid: assembled.is_valid,
            identifier: assembled.identifier,
            file_name,
        })
    }

    fn completion_message(is_valid: bool) -> String {
        if is_valid {
            "Conversion finished, CSAF document is valid".to_string()
        } else {
            "Conversion finished, CSAF document is invalid".to_string()
        }
    }
}

impl<AR, DR> ConversionPort for ConvertAdvisoryUseCase<AR, DR>
where
    AR: AdvisoryReader,
    DR: DiagnosticReporter,
{
    fn convert(&self, request: ConversionRequest) -> Result<ConversionResponse> {
        self.execute(request)
    }
}
