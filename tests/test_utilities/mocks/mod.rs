/// Mock implementations for testing
mod mock_advisory_reader;
mod mock_diagnostic_reporter;

pub use mock_advisory_reader::MockAdvisoryReader;
pub use mock_diagnostic_reporter::MockDiagnosticReporter;
