/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, console, etc.).
pub mod advisory_reader;
pub mod diagnostic_reporter;
pub mod formatter;
pub mod output_presenter;

pub use advisory_reader::AdvisoryReader;
pub use diagnostic_reporter::DiagnosticReporter;
pub use formatter::CsafFormatter;
pub use output_presenter::OutputPresenter;
