/// Console adapters for user-facing log output
mod tracing_diagnostic_reporter;

pub use tracing_diagnostic_reporter::TracingDiagnosticReporter;
