use crate::conversion::domain::{Diagnostic, Severity};
use crate::ports::outbound::DiagnosticReporter;

/// TracingDiagnosticReporter adapter for logging conversion diagnostics
///
/// This adapter implements the DiagnosticReporter port on top of `tracing`,
/// so diagnostics end up on stderr next to the rest of the run's log output.
pub struct TracingDiagnosticReporter;

impl TracingDiagnosticReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingDiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticReporter for TracingDiagnosticReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Info => tracing::info!("{}", diagnostic.message),
            Severity::Warning => tracing::warn!("{}", diagnostic.message),
            Severity::Error => tracing::error!("{}", diagnostic.message),
            Severity::Critical => tracing::error!("CRITICAL: {}", diagnostic.message),
        }
    }

    fn report_completion(&self, message: &str) {
        tracing::info!("{}", message);
    }
}
