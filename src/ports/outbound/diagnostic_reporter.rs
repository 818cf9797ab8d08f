use crate::conversion::domain::Diagnostic;

/// DiagnosticReporter port for surfacing conversion diagnostics
///
/// The conversion core returns diagnostics as values; this port decides how
/// they reach the user (log lines, collected lists in tests, ...).
pub trait DiagnosticReporter {
    /// Reports one diagnostic produced during conversion
    fn report(&self, diagnostic: &Diagnostic);

    /// Reports completion of an operation
    ///
    /// # Arguments
    /// * `message` - Completion message
    fn report_completion(&self, message: &str);
}
