use cvrf2csaf::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock DiagnosticReporter for testing that captures reported diagnostics
#[derive(Default, Clone)]
pub struct MockDiagnosticReporter {
    pub diagnostics: Arc<Mutex<Vec<Diagnostic>>>,
    pub completions: Arc<Mutex<Vec<String>>>,
}

impl MockDiagnosticReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().unwrap().clone()
    }

    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.get_diagnostics()
            .into_iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message)
            .collect()
    }

    pub fn get_completions(&self) -> Vec<String> {
        self.completions.lock().unwrap().clone()
    }
}

impl DiagnosticReporter for MockDiagnosticReporter {
    fn report(&self, diagnostic: &Diagnostic) {
        self.diagnostics.lock().unwrap().push(diagnostic.clone());
    }

    fn report_completion(&self, message: &str) {
        self.completions.lock().unwrap().push(message.to_string());
    }
}
