//! cvrf2csaf - CVRF v1.2 to CSAF v2.0 advisory converter
//!
//! This library converts CVRF v1.2 XML security advisories into CSAF v2.0
//! JSON documents, following hexagonal architecture principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Conversion core** (`conversion`): Handlers, vocabulary policies and the document assembler
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Configuration** (`config`): Config file loading and settings layering
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use cvrf2csaf::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let use_case =
//!     ConvertAdvisoryUseCase::new(FileSystemReader::new(), TracingDiagnosticReporter::new());
//!
//! let request = ConversionRequest::new(PathBuf::from("advisory.xml"), ConversionConfig::default());
//! let response = use_case.execute(request)?;
//!
//! let output = CsafJsonFormatter::default().format(&response.document)?;
//! println!("{} -> {}", response.file_name, output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod conversion;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::TracingDiagnosticReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::CsafJsonFormatter;
    pub use crate::application::dto::{ConversionRequest, ConversionResponse};
    pub use crate::application::use_cases::ConvertAdvisoryUseCase;
    pub use crate::conversion::domain::{ConversionConfig, Diagnostic, Diagnostics, Severity};
    pub use crate::conversion::services::{derive_csaf_filename, DocumentAssembler};
    pub use crate::ports::inbound::ConversionPort;
    pub use crate::ports::outbound::{
        AdvisoryReader, CsafFormatter, DiagnosticReporter, OutputPresenter,
    };
    pub use crate::shared::Result;
}
