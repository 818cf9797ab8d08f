/// Domain models of the conversion: diagnostics, fragments, CVRF access, CSAF records
pub mod conversion_config;
pub mod csaf;
pub mod cvrf;
pub mod diagnostic;
pub mod fragment;

pub use conversion_config::{ConversionConfig, DEFAULT_CSAF_VERSION, FALLBACK_CVSS3_VERSION};
pub use diagnostic::{Diagnostic, Diagnostics, Severity};
pub use fragment::{Fragment, MergeConflict};
