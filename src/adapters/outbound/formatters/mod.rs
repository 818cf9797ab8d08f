/// Formatter adapters for the CSAF output document
mod csaf_json_formatter;

pub use csaf_json_formatter::{CsafJsonFormatter, DEFAULT_INDENT};
