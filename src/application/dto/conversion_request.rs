use crate::conversion::domain::ConversionConfig;
use std::path::PathBuf;

/// ConversionRequest - Internal request DTO for the conversion use case
///
/// Carries the input path together with the settings resolved from
/// defaults, the config file and CLI flags.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Path to the CVRF XML advisory
    pub input_path: PathBuf,
    pub config: ConversionConfig,
}

impl ConversionRequest {
    pub fn new(input_path: PathBuf, config: ConversionConfig) -> Self {
        Self { input_path, config }
    }
}
