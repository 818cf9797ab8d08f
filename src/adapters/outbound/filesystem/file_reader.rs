use crate::ports::outbound::AdvisoryReader;
use crate::shared::error::ConversionError;
use crate::shared::security::{validate_input_file, MAX_INPUT_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading CVRF advisories from the file system
///
/// Every read goes through the shared security checks first: no symlinks,
/// regular files only, bounded size.
pub struct FileSystemReader {
    max_size: u64,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self {
            max_size: MAX_INPUT_SIZE,
        }
    }

    /// Reader with a custom size limit in bytes
    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvisoryReader for FileSystemReader {
    fn read_advisory(&self, path: &Path) -> Result<String> {
        let size = validate_input_file(path, self.max_size)?;
        tracing::debug!("reading {} ({} bytes)", path.display(), size);

        fs::read_to_string(path).map_err(|e| {
            ConversionError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}
