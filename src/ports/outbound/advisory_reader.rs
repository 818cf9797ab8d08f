use crate::shared::Result;
use std::path::Path;

/// AdvisoryReader port for reading CVRF advisory sources
///
/// This port abstracts the file system operations needed to read
/// the CVRF XML document that is to be converted.
pub trait AdvisoryReader {
    /// Reads the CVRF advisory at the given path
    ///
    /// # Arguments
    /// * `path` - Path to the CVRF XML file
    ///
    /// # Returns
    /// The raw XML text of the advisory
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or is not a regular file
    /// - The file is a symlink or exceeds the size limit
    /// - The file cannot be read or is not valid UTF-8
    fn read_advisory(&self, path: &Path) -> Result<String>;
}
