use crate::shared::error::ConversionError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum accepted size of a CVRF input document (100 MB)
pub const MAX_INPUT_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
/// A path that does not exist passes, so callers can create it afterwards.
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return Ok(());
    };

    if metadata.is_symlink() {
        return Err(ConversionError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} operations on symbolic links are not allowed", operation),
            hint: "Pass the real file path instead of a link".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Validates that an input path is an existing, regular, reasonably sized file
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file exceeds `max_size` bytes
pub fn validate_input_file(path: &Path, max_size: u64) -> Result<u64> {
    let metadata = fs::symlink_metadata(path).map_err(|_| ConversionError::InputNotFound {
        path: path.to_path_buf(),
        suggestion: "Check the path given with --input-file".to_string(),
    })?;

    if metadata.is_symlink() {
        return Err(ConversionError::SecurityError {
            path: path.to_path_buf(),
            reason: "Input is a symbolic link".to_string(),
            hint: "Pass the real file path instead of a link".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(ConversionError::FileReadError {
            path: path.to_path_buf(),
            details: "not a regular file".to_string(),
        }
        .into());
    }

    let size = metadata.len();
    if size > max_size {
        return Err(ConversionError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "Input is too large ({} bytes). Maximum allowed size is {} bytes.",
                size, max_size
            ),
            hint: "Split the advisory or check that the right file was given".to_string(),
        }
        .into());
    }

    Ok(size)
}
