use crate::ports::outbound::OutputPresenter;
use crate::shared::error::ConversionError;
use crate::shared::security::validate_not_symlink;
use crate::shared::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter for writing CSAF documents to files
///
/// This adapter implements the OutputPresenter port for file output.
/// A missing output directory is created on the fly.
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn write_error(&self, details: String) -> ConversionError {
        ConversionError::FileWriteError {
            path: self.output_path.clone(),
            details,
        }
    }

    /// Creates the parent directory chain when it does not exist yet
    fn ensure_parent_directory(&self) -> Result<()> {
        let Some(parent) = self.output_path.parent() else {
            return Ok(());
        };
        if parent == Path::new("") || parent.exists() {
            return Ok(());
        }

        fs::create_dir_all(parent).map_err(|e| {
            self.write_error(format!(
                "Failed to create output directory {}: {}",
                parent.display(),
                e
            ))
        })?;
        tracing::info!("Created output folder {}", parent.display());
        Ok(())
    }

    /// Security validation before writing:
    /// - Reject if the output path or its directory is a symlink
    /// - Reject if the output path exists but is not a regular file
    fn validate_output_security(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            validate_not_symlink(parent, "Write")?;
        }
        validate_not_symlink(&self.output_path, "Write")?;

        if self.output_path.exists() {
            if !self.output_path.is_file() {
                return Err(self
                    .write_error("Output path exists and is not a regular file".to_string())
                    .into());
            }
            tracing::warn!(
                "Output path {} exists already. Overwriting.",
                self.output_path.display()
            );
        }
        Ok(())
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        if self.output_path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            tracing::warn!(
                "Given output file {} does not follow CSAF naming recommendations (.json suffix)",
                self.output_path.display()
            );
        }

        self.ensure_parent_directory()?;
        self.validate_output_security()?;

        fs::write(&self.output_path, content).map_err(|e| self.write_error(e.to_string()))?;

        tracing::info!("Output written to {}", self.output_path.display());
        Ok(())
    }
}

/// StdoutPresenter adapter for writing output to stdout
///
/// This adapter implements the OutputPresenter port for stdout output.
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}
