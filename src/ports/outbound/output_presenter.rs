use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where the formatted CSAF content is presented.
pub trait OutputPresenter {
    /// Presents the formatted CSAF content to the output destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - The destination is a symlink
    fn present(&self, content: &str) -> Result<()>;
}
