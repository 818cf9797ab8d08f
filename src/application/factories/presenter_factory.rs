use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Output destination of a converted CSAF document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl PresenterType {
    /// Destinations for one run, file first
    ///
    /// # Arguments
    /// * `output_file` - Target file, `None` when the document must not be written
    /// * `print` - Whether the document is also printed to stdout
    pub fn targets(output_file: Option<PathBuf>, print: bool) -> Vec<PresenterType> {
        let mut targets: Vec<PresenterType> =
            output_file.into_iter().map(PresenterType::File).collect();
        if print {
            targets.push(PresenterType::Stdout);
        }
        targets
    }
}

/// Factory for creating output presenters
///
/// This factory encapsulates the creation logic for different presenter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct PresenterFactory;

impl PresenterFactory {
    /// Creates a presenter instance for the specified type
    ///
    /// # Examples
    /// ```
    /// use cvrf2csaf::application::factories::{PresenterFactory, PresenterType};
    ///
    /// let presenter = PresenterFactory::create(PresenterType::Stdout);
    /// ```
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }

    /// Creates one presenter per destination, keeping their order
    pub fn create_all(targets: Vec<PresenterType>) -> Vec<Box<dyn OutputPresenter>> {
        targets.into_iter().map(Self::create).collect()
    }
}
