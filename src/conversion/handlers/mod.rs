//! Field-mapping handlers, one per CVRF subtree.
//!
//! Every handler owns its output fragment and its diagnostics. Handlers never
//! see each other's output; the document assembler merges the fragments.

pub mod acknowledgments;
pub mod leafs;
pub mod notes;
pub mod products;
pub mod publisher;
pub mod references;
pub mod scores;
pub mod tracking;
pub mod vulnerabilities;

pub use acknowledgments::Acknowledgments;
pub use leafs::Leafs;
pub use notes::Notes;
pub use products::Products;
pub use publisher::Publisher;
pub use references::References;
pub use tracking::Tracking;
pub use vulnerabilities::Vulnerabilities;

use crate::conversion::domain::cvrf;
use crate::conversion::domain::{Diagnostics, Fragment};
use crate::shared::error::StructureError;
use roxmltree::Node;
use serde::Serialize;
use serde_json::Value;

/// Common two-phase protocol of all handlers
///
/// `always` ingests the members CVRF declares mandatory, `sometimes` the
/// optional ones. Both may fail with a [`StructureError`]; [`Handler::load`]
/// runs both phases regardless and turns failures into ERROR diagnostics.
pub trait Handler {
    fn always(&mut self, node: Node<'_, '_>) -> Result<(), StructureError>;

    fn sometimes(&mut self, node: Node<'_, '_>) -> Result<(), StructureError>;

    /// The output fragment accumulated so far
    fn dump(&self) -> serde_json::Result<Fragment>;

    fn diagnostics(&self) -> &Diagnostics;

    fn diagnostics_mut(&mut self) -> &mut Diagnostics;

    fn load(&mut self, node: Node<'_, '_>) {
        if let Err(err) = self.always(node) {
            self.diagnostics_mut().error(format!(
                "ingesting always present element {} failed with {}",
                cvrf::tag(node),
                err
            ));
        }
        if let Err(err) = self.sometimes(node) {
            self.diagnostics_mut().error(format!(
                "ingesting sometimes present element {} failed with {}",
                cvrf::tag(node),
                err
            ));
        }
    }

    /// True when this handler recorded an ERROR or CRITICAL diagnostic
    fn has_errors(&self) -> bool {
        self.diagnostics().has_errors()
    }
}

/// Which container a shared handler (notes, references, acknowledgments) feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentCode {
    /// `/document/<key>`
    Cvrf,
    /// `<key>` inside one vulnerability record
    Vuln,
}

impl ParentCode {
    /// Nest `value` under this parent's hook path for `key`
    pub fn fragment(self, key: &str, value: Value) -> Fragment {
        match self {
            ParentCode::Cvrf => Fragment::at(&["document", key], value),
            ParentCode::Vuln => Fragment::at(&[key], value),
        }
    }

    /// Serialize a non-empty list under the hook path; nothing for an empty one
    pub fn list_fragment<T: Serialize>(self, key: &str, items: &[T]) -> serde_json::Result<Fragment> {
        if items.is_empty() {
            return Ok(Fragment::new());
        }
        Ok(self.fragment(key, serde_json::to_value(items)?))
    }
}

/// Unwrap one optional field, recording a failure as an ERROR
///
/// Lets a handler keep going when a single member is malformed.
pub(crate) fn guard<T>(
    diagnostics: &mut Diagnostics,
    field: &str,
    result: Result<T, StructureError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            diagnostics.error(format!("ingesting field {} failed with {}", field, err));
            None
        }
    }
}

/// `Some(items)` unless the list is empty
pub(crate) fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
