use super::{non_empty, Handler, ParentCode};
use crate::conversion::domain::csaf::Acknowledgment;
use crate::conversion::domain::cvrf;
use crate::conversion::domain::{Diagnostics, Fragment};
use crate::shared::error::StructureError;
use roxmltree::Node;

/// Acknowledgments below the document or a vulnerability
///
/// Every member of a CVRF `Acknowledgment` is optional, so all work happens
/// in the `sometimes` phase.
pub struct Acknowledgments {
    parent: ParentCode,
    acknowledgments: Vec<Acknowledgment>,
    diagnostics: Diagnostics,
}

impl Acknowledgments {
    pub fn new(parent: ParentCode) -> Self {
        Self {
            parent,
            acknowledgments: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }
}

impl Handler for Acknowledgments {
    fn always(&mut self, _node: Node<'_, '_>) -> Result<(), StructureError> {
        Ok(())
    }

    fn sometimes(&mut self, node: Node<'_, '_>) -> Result<(), StructureError> {
        for ack in cvrf::children(node, "Acknowledgment") {
            let mut organizations = cvrf::children_texts(ack, "Organization").into_iter();
            let acknowledgment = Acknowledgment {
                names: non_empty(cvrf::children_texts(ack, "Name")),
                organization: organizations.next(),
                summary: cvrf::child_text(ack, "Description"),
                urls: non_empty(cvrf::children_texts(ack, "URL")),
            };
            if acknowledgment == Acknowledgment::default() {
                self.diagnostics.warning(format!(
                    "Skipping empty Acknowledgment entry, input line: {}",
                    cvrf::line(ack)
                ));
                continue;
            }

            let ignored: Vec<String> = organizations.collect();
            if !ignored.is_empty() {
                self.diagnostics.warning(format!(
                    "CSAF 2.0 allows only one organization inside Acknowledgments. \
                     Taking the first occurrence, ignoring: {}.",
                    ignored.join(", ")
                ));
            }
            self.acknowledgments.push(acknowledgment);
        }
        Ok(())
    }

    fn dump(&self) -> serde_json::Result<Fragment> {
        self.parent.list_fragment("acknowledgments", &self.acknowledgments)
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }
}
