use super::Handler;
use crate::conversion::domain::csaf;
use crate::conversion::domain::cvrf;
use crate::conversion::domain::{ConversionConfig, Diagnostics, Fragment};
use crate::conversion::policies::dialect::PUBLISHER_TYPE_CATEGORY;
use crate::shared::error::StructureError;
use roxmltree::Node;

/// `/document/publisher` from `DocumentPublisher`
///
/// Name and namespace come from configuration since CVRF carries neither.
pub struct Publisher {
    record: csaf::Publisher,
    diagnostics: Diagnostics,
}

impl Publisher {
    pub fn new(config: &ConversionConfig) -> Self {
        Self {
            record: csaf::Publisher {
                name: config.publisher_name.clone(),
                namespace: config.publisher_namespace.clone(),
                ..csaf::Publisher::default()
            },
            diagnostics: Diagnostics::new(),
        }
    }
}

impl Handler for Publisher {
    fn always(&mut self, node: Node<'_, '_>) -> Result<(), StructureError> {
        match node.attribute("Type") {
            None => self
                .diagnostics
                .warning("DocumentPublisher has no Type attribute, omitting publisher category"),
            Some(token) => match PUBLISHER_TYPE_CATEGORY.translate(token) {
                Some(category) => self.record.category = Some(category.to_string()),
                None => self.diagnostics.warning(format!(
                    "unknown publisher type {}, omitting publisher category",
                    token
                )),
            },
        }
        Ok(())
    }

    fn sometimes(&mut self, node: Node<'_, '_>) -> Result<(), StructureError> {
        self.record.contact_details = cvrf::child_text(node, "ContactDetails");
        self.record.issuing_authority = cvrf::child_text(node, "IssuingAuthority");
        Ok(())
    }

    fn dump(&self) -> serde_json::Result<Fragment> {
        Fragment::serialized(&["document", "publisher"], &self.record)
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }
}
