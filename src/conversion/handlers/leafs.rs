use super::Handler;
use crate::conversion::domain::csaf::{AggregateSeverity, Distribution, DocumentLeafs};
use crate::conversion::domain::cvrf;
use crate::conversion::domain::{ConversionConfig, Diagnostics, Fragment};
use crate::shared::error::StructureError;
use roxmltree::Node;

/// Scalar document members read from the `cvrfdoc` root
pub struct Leafs {
    record: DocumentLeafs,
    diagnostics: Diagnostics,
}

impl Leafs {
    pub fn new(config: &ConversionConfig) -> Self {
        Self {
            record: DocumentLeafs {
                csaf_version: config.csaf_version.clone(),
                ..DocumentLeafs::default()
            },
            diagnostics: Diagnostics::new(),
        }
    }
}

impl Handler for Leafs {
    fn always(&mut self, node: Node<'_, '_>) -> Result<(), StructureError> {
        self.record.category = Some(cvrf::require_child_text(node, "DocumentType")?);
        self.record.title = Some(cvrf::require_child_text(node, "DocumentTitle")?);
        Ok(())
    }

    fn sometimes(&mut self, node: Node<'_, '_>) -> Result<(), StructureError> {
        if let Some(text) = cvrf::child_text(node, "DocumentDistribution") {
            self.record.distribution = Some(Distribution { text });
        }

        if let Some(severity) = cvrf::child(node, "AggregateSeverity") {
            self.record.aggregate_severity = Some(AggregateSeverity {
                namespace: severity.attribute("Namespace").map(str::to_string),
                text: cvrf::require_text(severity)?,
            });
        }
        Ok(())
    }

    fn dump(&self) -> serde_json::Result<Fragment> {
        Fragment::serialized(&["document"], &self.record)
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }
}
