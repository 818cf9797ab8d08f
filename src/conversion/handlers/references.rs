use super::{Handler, ParentCode};
use crate::conversion::domain::csaf::Reference;
use crate::conversion::domain::cvrf;
use crate::conversion::domain::{ConversionConfig, Diagnostics, Fragment};
use crate::shared::error::StructureError;
use roxmltree::Node;

/// Category used when `Reference` has no `Type` and defaulting is enabled
pub const DEFAULT_REFERENCE_CATEGORY: &str = "external";

/// References below `DocumentReferences` or a vulnerability's `References`
pub struct References {
    parent: ParentCode,
    force_default_category: bool,
    references: Vec<Reference>,
    diagnostics: Diagnostics,
}

impl References {
    pub fn new(config: &ConversionConfig, parent: ParentCode) -> Self {
        Self {
            parent,
            force_default_category: config.force_insert_default_reference_category,
            references: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }
}

impl Handler for References {
    fn always(&mut self, node: Node<'_, '_>) -> Result<(), StructureError> {
        for reference in cvrf::children(node, "Reference") {
            let category = match reference.attribute("Type").filter(|t| !t.is_empty()) {
                Some(token) => Some(token.to_lowercase()),
                None if self.force_default_category => {
                    self.diagnostics.info(
                        "\"Type\" attribute not present in \"Reference\" element, using default value \"external\". \
                         This can be controlled by \"force_insert_default_reference_category\" option.",
                    );
                    Some(DEFAULT_REFERENCE_CATEGORY.to_string())
                }
                None => {
                    self.diagnostics.error(format!(
                        "\"Type\" attribute not present in \"Reference\" element at input line {}. \
                         Use \"force_insert_default_reference_category\" to default it to \"external\".",
                        cvrf::line(reference)
                    ));
                    None
                }
            };

            self.references.push(Reference {
                category,
                summary: cvrf::require_child_text(reference, "Description")?,
                url: cvrf::require_child_text(reference, "URL")?,
            });
        }
        Ok(())
    }

    fn sometimes(&mut self, _node: Node<'_, '_>) -> Result<(), StructureError> {
        Ok(())
    }

    fn dump(&self) -> serde_json::Result<Fragment> {
        self.parent.list_fragment("references", &self.references)
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }
}
