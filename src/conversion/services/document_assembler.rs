use crate::conversion::domain::cvrf;
use crate::conversion::domain::{ConversionConfig, Diagnostics, Fragment};
use crate::conversion::handlers::{
    Acknowledgments, Handler, Leafs, Notes, ParentCode, Products, Publisher, References, Tracking,
    Vulnerabilities,
};
use roxmltree::Node;
use serde_json::Value;

/// Local name of the CVRF document element
pub const CVRF_ROOT: &str = "cvrfdoc";

/// Outcome of converting one CVRF document
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    pub document: Value,
    pub diagnostics: Diagnostics,
    pub is_valid: bool,
    /// Cleansed `/document/tracking/id`, used for the output file name
    pub identifier: Option<String>,
}

/// DocumentAssembler service running all handlers against one CVRF tree
///
/// Each run builds fresh handlers, so one assembler can convert any number
/// of documents without carrying state between them.
pub struct DocumentAssembler {
    config: ConversionConfig,
}

impl DocumentAssembler {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Converts the CVRF tree below `root` into a CSAF document
    ///
    /// Handlers run in a fixed order and their fragments are merged in that
    /// order. Only a wrong root element stops the run early.
    pub fn assemble(&self, root: Node<'_, '_>) -> AssembledDocument {
        let mut assembly = Assembly::default();

        if cvrf::tag(root) != CVRF_ROOT {
            assembly.diagnostics.critical(format!(
                "root element {} is not a CVRF {} element",
                cvrf::qualified_tag(root),
                CVRF_ROOT
            ));
            return assembly.finish(None);
        }

        assembly.absorb(Leafs::new(&self.config), Some(root));

        let publisher = assembly.require(root, "DocumentPublisher");
        assembly.absorb(Publisher::new(&self.config), publisher);

        let tracking_node = assembly.require(root, "DocumentTracking");
        let mut tracking = Tracking::new(&self.config);
        if let Some(node) = tracking_node {
            tracking.load(node);
        }
        let identifier = tracking.identifier().map(str::to_string);
        assembly.absorb(tracking, None);

        if let Some(node) = cvrf::child(root, "DocumentNotes") {
            assembly.absorb(Notes::new(ParentCode::Cvrf), Some(node));
        }
        if let Some(node) = cvrf::child(root, "DocumentReferences") {
            assembly.absorb(References::new(&self.config, ParentCode::Cvrf), Some(node));
        }
        if let Some(node) = cvrf::child(root, "Acknowledgments") {
            assembly.absorb(Acknowledgments::new(ParentCode::Cvrf), Some(node));
        }
        if let Some(node) = cvrf::child(root, "ProductTree") {
            assembly.absorb(Products::new(), Some(node));
        }
        assembly.absorb(Vulnerabilities::new(&self.config), Some(root));

        assembly.finish(identifier)
    }
}

/// Accumulator threading the merged document through one run
#[derive(Default)]
struct Assembly {
    document: Fragment,
    diagnostics: Diagnostics,
    handler_errors: bool,
    merge_conflicts: bool,
}

impl Assembly {
    /// Mandatory top-level section; its absence is an ERROR
    fn require<'a, 'i>(&mut self, root: Node<'a, 'i>, name: &'static str) -> Option<Node<'a, 'i>> {
        let node = cvrf::child(root, name);
        if node.is_none() {
            self.diagnostics
                .error(format!("missing element {} below {}", name, CVRF_ROOT));
        }
        node
    }

    /// Load `handler` against `node` when given, then merge its fragment
    fn absorb<H: Handler>(&mut self, mut handler: H, node: Option<Node<'_, '_>>) {
        if let Some(node) = node {
            handler.load(node);
        }
        self.handler_errors |= handler.has_errors();
        self.diagnostics.extend(handler.diagnostics().clone());

        match handler.dump() {
            Ok(fragment) => {
                if let Err(conflicts) = self.document.merge(fragment) {
                    self.merge_conflicts = true;
                    for conflict in conflicts {
                        self.diagnostics.error(conflict.to_string());
                    }
                }
            }
            Err(err) => {
                self.handler_errors = true;
                self.diagnostics
                    .error(format!("serializing handler output failed with {}", err));
            }
        }
    }

    fn finish(self, identifier: Option<String>) -> AssembledDocument {
        let is_valid =
            !self.handler_errors && !self.merge_conflicts && !self.diagnostics.has_errors();
        AssembledDocument {
            document: self.document.into_value(),
            diagnostics: self.diagnostics,
            is_valid,
            identifier,
        }
    }
}
