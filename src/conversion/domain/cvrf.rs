//! Namespace-agnostic access to a parsed CVRF element tree.
//!
//! CVRF spreads its elements over several namespaces (`cvrf`, `prod`, `vuln`,
//! `cvssv2`, `cvssv3`, ...) and real-world documents are sloppy about which
//! one they use. Lookups therefore match on the local element name only.

use crate::shared::error::StructureError;
use roxmltree::Node;

/// Local name of an element, without namespace
pub fn tag<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Namespace-qualified tag in `{namespace}name` notation
pub fn qualified_tag(node: Node<'_, '_>) -> String {
    match node.tag_name().namespace() {
        Some(namespace) => format!("{{{}}}{}", namespace, node.tag_name().name()),
        None => node.tag_name().name().to_string(),
    }
}

/// First child element with the given local name
pub fn child<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

/// All child elements with the given local name, in document order
pub fn children<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Vec<Node<'a, 'i>> {
    node.children()
        .filter(|c| c.is_element() && c.tag_name().name() == name)
        .collect()
}

/// Child element that CVRF declares mandatory
pub fn require_child<'a, 'i>(
    node: Node<'a, 'i>,
    name: &'static str,
) -> Result<Node<'a, 'i>, StructureError> {
    child(node, name).ok_or_else(|| StructureError::MissingElement {
        parent: tag(node).to_string(),
        child: name,
    })
}

/// Attribute that CVRF declares mandatory
pub fn require_attribute<'a>(
    node: Node<'a, '_>,
    name: &'static str,
) -> Result<&'a str, StructureError> {
    node.attribute(name)
        .ok_or_else(|| StructureError::MissingAttribute {
            element: tag(node).to_string(),
            attribute: name,
        })
}

/// Text content of an element, `None` for empty elements
pub fn text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text()
}

/// Text content that must be present
pub fn require_text(node: Node<'_, '_>) -> Result<String, StructureError> {
    node.text()
        .map(str::to_string)
        .ok_or_else(|| StructureError::MissingText {
            element: tag(node).to_string(),
        })
}

/// Text of the first child with the given name
pub fn child_text(node: Node<'_, '_>, name: &str) -> Option<String> {
    child(node, name).and_then(text).map(str::to_string)
}

/// Text of a mandatory child element
pub fn require_child_text(node: Node<'_, '_>, name: &'static str) -> Result<String, StructureError> {
    require_text(require_child(node, name)?)
}

/// Texts of all children with the given name; empty elements are skipped
pub fn children_texts(node: Node<'_, '_>, name: &str) -> Vec<String> {
    children(node, name)
        .into_iter()
        .filter_map(text)
        .map(str::to_string)
        .collect()
}

/// One-based source line of an element, used in diagnostics
pub fn line(node: Node<'_, '_>) -> u32 {
    node.document().text_pos_at(node.range().start).row
}

/// Lowercase and replace spaces with underscores (`Known Affected` -> `known_affected`)
pub fn snake_token(token: &str) -> String {
    token.to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const XML: &str = r#"<cvrfdoc xmlns="http://docs.oasis-open.org/csaf/ns/csaf-cvrf/v1.2/cvrf">
  <DocumentTitle>Title</DocumentTitle>
  <Empty/>
  <Vulnerability xmlns="http://docs.oasis-open.org/csaf/ns/csaf-cvrf/v1.2/vuln" Ordinal="1">
    <CVE>CVE-2017-3826</CVE>
    <CWE ID="CWE-1">one</CWE>
    <CWE ID="CWE-2">two</CWE>
  </Vulnerability>
</cvrfdoc>"#;

    #[test]
    fn test_child_ignores_namespace() {
        let doc = Document::parse(XML).unwrap();
        let root = doc.root_element();
        let vuln = child(root, "Vulnerability").unwrap();
        assert_eq!(child_text(vuln, "CVE").as_deref(), Some("CVE-2017-3826"));
        assert_eq!(
            qualified_tag(vuln),
            "{http://docs.oasis-open.org/csaf/ns/csaf-cvrf/v1.2/vuln}Vulnerability"
        );
    }

    #[test]
    fn test_children_keep_document_order() {
        let doc = Document::parse(XML).unwrap();
        let vuln = child(doc.root_element(), "Vulnerability").unwrap();
        assert_eq!(children_texts(vuln, "CWE"), vec!["one", "two"]);
    }

    #[test]
    fn test_require_child_missing() {
        let doc = Document::parse(XML).unwrap();
        let err = require_child(doc.root_element(), "DocumentType").unwrap_err();
        assert_eq!(
            err,
            StructureError::MissingElement {
                parent: "cvrfdoc".to_string(),
                child: "DocumentType"
            }
        );
    }

    #[test]
    fn test_require_attribute() {
        let doc = Document::parse(XML).unwrap();
        let vuln = child(doc.root_element(), "Vulnerability").unwrap();
        assert_eq!(require_attribute(vuln, "Ordinal").unwrap(), "1");
        assert!(require_attribute(vuln, "Type").is_err());
    }

    #[test]
    fn test_empty_element_has_no_text() {
        let doc = Document::parse(XML).unwrap();
        let empty = child(doc.root_element(), "Empty").unwrap();
        assert!(text(empty).is_none());
        assert!(require_text(empty).is_err());
    }

    #[test]
    fn test_line_is_one_based() {
        let doc = Document::parse(XML).unwrap();
        let title = child(doc.root_element(), "DocumentTitle").unwrap();
        assert_eq!(line(doc.root_element()), 1);
        assert_eq!(line(title), 2);
    }

    #[test]
    fn test_snake_token() {
        assert_eq!(snake_token("Known Affected"), "known_affected");
        assert_eq!(snake_token("Legal Disclaimer"), "legal_disclaimer");
    }
}
