use crate::ports::outbound::CsafFormatter;
use crate::shared::Result;
use anyhow::Context;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use std::fmt::Write;

/// Indentation used when nothing else is configured
pub const DEFAULT_INDENT: usize = 2;

/// CsafJsonFormatter adapter for CSAF JSON output
///
/// Objects keep the key order of the assembled document, which is sorted.
/// With `ensure_ascii` every non-ASCII character is written as a `\uXXXX`
/// escape, using surrogate pairs above U+FFFF.
pub struct CsafJsonFormatter {
    indent: usize,
    ensure_ascii: bool,
}

impl CsafJsonFormatter {
    pub fn new(indent: usize, ensure_ascii: bool) -> Self {
        Self {
            indent,
            ensure_ascii,
        }
    }
}

impl Default for CsafJsonFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT, false)
    }
}

impl CsafFormatter for CsafJsonFormatter {
    fn format(&self, document: &Value) -> Result<String> {
        let indent = " ".repeat(self.indent);
        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(indent.as_bytes()));
        document
            .serialize(&mut serializer)
            .context("Failed to serialize CSAF document")?;

        let mut json =
            String::from_utf8(buffer).context("Serialized CSAF document is not valid UTF-8")?;
        if self.ensure_ascii {
            json = escape_non_ascii(&json);
        }
        json.push('\n');
        Ok(json)
    }
}

/// Escapes all non-ASCII characters of serialized JSON
///
/// Serialized JSON only carries non-ASCII characters inside string literals,
/// so rewriting them in place yields an equivalent document.
fn escape_non_ascii(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    let mut units = [0u16; 2];
    for ch in json.chars() {
        if ch.is_ascii() {
            escaped.push(ch);
            continue;
        }
        for unit in ch.encode_utf16(&mut units) {
            // writing into a String cannot fail
            let _ = write!(escaped, "\\u{:04x}", unit);
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_default_indent() {
        let formatter = CsafJsonFormatter::default();
        let json = formatter
            .format(&json!({"document": {"title": "T"}}))
            .unwrap();
        assert_eq!(json, "{\n  \"document\": {\n    \"title\": \"T\"\n  }\n}\n");
    }

    #[test]
    fn test_format_custom_indent() {
        let formatter = CsafJsonFormatter::new(4, false);
        let json = formatter.format(&json!({"a": 1})).unwrap();
        assert_eq!(json, "{\n    \"a\": 1\n}\n");
    }

    #[test]
    fn test_format_keeps_unicode_by_default() {
        let formatter = CsafJsonFormatter::default();
        let json = formatter.format(&json!({"name": "Jürgen"})).unwrap();
        assert!(json.contains("Jürgen"));
    }

    #[test]
    fn test_format_ensure_ascii() {
        let formatter = CsafJsonFormatter::new(2, true);
        let json = formatter
            .format(&json!({"name": "Jürgen", "emoji": "🔒"}))
            .unwrap();
        assert!(json.is_ascii());
        assert!(json.contains("J\\u00fcrgen"));
        assert!(json.contains("\\ud83d\\udd12"));

        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["name"], json!("Jürgen"));
        assert_eq!(parsed["emoji"], json!("🔒"));
    }

    #[test]
    fn test_format_ends_with_newline() {
        let formatter = CsafJsonFormatter::new(0, false);
        let json = formatter.format(&json!({})).unwrap();
        assert!(json.ends_with('\n'));
    }
}
