use regex::Regex;
use std::sync::LazyLock;

/// CVSS v3 minor version carried in a namespace URI such as `.../cvss-v3.1.xsd`
static NAMESPACE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"cvss-v(3\.[01])").expect("namespace version pattern is valid"));

/// Version prefix of a CVSS v3 vector string
static VECTOR_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CVSS:(3\.[01])").expect("vector version pattern is valid"));

/// Upper bounds (inclusive) of the CVSS v3 qualitative severity buckets
const SEVERITY_BUCKETS: [(f64, &str); 4] =
    [(0.0, "NONE"), (3.9, "LOW"), (6.9, "MEDIUM"), (8.9, "HIGH")];

/// Qualitative severity for a CVSS v3 base score
///
/// `<= 0` is NONE, `<= 3.9` LOW, `<= 6.9` MEDIUM, `<= 8.9` HIGH and anything
/// above is CRITICAL.
pub fn base_severity(base_score: f64) -> &'static str {
    SEVERITY_BUCKETS
        .iter()
        .find(|(upper, _)| base_score <= *upper)
        .map(|(_, severity)| *severity)
        .unwrap_or("CRITICAL")
}

/// CVSS v3 minor version encoded in a `{namespace}name` tag, if any
pub fn version_from_namespace(qualified_tag: &str) -> Option<&str> {
    NAMESPACE_VERSION
        .captures(qualified_tag)
        .and_then(|captures| captures.get(1))
        .map(|version| version.as_str())
}

/// CVSS v3 minor version from the `CVSS:3.x/` prefix of a vector string
pub fn version_from_vector(vector: &str) -> Option<&str> {
    VECTOR_VERSION
        .captures(vector)
        .and_then(|captures| captures.get(1))
        .map(|version| version.as_str())
}
