use regex::Regex;
use std::sync::LazyLock;

/// CSAF `version_t`: integer versioning or semantic versioning 2.0.0
static VERSION_T: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(0|[1-9][0-9]*)$|",
        r"^((0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)",
        r"(?:-((?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*)",
        r"(?:\.(?:0|[1-9]\d*|\d*[a-zA-Z-][0-9a-zA-Z-]*))*))?",
        r"(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?)$",
    ))
    .expect("version_t pattern is valid")
});

/// Whether `number` satisfies the CSAF `version_t` grammar
pub fn is_version_t(number: &str) -> bool {
    VERSION_T.is_match(number)
}

/// Parse a dotted version into integer components for ordering
///
/// Any component that is not an integer turns the whole tuple into the
/// maximal sentinel, so such versions sort after every numeric one.
pub fn integer_tuple(text: &str) -> Vec<u64> {
    text.split('.')
        .map(|part| part.trim().parse::<u64>())
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|_| vec![u64::MAX])
}

/// Strip surrounding whitespace and line breaks from an identifier
///
/// Returns the cleansed identifier and whether anything had to be removed.
pub fn cleanse_id(id: &str) -> (String, bool) {
    let cleansed: String = id.trim().chars().filter(|c| *c != '\r' && *c != '\n').collect();
    let changed = cleansed != id;
    (cleansed, changed)
}
