use regex::Regex;
use std::sync::LazyLock;

/// Stem used when the advisory carries no tracking identifier
pub const ID_UNKNOWN: &str = "out";

/// Stem marker of documents that failed validation
pub const INVALID_MARKER: &str = "_invalid";

pub const CSAF_FILE_SUFFIX: &str = ".json";

/// Runs of characters not allowed in a CSAF file name
static FILENAME_UNSAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^+\-a-z0-9]+").expect("filename pattern is valid"));

/// Derives the CSAF file name from the tracking identifier
///
/// The identifier is lowercased and every run of characters outside
/// `[a-z0-9+-]` becomes one underscore. Invalid documents get an `_invalid`
/// stem suffix. A blank identifier counts as missing.
pub fn derive_csaf_filename(identifier: Option<&str>, is_valid: bool) -> String {
    let stem = match identifier.map(str::trim).filter(|id| !id.is_empty()) {
        Some(identifier) => FILENAME_UNSAFE
            .replace_all(&identifier.to_lowercase(), "_")
            .into_owned(),
        None => ID_UNKNOWN.to_string(),
    };
    let marker = if is_valid { "" } else { INVALID_MARKER };
    format!("{}{}{}", stem, marker, CSAF_FILE_SUFFIX)
}
