/// Fallback CVSS v3 minor version when neither namespace nor vector tells
pub const FALLBACK_CVSS3_VERSION: &str = "3.0";

/// CSAF version written into `/document/csaf_version`
pub const DEFAULT_CSAF_VERSION: &str = "2.0";

/// Resolved settings consumed by the conversion handlers
///
/// Built once per run from defaults, the config file and CLI flags; the core
/// only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
    pub csaf_version: String,
    pub publisher_name: Option<String>,
    pub publisher_namespace: Option<String>,
    pub fix_insert_current_version_into_revision_history: bool,
    pub force_insert_default_reference_category: bool,
    pub remove_cvss_values_without_vector: bool,
    pub default_cvss3_version: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            csaf_version: DEFAULT_CSAF_VERSION.to_string(),
            publisher_name: None,
            publisher_namespace: None,
            fix_insert_current_version_into_revision_history: false,
            force_insert_default_reference_category: false,
            remove_cvss_values_without_vector: false,
            default_cvss3_version: FALLBACK_CVSS3_VERSION.to_string(),
        }
    }
}
