//! Translation tables between CVRF and CSAF vocabulary tokens.

/// A fixed CVRF -> CSAF token table with a fallback for unknown tokens
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    pairs: &'static [(&'static str, &'static str)],
    fallback: Option<&'static str>,
}

impl Vocabulary {
    pub const fn new(pairs: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            pairs,
            fallback: None,
        }
    }

    pub const fn with_fallback(self, fallback: &'static str) -> Self {
        Self {
            pairs: self.pairs,
            fallback: Some(fallback),
        }
    }

    /// Mapped value for `token`, or the fallback when the token is unknown
    pub fn translate(&self, token: &str) -> Option<&'static str> {
        self.pairs
            .iter()
            .find(|(cvrf, _)| *cvrf == token)
            .map(|(_, csaf)| *csaf)
            .or(self.fallback)
    }

    pub fn pairs(&self) -> &'static [(&'static str, &'static str)] {
        self.pairs
    }
}

/// `translate(table, token)`
pub fn translate(table: &Vocabulary, token: &str) -> Option<&'static str> {
    table.translate(token)
}

/// Branch types CSAF dropped; both map to `product_name`
pub const LEGACY_BRANCH_TYPES: [&str; 2] = ["Realm", "Resource"];

pub static BRANCH_TYPE: Vocabulary = Vocabulary::new(&[
    ("Architecture", "architecture"),
    ("Host Name", "host_name"),
    ("Language", "language"),
    ("Legacy", "legacy"),
    ("Patch Level", "patch_level"),
    ("Product Family", "product_family"),
    ("Product Name", "product_name"),
    ("Product Version", "product_version"),
    ("Realm", "product_name"),
    ("Resource", "product_name"),
    ("Service Pack", "service_pack"),
    ("Specification", "specification"),
    ("Vendor", "vendor"),
]);

pub static PUBLISHER_TYPE_CATEGORY: Vocabulary = Vocabulary::new(&[
    ("Coordinator", "coordinator"),
    ("Discoverer", "discoverer"),
    ("Other", "other"),
    ("User", "user"),
    ("Vendor", "vendor"),
]);

pub static RELATION_TYPE: Vocabulary = Vocabulary::new(&[
    ("Default Component Of", "default_component_of"),
    ("Optional Component Of", "optional_component_of"),
    ("External Component Of", "external_component_of"),
    ("Installed On", "installed_on"),
    ("Installed With", "installed_with"),
]);

pub static REMEDIATION_CATEGORY: Vocabulary = Vocabulary::new(&[
    ("Mitigation", "mitigation"),
    ("None Available", "none_available"),
    ("Vendor Fix", "vendor_fix"),
    ("Will Not Fix", "no_fix_planned"),
    ("Workaround", "workaround"),
]);

pub static SCORE_CVSS_V2: Vocabulary = Vocabulary::new(&[
    ("BaseScoreV2", "baseScore"),
    ("EnvironmentalScoreV2", "environmentalScore"),
    ("TemporalScoreV2", "temporalScore"),
    ("VectorV2", "vectorString"),
]);

pub static SCORE_CVSS_V3: Vocabulary = Vocabulary::new(&[
    ("BaseScoreV3", "baseScore"),
    ("EnvironmentalScoreV3", "environmentalScore"),
    ("TemporalScoreV3", "temporalScore"),
    ("VectorV3", "vectorString"),
]);

pub static TRACKING_STATUS: Vocabulary = Vocabulary::new(&[
    ("Draft", "draft"),
    ("Final", "final"),
    ("Interim", "interim"),
]);
