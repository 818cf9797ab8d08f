//! CVSS score set parsing for the vulnerabilities handler.

use crate::conversion::domain::csaf::{CvssScore, ScoreSet};
use crate::conversion::domain::cvrf;
use crate::conversion::domain::{ConversionConfig, Diagnostics};
use crate::conversion::policies::cvss::{base_severity, version_from_namespace, version_from_vector};
use crate::conversion::policies::dialect::{Vocabulary, SCORE_CVSS_V2, SCORE_CVSS_V3};
use roxmltree::Node;
use std::collections::HashSet;

const CVSS_V2_VERSION: &str = "2.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CvssKind {
    V2,
    V3,
}

impl CvssKind {
    fn element(self) -> &'static str {
        match self {
            CvssKind::V2 => "ScoreSetV2",
            CvssKind::V3 => "ScoreSetV3",
        }
    }

    fn table(self) -> &'static Vocabulary {
        match self {
            CvssKind::V2 => &SCORE_CVSS_V2,
            CvssKind::V3 => &SCORE_CVSS_V3,
        }
    }
}

/// Parses every `ScoreSetV2` and `ScoreSetV3` below `CVSSScoreSets`
///
/// # Arguments
/// * `node` - The `CVSSScoreSets` element
/// * `config` - Supplies the vector policy and the fallback v3 version
/// * `affected` - Affected product ids used when a set names no products
/// * `diagnostics` - Receives every problem found
///
/// # Returns
/// The surviving score sets after v3.0/v3.1 deduplication
pub fn parse_score_sets(
    node: Node<'_, '_>,
    config: &ConversionConfig,
    affected: &[String],
    diagnostics: &mut Diagnostics,
) -> Vec<ScoreSet> {
    let mut score_sets = Vec::new();
    for kind in [CvssKind::V2, CvssKind::V3] {
        for element in cvrf::children(node, kind.element()) {
            if let Some(score_set) = parse_score_set(element, kind, config, affected, diagnostics) {
                score_sets.push(score_set);
            }
        }
    }
    dedup_cvss_v3(score_sets)
}

fn parse_score_set(
    node: Node<'_, '_>,
    kind: CvssKind,
    config: &ConversionConfig,
    affected: &[String],
    diagnostics: &mut Diagnostics,
) -> Option<ScoreSet> {
    let mut score = CvssScore::default();
    for (cvrf_name, csaf_name) in kind.table().pairs() {
        let Some(text) = cvrf::child_text(node, cvrf_name) else {
            continue;
        };
        let text = text.trim();
        if *csaf_name == "vectorString" {
            score.vector_string = Some(text.to_string());
            continue;
        }
        let Some(value) = text.parse::<f64>().ok().filter(|value| value.is_finite()) else {
            diagnostics.error(format!(
                "CVSS score {} value {} is not a number",
                cvrf_name, text
            ));
            continue;
        };
        match *csaf_name {
            "baseScore" => score.base_score = Some(value),
            "temporalScore" => score.temporal_score = Some(value),
            _ => score.environmental_score = Some(value),
        }
    }

    if score.vector_string.is_none() {
        if config.remove_cvss_values_without_vector {
            diagnostics.warning(
                "No CVSS vector string found on the input, ignoring ScoreSet element \
                 due to \"remove_CVSS_values_without_vector\" option.",
            );
            return None;
        }
        diagnostics.error("No CVSS vector string found on the input.");
    }

    let mut products = cvrf::children_texts(node, "ProductID");
    if products.is_empty() {
        products = affected.to_vec();
    }
    if products.is_empty() {
        diagnostics.error(format!(
            "No product_id entry for CVSS score set at input line {}.",
            cvrf::line(node)
        ));
    }

    if score.base_score.is_none() {
        diagnostics.error(format!(
            "No base score found in {} element at input line {}.",
            kind.element(),
            cvrf::line(node)
        ));
    }

    match kind {
        CvssKind::V2 => {
            score.version = CVSS_V2_VERSION.to_string();
            Some(ScoreSet {
                cvss_v2: Some(score),
                cvss_v3: None,
                products,
            })
        }
        CvssKind::V3 => {
            score.version = cvss_v3_version(node, &score, config, diagnostics);
            score.base_severity = score
                .base_score
                .map(|base_score| base_severity(base_score).to_string());
            Some(ScoreSet {
                cvss_v2: None,
                cvss_v3: Some(score),
                products,
            })
        }
    }
}

/// Namespace first, then the vector prefix, else the configured fallback
fn cvss_v3_version(
    node: Node<'_, '_>,
    score: &CvssScore,
    config: &ConversionConfig,
    diagnostics: &mut Diagnostics,
) -> String {
    let mut version = std::iter::once(node)
        .chain(node.children().filter(|child| child.is_element()))
        .find_map(|element| version_from_namespace(&cvrf::qualified_tag(element)).map(str::to_string))
        .unwrap_or_else(|| config.default_cvss3_version.clone());

    if let Some(vector) = &score.vector_string {
        match version_from_vector(vector) {
            Some(from_vector) => version = from_vector.to_string(),
            None => diagnostics.error(format!("CVSS vector {} is not valid.", vector)),
        }
    }
    version
}

/// Drop v3.0 coverage of products that also carry a v3.1 score
///
/// Score sets left without products are removed afterwards.
pub fn dedup_cvss_v3(score_sets: Vec<ScoreSet>) -> Vec<ScoreSet> {
    let products_for = |version: &str| -> HashSet<String> {
        score_sets
            .iter()
            .filter(|set| set.cvss_v3_version() == Some(version))
            .flat_map(|set| set.products.iter().cloned())
            .collect()
    };
    let v3_1 = products_for("3.1");
    let both: HashSet<String> = products_for("3.0").intersection(&v3_1).cloned().collect();

    score_sets
        .into_iter()
        .map(|mut set| {
            if set.cvss_v3_version() == Some("3.0") {
                set.products.retain(|product| !both.contains(product));
            }
            set
        })
        .filter(|set| !set.products.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::domain::Severity;
    use roxmltree::Document;

    const V30: &str = "CVSS:3.0/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H";
    const V31: &str = "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H";

    fn v3_set(version: &str, products: &[&str]) -> ScoreSet {
        ScoreSet {
            cvss_v2: None,
            cvss_v3: Some(CvssScore {
                base_score: Some(9.8),
                version: version.to_string(),
                ..CvssScore::default()
            }),
            products: products.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn parse(xml: &str, config: &ConversionConfig, affected: &[String]) -> (Vec<ScoreSet>, Diagnostics) {
        let doc = Document::parse(xml).unwrap();
        let mut diagnostics = Diagnostics::new();
        let sets = parse_score_sets(doc.root_element(), config, affected, &mut diagnostics);
        (sets, diagnostics)
    }

    fn score_set_v3(body: &str) -> String {
        format!("<CVSSScoreSets><ScoreSetV3>{}</ScoreSetV3></CVSSScoreSets>", body)
    }

    #[test]
    fn test_v3_score_set() {
        let xml = score_set_v3(&format!(
            "<BaseScoreV3>9.8</BaseScoreV3><TemporalScoreV3>9.1</TemporalScoreV3>\
             <VectorV3>{}</VectorV3><ProductID>P1</ProductID>",
            V31
        ));
        let (sets, diagnostics) = parse(&xml, &ConversionConfig::default(), &[]);
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert_eq!(sets.len(), 1);
        let score = sets[0].cvss_v3.as_ref().unwrap();
        assert_eq!(score.version, "3.1");
        assert_eq!(score.base_score, Some(9.8));
        assert_eq!(score.temporal_score, Some(9.1));
        assert_eq!(score.base_severity.as_deref(), Some("CRITICAL"));
        assert_eq!(score.vector_string.as_deref(), Some(V31));
        assert_eq!(sets[0].products, vec!["P1"]);
    }

    #[test]
    fn test_v2_score_set_has_no_severity() {
        let xml = concat!(
            "<CVSSScoreSets><ScoreSetV2>",
            "<BaseScoreV2>5.0</BaseScoreV2><VectorV2>AV:N/AC:L/Au:N/C:N/I:N/A:P</VectorV2>",
            "<ProductID>P1</ProductID>",
            "</ScoreSetV2></CVSSScoreSets>"
        );
        let (sets, diagnostics) = parse(xml, &ConversionConfig::default(), &[]);
        assert!(diagnostics.is_empty());
        let score = sets[0].cvss_v2.as_ref().unwrap();
        assert_eq!(score.version, "2.0");
        assert!(score.base_severity.is_none());
    }

    #[test]
    fn test_namespace_version_is_overridden_by_vector() {
        let xml = format!(
            concat!(
                r#"<CVSSScoreSets xmlns:cvssv3="https://www.first.org/cvss/cvss-v3.1.xsd"><ScoreSetV3>"#,
                "<cvssv3:BaseScoreV3>7.5</cvssv3:BaseScoreV3><cvssv3:VectorV3>{}</cvssv3:VectorV3>",
                "<ProductID>P1</ProductID>",
                "</ScoreSetV3></CVSSScoreSets>"
            ),
            V30
        );
        let (sets, _) = parse(&xml, &ConversionConfig::default(), &[]);
        assert_eq!(sets[0].cvss_v3_version(), Some("3.0"));
    }

    #[test]
    fn test_namespace_version_beats_configured_default() {
        let xml = concat!(
            r#"<CVSSScoreSets xmlns:cvssv3="https://www.first.org/cvss/cvss-v3.1.xsd"><ScoreSetV3>"#,
            "<cvssv3:BaseScoreV3>7.5</cvssv3:BaseScoreV3><cvssv3:VectorV3>AV:N/AC:L</cvssv3:VectorV3>",
            "<ProductID>P1</ProductID>",
            "</ScoreSetV3></CVSSScoreSets>"
        );
        let (sets, diagnostics) = parse(xml, &ConversionConfig::default(), &[]);
        assert_eq!(sets[0].cvss_v3_version(), Some("3.1"));
        // The vector lacks its CVSS:3.x prefix
        assert_eq!(diagnostics.count(Severity::Error), 1);
    }

    #[test]
    fn test_configured_default_version() {
        let config = ConversionConfig {
            default_cvss3_version: "3.1".to_string(),
            ..ConversionConfig::default()
        };
        let xml = score_set_v3("<BaseScoreV3>7.5</BaseScoreV3><ProductID>P1</ProductID>");
        let (sets, _) = parse(&xml, &config, &[]);
        assert_eq!(sets[0].cvss_v3_version(), Some("3.1"));
    }

    #[test]
    fn test_missing_vector_is_error_and_kept() {
        let xml = score_set_v3("<BaseScoreV3>7.5</BaseScoreV3><ProductID>P1</ProductID>");
        let (sets, diagnostics) = parse(&xml, &ConversionConfig::default(), &[]);
        assert!(diagnostics.has_errors());
        assert_eq!(sets.len(), 1);
        assert!(sets[0].cvss_v3.as_ref().unwrap().vector_string.is_none());
    }

    #[test]
    fn test_missing_vector_is_dropped_when_configured() {
        let config = ConversionConfig {
            remove_cvss_values_without_vector: true,
            ..ConversionConfig::default()
        };
        let xml = score_set_v3("<BaseScoreV3>7.5</BaseScoreV3><ProductID>P1</ProductID>");
        let (sets, diagnostics) = parse(&xml, &config, &[]);
        assert!(sets.is_empty());
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.count(Severity::Warning), 1);
    }

    #[test]
    fn test_malformed_vector_is_error() {
        let xml = score_set_v3(
            "<BaseScoreV3>7.5</BaseScoreV3><VectorV3>garbage</VectorV3><ProductID>P1</ProductID>",
        );
        let (sets, diagnostics) = parse(&xml, &ConversionConfig::default(), &[]);
        assert!(diagnostics.has_errors());
        assert_eq!(sets[0].cvss_v3_version(), Some("3.0"));
    }

    #[test]
    fn test_products_fall_back_to_affected() {
        let xml = score_set_v3(&format!(
            "<BaseScoreV3>7.5</BaseScoreV3><VectorV3>{}</VectorV3>",
            V31
        ));
        let affected = vec!["P1".to_string(), "P2".to_string()];
        let (sets, diagnostics) = parse(&xml, &ConversionConfig::default(), &affected);
        assert!(diagnostics.is_empty());
        assert_eq!(sets[0].products, affected);
    }

    #[test]
    fn test_no_resolvable_products_is_error_and_dropped() {
        let xml = score_set_v3(&format!(
            "<BaseScoreV3>7.5</BaseScoreV3><VectorV3>{}</VectorV3>",
            V31
        ));
        let (sets, diagnostics) = parse(&xml, &ConversionConfig::default(), &[]);
        assert!(diagnostics.has_errors());
        assert!(sets.is_empty());
    }

    #[test]
    fn test_non_numeric_score_is_error() {
        let xml = score_set_v3(&format!(
            "<BaseScoreV3>high</BaseScoreV3><VectorV3>{}</VectorV3><ProductID>P1</ProductID>",
            V31
        ));
        let (sets, diagnostics) = parse(&xml, &ConversionConfig::default(), &[]);
        assert!(diagnostics.has_errors());
        assert!(sets[0].cvss_v3.as_ref().unwrap().base_score.is_none());
    }

    #[test]
    fn test_dedup_prefers_v3_1() {
        let sets = dedup_cvss_v3(vec![v3_set("3.0", &["P1", "P2"]), v3_set("3.1", &["P1"])]);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].products, vec!["P2"]);
        assert_eq!(sets[1].products, vec!["P1"]);
    }

    #[test]
    fn test_dedup_drops_emptied_v3_0_set() {
        let sets = dedup_cvss_v3(vec![v3_set("3.0", &["P1"]), v3_set("3.1", &["P1"])]);
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].cvss_v3_version(), Some("3.1"));
    }

    #[test]
    fn test_dedup_leaves_unrelated_sets() {
        let sets = dedup_cvss_v3(vec![v3_set("3.0", &["P1"]), v3_set("3.1", &["P2"])]);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].products, vec!["P1"]);
    }
}
