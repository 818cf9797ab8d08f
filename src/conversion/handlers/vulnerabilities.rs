use super::scores::parse_score_sets;
use super::{guard, non_empty, Acknowledgments, Handler, Notes, ParentCode, References};
use crate::conversion::domain::csaf::{
    Cwe, Involvement, Remediation, Threat, Vulnerability, VulnerabilityId,
};
use crate::conversion::domain::cvrf;
use crate::conversion::domain::{ConversionConfig, Diagnostics, Fragment};
use crate::conversion::policies::dialect::REMEDIATION_CATEGORY;
use crate::conversion::policies::timestamp;
use crate::shared::error::StructureError;
use roxmltree::Node;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Product status types whose products count as affected
const AFFECTED_STATUSES: [&str; 3] = ["known_affected", "first_affected", "last_affected"];

/// Product ids grouped by status type, in order of first occurrence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductStatus {
    groups: Vec<(String, Vec<String>)>,
}

impl ProductStatus {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Add ids under a status type, skipping ids already listed for it
    pub fn extend(&mut self, status: String, product_ids: Vec<String>) {
        let index = match self.groups.iter().position(|(known, _)| *known == status) {
            Some(index) => index,
            None => {
                self.groups.push((status, Vec::new()));
                self.groups.len() - 1
            }
        };
        let ids = &mut self.groups[index].1;
        for product_id in product_ids {
            if !ids.contains(&product_id) {
                ids.push(product_id);
            }
        }
    }

    pub fn ids(&self, status: &str) -> &[String] {
        self.groups
            .iter()
            .find(|(known, _)| known == status)
            .map(|(_, ids)| ids.as_slice())
            .unwrap_or_default()
    }

    /// Known, first and last affected product ids, sorted and deduplicated
    pub fn affected_product_ids(&self) -> Vec<String> {
        AFFECTED_STATUSES
            .iter()
            .flat_map(|status| self.ids(status).iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn to_map(&self) -> Map<String, Value> {
        self.groups
            .iter()
            .map(|(status, ids)| {
                let ids = ids.iter().cloned().map(Value::String).collect();
                (status.clone(), Value::Array(ids))
            })
            .collect()
    }
}

/// `/vulnerabilities` from every `Vulnerability` element of the document
pub struct Vulnerabilities {
    config: ConversionConfig,
    records: Vec<Fragment>,
    diagnostics: Diagnostics,
}

impl Vulnerabilities {
    pub fn new(config: &ConversionConfig) -> Self {
        Self {
            config: config.clone(),
            records: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Build one vulnerability record; every member is guarded on its own
    fn vulnerability(&mut self, node: Node<'_, '_>) -> Fragment {
        let mut record = Vulnerability::default();
        let mut nested = Vec::new();

        if let Some(acks) = cvrf::child(node, "Acknowledgments") {
            nested.push(self.nested(Acknowledgments::new(ParentCode::Vuln), acks));
        }

        record.cve = cvrf::child_text(node, "CVE");

        let cwe = cwe(node, &mut self.diagnostics);
        record.cwe = guard(&mut self.diagnostics, "cwe", cwe).flatten();

        record.discovery_date = cvrf::child_text(node, "DiscoveryDate")
            .and_then(|text| timestamp::normalize_into(&text, &mut self.diagnostics));

        let ids = ids(node);
        record.ids = guard(&mut self.diagnostics, "ids", ids).and_then(non_empty);

        if let Some(involvements) = cvrf::child(node, "Involvements") {
            let parsed = self::involvements(involvements);
            record.involvements =
                guard(&mut self.diagnostics, "involvements", parsed).and_then(non_empty);
        }

        if let Some(notes) = cvrf::child(node, "Notes") {
            nested.push(self.nested(Notes::new(ParentCode::Vuln), notes));
        }

        let mut product_status = ProductStatus::default();
        if let Some(statuses) = cvrf::child(node, "ProductStatuses") {
            let parsed = self::product_status(statuses);
            if let Some(parsed) = guard(&mut self.diagnostics, "product_status", parsed) {
                product_status = parsed;
            }
            if !product_status.is_empty() {
                record.product_status = Some(product_status.to_map());
            }
        }
        let affected = product_status.affected_product_ids();

        if let Some(references) = cvrf::child(node, "References") {
            let handler = References::new(&self.config, ParentCode::Vuln);
            nested.push(self.nested(handler, references));
        }

        record.release_date = cvrf::child_text(node, "ReleaseDate")
            .and_then(|text| timestamp::normalize_into(&text, &mut self.diagnostics));

        if let Some(remediations) = cvrf::child(node, "Remediations") {
            let parsed = self.remediations(remediations, &affected);
            record.remediations =
                guard(&mut self.diagnostics, "remediations", parsed).and_then(non_empty);
        }

        if let Some(score_sets) = cvrf::child(node, "CVSSScoreSets") {
            let scores = parse_score_sets(score_sets, &self.config, &affected, &mut self.diagnostics);
            if scores.is_empty() {
                self.diagnostics.warning(
                    "None of the ScoreSet elements parsed, removing \"scores\" entry from the output.",
                );
            } else {
                record.scores = Some(scores);
            }
        }

        if let Some(threats) = cvrf::child(node, "Threats") {
            let parsed = self.threats(threats);
            record.threats = guard(&mut self.diagnostics, "threats", parsed).and_then(non_empty);
        }

        record.title = cvrf::child_text(node, "Title");

        let mut fragment = match Fragment::serialized(&[], &record) {
            Ok(fragment) => fragment,
            Err(err) => {
                self.diagnostics
                    .error(format!("serializing vulnerability record failed with {}", err));
                Fragment::new()
            }
        };
        for part in nested {
            if let Err(conflicts) = fragment.merge(part) {
                for conflict in conflicts {
                    self.diagnostics.error(conflict.to_string());
                }
            }
        }
        fragment
    }

    /// Run a shared sub-handler and adopt its diagnostics
    fn nested<H: Handler>(&mut self, mut handler: H, node: Node<'_, '_>) -> Fragment {
        handler.load(node);
        self.diagnostics.extend(handler.diagnostics().clone());
        match handler.dump() {
            Ok(fragment) => fragment,
            Err(err) => {
                self.diagnostics.error(format!(
                    "serializing {} failed with {}",
                    cvrf::tag(node),
                    err
                ));
                Fragment::new()
            }
        }
    }

    fn remediations(
        &mut self,
        node: Node<'_, '_>,
        affected: &[String],
    ) -> Result<Vec<Remediation>, StructureError> {
        let mut remediations = Vec::new();
        for entry in cvrf::children(node, "Remediation") {
            let remediation_type = cvrf::require_attribute(entry, "Type")?;
            let category = REMEDIATION_CATEGORY.translate(remediation_type).map(str::to_string);
            if category.is_none() {
                self.diagnostics.error(format!(
                    "unknown remediation type {} at input line {}, omitting category",
                    remediation_type,
                    cvrf::line(entry)
                ));
            }

            let mut product_ids = non_empty(cvrf::children_texts(entry, "ProductID"));
            let group_ids = non_empty(cvrf::children_texts(entry, "GroupID"));
            if product_ids.is_none() && group_ids.is_none() {
                product_ids = non_empty(affected.to_vec());
                if product_ids.is_none() {
                    self.diagnostics
                        .error("No product_ids or group_ids entries for remediation.");
                }
            }

            remediations.push(Remediation {
                category,
                date: entry
                    .attribute("Date")
                    .and_then(|date| timestamp::normalize_into(date, &mut self.diagnostics)),
                details: cvrf::require_child_text(entry, "Description")?,
                entitlements: non_empty(cvrf::children_texts(entry, "Entitlement")),
                group_ids,
                product_ids,
                url: cvrf::child_text(entry, "URL"),
            });
        }
        Ok(remediations)
    }

    fn threats(&mut self, node: Node<'_, '_>) -> Result<Vec<Threat>, StructureError> {
        let mut threats = Vec::new();
        for entry in cvrf::children(node, "Threat") {
            threats.push(Threat {
                category: cvrf::snake_token(cvrf::require_attribute(entry, "Type")?),
                date: entry
                    .attribute("Date")
                    .and_then(|date| timestamp::normalize_into(date, &mut self.diagnostics)),
                details: cvrf::require_child_text(entry, "Description")?,
                group_ids: non_empty(cvrf::children_texts(entry, "GroupID")),
                product_ids: non_empty(cvrf::children_texts(entry, "ProductID")),
            });
        }
        Ok(threats)
    }
}

impl Handler for Vulnerabilities {
    fn always(&mut self, _node: Node<'_, '_>) -> Result<(), StructureError> {
        Ok(())
    }

    fn sometimes(&mut self, node: Node<'_, '_>) -> Result<(), StructureError> {
        for vulnerability in cvrf::children(node, "Vulnerability") {
            let record = self.vulnerability(vulnerability);
            self.records.push(record);
        }
        Ok(())
    }

    fn dump(&self) -> serde_json::Result<Fragment> {
        if self.records.is_empty() {
            return Ok(Fragment::new());
        }
        let records = self
            .records
            .iter()
            .cloned()
            .map(Fragment::into_value)
            .collect();
        Ok(Fragment::at(&["vulnerabilities"], Value::Array(records)))
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }
}

fn cwe(node: Node<'_, '_>, diagnostics: &mut Diagnostics) -> Result<Option<Cwe>, StructureError> {
    let cwes = cvrf::children(node, "CWE");
    let Some(first) = cwes.first() else {
        return Ok(None);
    };
    if cwes.len() > 1 {
        diagnostics.warning(format!(
            "{} CWE elements found, using only the first one.",
            cwes.len()
        ));
    }
    Ok(Some(Cwe {
        id: cvrf::require_attribute(*first, "ID")?.to_string(),
        name: cvrf::require_text(*first)?,
    }))
}

fn ids(node: Node<'_, '_>) -> Result<Vec<VulnerabilityId>, StructureError> {
    cvrf::children(node, "ID")
        .into_iter()
        .map(|id| {
            Ok(VulnerabilityId {
                system_name: cvrf::require_attribute(id, "SystemName")?.to_string(),
                text: cvrf::require_text(id)?,
            })
        })
        .collect()
}

fn involvements(node: Node<'_, '_>) -> Result<Vec<Involvement>, StructureError> {
    cvrf::children(node, "Involvement")
        .into_iter()
        .map(|involvement| {
            Ok(Involvement {
                party: cvrf::snake_token(cvrf::require_attribute(involvement, "Party")?),
                status: cvrf::snake_token(cvrf::require_attribute(involvement, "Status")?),
                summary: cvrf::child_text(involvement, "Description"),
            })
        })
        .collect()
}

fn product_status(node: Node<'_, '_>) -> Result<ProductStatus, StructureError> {
    let mut product_status = ProductStatus::default();
    for status in cvrf::children(node, "Status") {
        let status_type = cvrf::snake_token(cvrf::require_attribute(status, "Type")?);
        product_status.extend(status_type, cvrf::children_texts(status, "ProductID"));
    }
    Ok(product_status)
}
