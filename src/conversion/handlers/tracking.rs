use super::{non_empty, Handler};
use crate::conversion::domain::csaf::{self, Engine, Generator, RevisionEntry};
use crate::conversion::domain::cvrf;
use crate::conversion::domain::{ConversionConfig, Diagnostics, Fragment};
use crate::conversion::policies::dialect::TRACKING_STATUS;
use crate::conversion::policies::timestamp::{self, NOW_CODE};
use crate::conversion::policies::versioning::{cleanse_id, integer_tuple, is_version_t};
use crate::shared::error::StructureError;
use roxmltree::Node;

/// Engine name reported in `/document/tracking/generator`
pub const ENGINE_NAME: &str = env!("CARGO_PKG_NAME");

/// Engine version reported in `/document/tracking/generator`
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `/document/tracking` from `DocumentTracking`
pub struct Tracking {
    fix_insert_current_version: bool,
    record: csaf::Tracking,
    diagnostics: Diagnostics,
}

impl Tracking {
    pub fn new(config: &ConversionConfig) -> Self {
        let mut diagnostics = Diagnostics::new();
        let processing_date = timestamp::normalize_into(NOW_CODE, &mut diagnostics);
        Self {
            fix_insert_current_version: config.fix_insert_current_version_into_revision_history,
            record: csaf::Tracking {
                aliases: None,
                current_release_date: None,
                generator: Generator {
                    date: processing_date,
                    engine: Engine {
                        name: ENGINE_NAME.to_string(),
                        version: ENGINE_VERSION.to_string(),
                    },
                },
                id: None,
                initial_release_date: None,
                revision_history: None,
                status: None,
                version: None,
            },
            diagnostics,
        }
    }

    /// Cleansed tracking identifier, once ingested
    pub fn identifier(&self) -> Option<&str> {
        self.record.id.as_deref()
    }

    fn timestamp(&mut self, text: &str) -> Option<String> {
        timestamp::normalize_into(text, &mut self.diagnostics)
    }
}

impl Handler for Tracking {
    fn always(&mut self, node: Node<'_, '_>) -> Result<(), StructureError> {
        let current_release_text = cvrf::require_child_text(node, "CurrentReleaseDate")?;
        let current_release_date = self.timestamp(&current_release_text);
        self.record.current_release_date = current_release_date.clone();
        let initial_release_text = cvrf::require_child_text(node, "InitialReleaseDate")?;
        self.record.initial_release_date = self.timestamp(&initial_release_text);

        let identification = cvrf::require_child(node, "Identification")?;
        let (id, cleansed) = cleanse_id(&cvrf::require_child_text(identification, "ID")?);
        if cleansed {
            self.diagnostics.warning(format!(
                "tracking identifier contained surrounding whitespace or line breaks, using {}",
                id
            ));
        }
        self.record.id = Some(id);

        let status = cvrf::require_child_text(node, "Status")?;
        match TRACKING_STATUS.translate(&status) {
            Some(status) => self.record.status = Some(status.to_string()),
            None => self.diagnostics.error(format!(
                "invalid tracking status {}, expected one of Draft, Final, Interim",
                status
            )),
        }

        let version = cvrf::require_child_text(node, "Version")?;
        let mut revisions = Vec::new();
        for revision in cvrf::children(cvrf::require_child(node, "RevisionHistory")?, "Revision") {
            let date_text = cvrf::require_child_text(revision, "Date")?;
            revisions.push(RevisionEntry {
                date: self.timestamp(&date_text),
                legacy_version: None,
                number: cvrf::require_child_text(revision, "Number")?,
                summary: cvrf::require_child_text(revision, "Description")?,
            });
        }

        let (revision_history, version) = reconcile_revision_history(
            revisions,
            &version,
            current_release_date,
            self.fix_insert_current_version,
            &mut self.diagnostics,
        );
        self.record.revision_history = Some(revision_history);
        self.record.version = Some(version);
        Ok(())
    }

    fn sometimes(&mut self, node: Node<'_, '_>) -> Result<(), StructureError> {
        if let Some(identification) = cvrf::child(node, "Identification") {
            self.record.aliases = non_empty(cvrf::children_texts(identification, "Alias"));
        }
        Ok(())
    }

    fn dump(&self) -> serde_json::Result<Fragment> {
        Fragment::serialized(&["document", "tracking"], &self.record)
    }

    fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }
}

/// Repair the revision history against the current document version
///
/// A missing current version is appended when `fix_missing` is set and is an
/// ERROR otherwise. When any revision number violates `version_t` all entries
/// are sorted by their dotted-integer tuple and renumbered from 1, keeping the
/// original number as `legacy_version`; this needs the current version to be
/// present in the history.
///
/// # Returns
/// The final revision history and the resolved document version
pub fn reconcile_revision_history(
    mut entries: Vec<RevisionEntry>,
    version: &str,
    current_release_date: Option<String>,
    fix_missing: bool,
    diagnostics: &mut Diagnostics,
) -> (Vec<RevisionEntry>, String) {
    let mut missing_current_version = false;
    if !entries.iter().any(|entry| entry.number == version) {
        if fix_missing {
            entries.push(RevisionEntry {
                date: current_release_date,
                legacy_version: None,
                number: version.to_string(),
                summary: format!(
                    "Added by {} as the value was missing in the original CVRF.",
                    ENGINE_NAME
                ),
            });
            diagnostics.warning(
                "Trying to fix the revision history by adding the current version. \
                 This may lead to inconsistent history. \
                 This happens because fix_insert_current_version_into_revision_history is used.",
            );
        } else {
            missing_current_version = true;
            diagnostics.error(
                "Current version is missing in revision history. \
                 This can be fixed by using --fix-insert-current-version-into-revision-history.",
            );
        }
    }

    if entries.iter().all(|entry| is_version_t(&entry.number)) {
        return (entries, version.to_string());
    }

    if missing_current_version {
        diagnostics.error(
            "Can not reindex revision history to integers because of missing the current version. \
             This can be fixed with --fix-insert-current-version-into-revision-history.",
        );
        return (entries, version.to_string());
    }

    diagnostics.warning(
        "Some version numbers in revision_history do not match semantic versioning. Reindexing to integers.",
    );
    entries.sort_by_key(|entry| integer_tuple(&entry.number));
    for (rank, entry) in entries.iter_mut().enumerate() {
        let original = std::mem::replace(&mut entry.number, (rank + 1).to_string());
        entry.legacy_version = Some(original);
    }

    let resolved = entries
        .iter()
        .find(|entry| entry.legacy_version.as_deref() == Some(version))
        .map(|entry| entry.number.clone())
        .unwrap_or_else(|| version.to_string());
    (entries, resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::domain::Severity;
    use roxmltree::Document;
    use serde_json::json;

    fn entry(number: &str) -> RevisionEntry {
        RevisionEntry {
            date: Some("2017-03-01T14:58:48.000+00:00".to_string()),
            legacy_version: None,
            number: number.to_string(),
            summary: format!("revision {}", number),
        }
    }

    fn numbers(entries: &[RevisionEntry]) -> Vec<(&str, Option<&str>)> {
        entries
            .iter()
            .map(|e| (e.number.as_str(), e.legacy_version.as_deref()))
            .collect()
    }

    fn tracking_xml(version: &str, revisions: &[&str]) -> String {
        let revisions: String = revisions
            .iter()
            .map(|number| {
                format!(
                    "<Revision><Number>{}</Number><Date>2017-03-01T14:58:48</Date><Description>Initial</Description></Revision>",
                    number
                )
            })
            .collect();
        format!(
            concat!(
                "<DocumentTracking>",
                "<Identification><ID>vendorix-sa-20170301-abc</ID><Alias>ALIAS-1</Alias></Identification>",
                "<Status>Final</Status><Version>{}</Version>",
                "<RevisionHistory>{}</RevisionHistory>",
                "<InitialReleaseDate>2017-03-01T14:58:48</InitialReleaseDate>",
                "<CurrentReleaseDate>2017-03-02T10:00:00Z</CurrentReleaseDate>",
                "</DocumentTracking>"
            ),
            version, revisions
        )
    }

    fn load(xml: &str, config: &ConversionConfig) -> Tracking {
        let doc = Document::parse(xml).unwrap();
        let mut handler = Tracking::new(config);
        handler.load(doc.root_element());
        handler
    }

    #[test]
    fn test_semver_history_passes_through() {
        let mut diagnostics = Diagnostics::new();
        let (entries, version) = reconcile_revision_history(
            vec![entry("1.0.0"), entry("1.1.0")],
            "1.1.0",
            None,
            false,
            &mut diagnostics,
        );
        assert!(diagnostics.is_empty());
        assert_eq!(version, "1.1.0");
        assert_eq!(numbers(&entries), vec![("1.0.0", None), ("1.1.0", None)]);
    }

    #[test]
    fn test_single_non_semver_entry_is_renumbered() {
        let mut diagnostics = Diagnostics::new();
        let (entries, version) =
            reconcile_revision_history(vec![entry("1.0")], "1.0", None, false, &mut diagnostics);
        assert_eq!(version, "1");
        assert_eq!(numbers(&entries), vec![("1", Some("1.0"))]);
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.count(Severity::Warning), 1);
    }

    #[test]
    fn test_non_numeric_numbers_sort_last() {
        let mut diagnostics = Diagnostics::new();
        let (entries, version) = reconcile_revision_history(
            vec![entry("bogus"), entry("1.0")],
            "1.0",
            None,
            false,
            &mut diagnostics,
        );
        assert_eq!(version, "1");
        assert_eq!(
            numbers(&entries),
            vec![("1", Some("1.0")), ("2", Some("bogus"))]
        );
    }

    #[test]
    fn test_renumbering_orders_by_integer_tuple() {
        let mut diagnostics = Diagnostics::new();
        let (entries, version) = reconcile_revision_history(
            vec![entry("1.10"), entry("1.2"), entry("1.9")],
            "1.9",
            None,
            false,
            &mut diagnostics,
        );
        assert_eq!(version, "2");
        assert_eq!(
            numbers(&entries),
            vec![("1", Some("1.2")), ("2", Some("1.9")), ("3", Some("1.10"))]
        );
    }

    #[test]
    fn test_missing_current_version_without_fix_is_error() {
        let mut diagnostics = Diagnostics::new();
        let (entries, version) = reconcile_revision_history(
            vec![entry("1.0.0")],
            "2.0.0",
            None,
            false,
            &mut diagnostics,
        );
        assert!(diagnostics.has_errors());
        assert_eq!(version, "2.0.0");
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_missing_current_version_with_fix_is_appended() {
        let mut diagnostics = Diagnostics::new();
        let (entries, version) = reconcile_revision_history(
            vec![entry("1.0.0")],
            "2.0.0",
            Some("2017-03-02T10:00:00.000+00:00".to_string()),
            true,
            &mut diagnostics,
        );
        assert!(!diagnostics.has_errors());
        assert_eq!(version, "2.0.0");
        let added = &entries[1];
        assert_eq!(added.number, "2.0.0");
        assert_eq!(added.date.as_deref(), Some("2017-03-02T10:00:00.000+00:00"));
        assert_eq!(
            added.summary,
            "Added by cvrf2csaf as the value was missing in the original CVRF."
        );
    }

    #[test]
    fn test_missing_current_version_and_non_semver_is_not_renumbered() {
        let mut diagnostics = Diagnostics::new();
        let (entries, version) =
            reconcile_revision_history(vec![entry("1.0")], "2.0", None, false, &mut diagnostics);
        assert_eq!(diagnostics.count(Severity::Error), 2);
        assert_eq!(version, "2.0");
        assert_eq!(numbers(&entries), vec![("1.0", None)]);
    }

    #[test]
    fn test_fix_then_renumber_resolves_inserted_version() {
        let mut diagnostics = Diagnostics::new();
        let (entries, version) =
            reconcile_revision_history(vec![entry("1")], "2.0", None, true, &mut diagnostics);
        assert_eq!(version, "2");
        assert_eq!(numbers(&entries), vec![("1", Some("1")), ("2", Some("2.0"))]);
    }

    #[test]
    fn test_tracking_handler_output() {
        let handler = load(&tracking_xml("1.0.0", &["1.0.0"]), &ConversionConfig::default());
        assert!(!handler.has_errors(), "{:?}", handler.diagnostics());
        assert_eq!(handler.identifier(), Some("vendorix-sa-20170301-abc"));

        let fragment = handler.dump().unwrap();
        let tracking = fragment.pointer(&["document", "tracking"]).unwrap();
        assert_eq!(tracking["status"], json!("final"));
        assert_eq!(tracking["version"], json!("1.0.0"));
        assert_eq!(tracking["aliases"], json!(["ALIAS-1"]));
        assert_eq!(
            tracking["initial_release_date"],
            json!("2017-03-01T14:58:48.000+00:00")
        );
        assert_eq!(
            tracking["current_release_date"],
            json!("2017-03-02T10:00:00.000+00:00")
        );
        assert_eq!(
            tracking["revision_history"],
            json!([{
                "date": "2017-03-01T14:58:48.000+00:00",
                "number": "1.0.0",
                "summary": "Initial"
            }])
        );
        assert_eq!(tracking["generator"]["engine"]["name"], json!("cvrf2csaf"));
        assert_eq!(tracking["generator"]["engine"]["version"], json!(ENGINE_VERSION));
        assert!(tracking["generator"]["date"].is_string());
    }

    #[test]
    fn test_unknown_status_is_error_and_omitted() {
        let xml = tracking_xml("1.0.0", &["1.0.0"]).replace("Final", "Published");
        let handler = load(&xml, &ConversionConfig::default());
        assert!(handler.has_errors());
        let fragment = handler.dump().unwrap();
        assert!(fragment
            .pointer(&["document", "tracking", "status"])
            .is_none());
    }

    #[test]
    fn test_identifier_is_cleansed_with_warning() {
        let xml = tracking_xml("1.0.0", &["1.0.0"])
            .replace("<ID>vendorix-sa-20170301-abc</ID>", "<ID>\n  vendorix-sa-20170301-abc \n</ID>");
        let handler = load(&xml, &ConversionConfig::default());
        assert_eq!(handler.identifier(), Some("vendorix-sa-20170301-abc"));
        assert_eq!(handler.diagnostics().count(Severity::Warning), 1);
    }

    #[test]
    fn test_bad_release_date_is_critical_and_omitted() {
        let xml = tracking_xml("1.0.0", &["1.0.0"]).replace(
            "<InitialReleaseDate>2017-03-01T14:58:48</InitialReleaseDate>",
            "<InitialReleaseDate>yesterday</InitialReleaseDate>",
        );
        let handler = load(&xml, &ConversionConfig::default());
        assert!(handler.diagnostics().has_critical());
        let fragment = handler.dump().unwrap();
        assert!(fragment
            .pointer(&["document", "tracking", "initial_release_date"])
            .is_none());
        assert!(fragment
            .pointer(&["document", "tracking", "version"])
            .is_some());
    }

    #[test]
    fn test_handler_applies_fix_option() {
        let config = ConversionConfig {
            fix_insert_current_version_into_revision_history: true,
            ..ConversionConfig::default()
        };
        let handler = load(&tracking_xml("2.0.0", &["1.0.0"]), &config);
        assert!(!handler.has_errors());
        let fragment = handler.dump().unwrap();
        let history = fragment
            .pointer(&["document", "tracking", "revision_history"])
            .unwrap();
        assert_eq!(history.as_array().unwrap().len(), 2);
        assert_eq!(history[1]["date"], json!("2017-03-02T10:00:00.000+00:00"));
    }

    #[test]
    fn test_missing_revision_history_is_error() {
        let xml = tracking_xml("1.0.0", &[]).replace("<RevisionHistory></RevisionHistory>", "");
        let handler = load(&xml, &ConversionConfig::default());
        assert!(handler.has_errors());
    }
}
