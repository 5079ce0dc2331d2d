//! Markdown implementation of the canonical source provider.
//!
//! Three independent extraction passes, one per document. Each pass
//! tolerates a missing or unscannable document by recording an
//! `unresolved_sources` entry and leaving its set empty.

use crate::provider::{CanonicalResolution, CanonicalSourceProvider};
use crate::sources::{
    CanonicalSourceSet, FIELD_TEST_BACKLOG_DOC, PRODUCT_SPEC_DOC, RELEASE_GATES_DOC,
};
use regex::Regex;
use relgate_kernel::ReadinessError;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Resolves canonical sources from the three markdown specification
/// documents under one specs root.
#[derive(Debug, Clone)]
pub struct MarkdownSpecProvider {
    product_spec: PathBuf,
    gates_spec: PathBuf,
    backlog_spec: PathBuf,
}

impl MarkdownSpecProvider {
    /// Build a provider over `specs_root`.
    ///
    /// A root that is not a directory is a configuration error and fails
    /// fast; individual missing documents inside an existing root degrade
    /// to `missing_source:` entries at resolution time.
    pub fn new(specs_root: impl Into<PathBuf>) -> Result<Self, ReadinessError> {
        let root = specs_root.into();
        if !root.is_dir() {
            return Err(ReadinessError::SpecsRootUnreadable {
                path: root.display().to_string(),
            });
        }
        Ok(Self {
            product_spec: root.join(PRODUCT_SPEC_DOC),
            gates_spec: root.join(RELEASE_GATES_DOC),
            backlog_spec: root.join(FIELD_TEST_BACKLOG_DOC),
        })
    }
}

impl CanonicalSourceProvider for MarkdownSpecProvider {
    fn resolve(&self) -> CanonicalResolution {
        let mut sources = CanonicalSourceSet::default();
        let mut consulted = Vec::new();

        match read_document(&self.product_spec) {
            Some(text) => {
                consulted.push(self.product_spec.clone());
                match extract_verification_ids(&text) {
                    Ok(ids) => sources.committed_verification_ids = ids,
                    Err(detail) => sources
                        .unresolved_sources
                        .push(format!("source_scan_failed:{PRODUCT_SPEC_DOC}:{detail}")),
                }
            }
            None => sources
                .unresolved_sources
                .push(format!("missing_source:{PRODUCT_SPEC_DOC}")),
        }

        match read_document(&self.gates_spec) {
            Some(text) => {
                consulted.push(self.gates_spec.clone());
                match extract_gate_owners(&text) {
                    Ok((owners, issues)) => {
                        sources.gate_owners_by_gate_id = owners;
                        sources.unresolved_sources.extend(issues);
                    }
                    Err(detail) => sources
                        .unresolved_sources
                        .push(format!("source_scan_failed:{RELEASE_GATES_DOC}:{detail}")),
                }
            }
            None => sources
                .unresolved_sources
                .push(format!("missing_source:{RELEASE_GATES_DOC}")),
        }

        match read_document(&self.backlog_spec) {
            Some(text) => {
                consulted.push(self.backlog_spec.clone());
                match extract_committed_scenarios(&text) {
                    Ok(ids) => sources.committed_field_test_scenario_ids = ids,
                    Err(detail) => sources
                        .unresolved_sources
                        .push(format!("source_scan_failed:{FIELD_TEST_BACKLOG_DOC}:{detail}")),
                }
            }
            None => sources
                .unresolved_sources
                .push(format!("missing_source:{FIELD_TEST_BACKLOG_DOC}")),
        }

        if sources.committed_verification_ids.is_empty() {
            sources
                .unresolved_sources
                .push("missing_committed_verification_ids".to_string());
        }
        if sources.gate_owners_by_gate_id.is_empty() {
            sources
                .unresolved_sources
                .push("missing_committed_gate_owners".to_string());
        }
        if sources.committed_field_test_scenario_ids.is_empty() {
            sources
                .unresolved_sources
                .push("missing_committed_field_test_scenarios".to_string());
        }

        sources.finalize();
        CanonicalResolution { sources, consulted }
    }
}

fn read_document(path: &Path) -> Option<String> {
    if !path.is_file() {
        return None;
    }
    fs::read_to_string(path).ok()
}

/// Committed verification IDs: backtick-delimited `VR-COM-###-UPPERCASE-WORDS`
/// tokens anywhere in the product spec.
pub fn extract_verification_ids(text: &str) -> Result<BTreeSet<String>, String> {
    let id_re = Regex::new(r"`(VR-COM-\d{3}(?:-[A-Z][A-Z0-9]*)+)`")
        .map_err(|err| format!("failed compiling verification-id regex: {err}"))?;
    let mut ids = BTreeSet::new();
    for caps in id_re.captures_iter(text) {
        if let Some(id) = caps.get(1) {
            ids.insert(id.as_str().to_string());
        }
    }
    Ok(ids)
}

/// Gate owner lists from the gates table.
///
/// Rows whose first cell starts with `` `G- `` are parsed; the second cell
/// must be a JSON string array. Malformed rows become issues, never errors.
#[allow(clippy::type_complexity)]
pub fn extract_gate_owners(
    text: &str,
) -> Result<(BTreeMap<String, Vec<String>>, Vec<String>), String> {
    let gate_ref_re = Regex::new(r"`([^`]+)`")
        .map_err(|err| format!("failed compiling gate-ref regex: {err}"))?;

    let mut owners_by_gate = BTreeMap::new();
    let mut issues = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if !line.starts_with('|') {
            continue;
        }
        let cells: Vec<&str> = line
            .trim_matches('|')
            .split('|')
            .map(str::trim)
            .collect();
        let Some(first) = cells.first() else {
            continue;
        };
        if !first.starts_with("`G-") {
            continue;
        }

        let Some(gate_id) = gate_ref_re
            .captures(first)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
        else {
            let hint = first.trim_matches('`').trim();
            issues.push(format!("invalid_gate_owner_format:{hint}"));
            continue;
        };
        if cells.len() < 2 {
            issues.push(format!("invalid_gate_owner_format:{gate_id}"));
            continue;
        }

        match parse_owner_list(cells[1]) {
            Some(owners) => {
                owners_by_gate.insert(gate_id, owners);
            }
            None => issues.push(format!("unparseable_gate_owner_list:{gate_id}")),
        }
    }

    Ok((owners_by_gate, issues))
}

fn parse_owner_list(cell: &str) -> Option<Vec<String>> {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(cell) else {
        return None;
    };
    let mut owners = BTreeSet::new();
    for item in items {
        let Value::String(owner) = item else {
            return None;
        };
        let trimmed = owner.trim();
        if !trimmed.is_empty() {
            owners.insert(trimmed.to_string());
        }
    }
    Some(owners.into_iter().collect())
}

/// Committed field-test scenario IDs: `### Scenario <ID> …` headings that
/// carry an explicit `` (`committed`) `` tag.
pub fn extract_committed_scenarios(text: &str) -> Result<BTreeSet<String>, String> {
    let scenario_re = Regex::new(r"(?m)^###\s+Scenario\s+([A-Za-z0-9._-]+)[^\n]*\(`committed`\)")
        .map_err(|err| format!("failed compiling scenario-heading regex: {err}"))?;
    let mut ids = BTreeSet::new();
    for caps in scenario_re.captures_iter(text) {
        if let Some(id) = caps.get(1) {
            ids.insert(id.as_str().to_string());
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    struct TempDirGuard {
        path: PathBuf,
    }

    impl TempDirGuard {
        fn new(prefix: &str) -> Self {
            let unique = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock should be after unix epoch")
                .as_nanos();
            let path = std::env::temp_dir().join(format!(
                "relgate-canon-{prefix}-{}-{unique}",
                std::process::id()
            ));
            fs::create_dir_all(&path).expect("temp dir should be created");
            Self { path }
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TempDirGuard {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    #[test]
    fn verification_ids_are_extracted_sorted_and_deduplicated() {
        let text = "\
The list must survive `VR-COM-002-DEDUP` and `VR-COM-001-LIST-SYNC`.
Duplicate mention of `VR-COM-002-DEDUP` changes nothing, and prose like
VR-COM-003-UNTICKED (no backticks) or `vr-com-004-lower` never counts.";
        let ids = extract_verification_ids(text).unwrap();
        assert_eq!(
            ids.into_iter().collect::<Vec<_>>(),
            vec![
                "VR-COM-001-LIST-SYNC".to_string(),
                "VR-COM-002-DEDUP".to_string(),
            ]
        );
    }

    #[test]
    fn gate_owner_rows_parse_json_arrays() {
        let text = "\
| Gate | Owners | Notes |
| --- | --- | --- |
| `G-USABILITY` | [\"alice\", \"bob\", \"alice\"] | weekly |
| `G-SYNC` | [\"carol\"] | |
| plain row | [\"dave\"] | skipped |";
        let (owners, issues) = extract_gate_owners(text).unwrap();
        assert!(issues.is_empty());
        assert_eq!(
            owners.get("G-USABILITY"),
            Some(&vec!["alice".to_string(), "bob".to_string()])
        );
        assert_eq!(owners.get("G-SYNC"), Some(&vec!["carol".to_string()]));
        assert_eq!(owners.len(), 2);
    }

    #[test]
    fn malformed_gate_rows_become_issues_not_errors() {
        let text = "\
| `G-USABILITY` | not-json |
| `G-SHORT |
| `G-SYNC` | [\"carol\", 7] |";
        let (owners, issues) = extract_gate_owners(text).unwrap();
        assert!(owners.is_empty());
        assert_eq!(
            issues,
            vec![
                "unparseable_gate_owner_list:G-USABILITY".to_string(),
                "invalid_gate_owner_format:G-SHORT".to_string(),
                "unparseable_gate_owner_list:G-SYNC".to_string(),
            ]
        );
    }

    #[test]
    fn only_explicitly_committed_scenarios_count() {
        let text = "\
### Scenario FT-07 offline replay (`committed`)
body

### Scenario FT-09 multi-device merge (exploratory)
body

### Scenario FT-03 cold start (`committed`)
";
        let ids = extract_committed_scenarios(text).unwrap();
        assert_eq!(
            ids.into_iter().collect::<Vec<_>>(),
            vec!["FT-03".to_string(), "FT-07".to_string()]
        );
    }

    #[test]
    fn missing_documents_resolve_to_unresolved_sources() {
        let dir = TempDirGuard::new("empty-root");
        let provider = MarkdownSpecProvider::new(dir.path()).unwrap();
        let resolution = provider.resolve();

        assert!(resolution.consulted.is_empty());
        assert!(!resolution.sources.is_fully_resolved());
        assert_eq!(
            resolution.sources.unresolved_sources,
            vec![
                "missing_committed_field_test_scenarios".to_string(),
                "missing_committed_gate_owners".to_string(),
                "missing_committed_verification_ids".to_string(),
                format!("missing_source:{FIELD_TEST_BACKLOG_DOC}"),
                format!("missing_source:{PRODUCT_SPEC_DOC}"),
                format!("missing_source:{RELEASE_GATES_DOC}"),
            ]
        );
    }

    #[test]
    fn full_resolution_reports_all_consulted_documents() {
        let dir = TempDirGuard::new("full-root");
        fs::write(
            dir.path().join(PRODUCT_SPEC_DOC),
            "Sync is committed: `VR-COM-001-LIST-SYNC`.",
        )
        .unwrap();
        fs::write(
            dir.path().join(RELEASE_GATES_DOC),
            "| `G-USABILITY` | [\"alice\"] |",
        )
        .unwrap();
        fs::write(
            dir.path().join(FIELD_TEST_BACKLOG_DOC),
            "### Scenario FT-07 offline replay (`committed`)",
        )
        .unwrap();

        let provider = MarkdownSpecProvider::new(dir.path()).unwrap();
        let resolution = provider.resolve();
        assert!(resolution.sources.is_fully_resolved());
        assert_eq!(resolution.consulted.len(), 3);
        assert!(
            resolution
                .sources
                .committed_verification_ids
                .contains("VR-COM-001-LIST-SYNC")
        );
    }

    #[test]
    fn missing_specs_root_is_a_configuration_error() {
        let dir = TempDirGuard::new("gone");
        let missing = dir.path().join("nope");
        let err = MarkdownSpecProvider::new(&missing).unwrap_err();
        assert!(matches!(err, ReadinessError::SpecsRootUnreadable { .. }));
    }
}
