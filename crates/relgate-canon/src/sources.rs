//! The canonical source set: read-only ground truth for one evaluation run.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Product spec: committed verification IDs in backticks.
pub const PRODUCT_SPEC_DOC: &str = "product-spec.md";
/// Gates/roadmap spec: markdown table with `G-…` rows and JSON-array owner cells.
pub const RELEASE_GATES_DOC: &str = "release-gates.md";
/// Backlog spec: headings tagging committed field-test scenarios.
pub const FIELD_TEST_BACKLOG_DOC: &str = "field-test-backlog.md";

/// Ground truth derived once per run from the specification documents.
///
/// Evidence is checked *against* this set, never the other way around.
/// Every collection is de-duplicated and lexicographically sorted so equal
/// documents always produce byte-identical resolutions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalSourceSet {
    pub committed_verification_ids: BTreeSet<String>,
    /// Canonical owner list per gate, owners sorted and de-duplicated.
    pub gate_owners_by_gate_id: BTreeMap<String, Vec<String>>,
    pub committed_field_test_scenario_ids: BTreeSet<String>,
    /// One entry per document gap or malformed row; never silently empty
    /// when a source could not be trusted.
    pub unresolved_sources: Vec<String>,
}

impl CanonicalSourceSet {
    /// Whether every expected document resolved cleanly.
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved_sources.is_empty()
    }

    /// Sort and de-duplicate the issue list after all passes ran.
    pub(crate) fn finalize(&mut self) {
        let unique: BTreeSet<String> = self.unresolved_sources.drain(..).collect();
        self.unresolved_sources = unique.into_iter().collect();
    }
}
