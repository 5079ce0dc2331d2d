//! Canonical filesystem layout constants and per-kind artifact schemas.

use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const RESULTS_FILE: &str = "verification-results.md";
pub const DECISION_FILE: &str = "decision.json";
pub const APPROVALS_FILE: &str = "approvals.json";
pub const RAW_DATA_DIR: &str = "raw-data";

/// Fixed artifact-format version stamped into every manifest.
pub const ARTIFACT_VERSION: &str = "release-evidence.v1";

/// Release-level reported verification outcomes.
pub const OUTCOMES_FILE: &str = "verification-outcomes.json";
/// Release-level reported field-test coverage.
pub const COVERAGE_FILE: &str = "field-test-coverage.json";

const USABILITY_TASK_RUNS_FILE: &str = "ui-usability-task-runs.json";
const USABILITY_SUMMARY_FILE: &str = "ui-usability-summary.json";

/// Required-artifact schema for one bundle kind.
///
/// The raw-data files a bundle must carry depend on what kind of evidence
/// it is; the schema travels with the reader call instead of living in a
/// global list, so unrelated bundle kinds are never marked incomplete for
/// artifacts they were never meant to contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSchema {
    pub kind: String,
    /// Raw-data file names every bundle of this kind must contain.
    pub required_raw_artifacts: Vec<String>,
}

impl ArtifactSchema {
    /// The usability bundle kind produced by the end-user application's
    /// verification runs.
    pub fn usability() -> Self {
        Self {
            kind: "usability".to_string(),
            required_raw_artifacts: vec![
                USABILITY_TASK_RUNS_FILE.to_string(),
                USABILITY_SUMMARY_FILE.to_string(),
            ],
        }
    }

    /// A kind with no raw-data requirements beyond the per-result files.
    pub fn bare(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            required_raw_artifacts: Vec::new(),
        }
    }
}

impl Default for ArtifactSchema {
    fn default() -> Self {
        Self::usability()
    }
}

/// `<evidenceRoot>/<releaseId>`
pub fn release_dir(evidence_root: &Path, release_id: &str) -> PathBuf {
    evidence_root.join(release_id)
}

/// `<evidenceRoot>/<releaseId>/<gateId>/<bundleId>`
pub fn bundle_dir(
    evidence_root: &Path,
    release_id: &str,
    gate_id: &str,
    bundle_id: &str,
) -> PathBuf {
    release_dir(evidence_root, release_id)
        .join(gate_id)
        .join(bundle_id)
}
