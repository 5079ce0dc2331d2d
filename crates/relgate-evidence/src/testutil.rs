//! Shared fixtures for this crate's tests.

use crate::writer::BundleWriteRequest;
use chrono::{DateTime, TimeZone, Utc};
use relgate_kernel::{GateDecision, VerificationRuleResult, VerificationStatus};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    pub(crate) fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "relgate-evidence-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
}

pub(crate) fn sample_request() -> BundleWriteRequest {
    BundleWriteRequest {
        release_id: "RC-1".to_string(),
        gate_id: "G-USABILITY".to_string(),
        bundle_id: "B-001".to_string(),
        scope: "committed".to_string(),
        story_ids: vec!["S-12".to_string(), "S-4".to_string(), "S-12".to_string()],
        results: vec![
            VerificationRuleResult {
                verification_id: "VR-COM-002-DEDUP".to_string(),
                status: VerificationStatus::Pass,
                evidence_refs: vec!["raw-data/VR-COM-002-DEDUP.json".to_string()],
                notes: None,
            },
            VerificationRuleResult {
                verification_id: "VR-COM-001-LIST-SYNC".to_string(),
                status: VerificationStatus::Pass,
                evidence_refs: vec![],
                notes: Some("two devices".to_string()),
            },
        ],
        required_owners: vec!["bob".to_string(), "alice".to_string()],
        approvals: vec!["alice".to_string(), "bob".to_string(), "alice".to_string()],
        decision: GateDecision::Retain,
        rationale: "all gate conditions satisfied".to_string(),
        results_appendix: None,
        extra_artifacts: BTreeMap::from([
            (
                "ui-usability-task-runs.json".to_string(),
                serde_json::json!({"runs": []}),
            ),
            (
                "ui-usability-summary.json".to_string(),
                serde_json::json!({"tasks": 0}),
            ),
            (
                "operator-notes.txt".to_string(),
                Value::String("observed on device farm\n".to_string()),
            ),
        ]),
    }
}
