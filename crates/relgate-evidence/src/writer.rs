//! Evidence bundle writer: produces the five canonical artifacts for one
//! gate/bundle at verification-run time.

use crate::layout::{
    APPROVALS_FILE, ARTIFACT_VERSION, DECISION_FILE, MANIFEST_FILE, RAW_DATA_DIR, RESULTS_FILE,
    bundle_dir,
};
use crate::record::{ApprovalRecord, BundleManifest, DecisionRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use relgate_kernel::{GateDecision, ReadinessError, VerificationRuleResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Everything one bundle write needs from the verification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleWriteRequest {
    pub release_id: String,
    pub gate_id: String,
    pub bundle_id: String,
    /// Scope tag recorded in the manifest.
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default)]
    pub story_ids: Vec<String>,
    #[serde(default)]
    pub results: Vec<VerificationRuleResult>,
    #[serde(default)]
    pub required_owners: Vec<String>,
    #[serde(default)]
    pub approvals: Vec<String>,
    pub decision: GateDecision,
    pub rationale: String,
    /// Optional markdown appendix rendered after the results table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_appendix: Option<String>,
    /// Free-form extras under `raw-data/`: strings are written verbatim,
    /// anything else is pretty-printed JSON.
    #[serde(default)]
    pub extra_artifacts: BTreeMap<String, Value>,
}

fn default_scope() -> String {
    "committed".to_string()
}

/// Write the canonical artifact set for one bundle.
///
/// Every file in the bundle shares the single `now` capture. Directory
/// creation is recursive and idempotent; re-running a write replaces the
/// artifacts in place. Returns the bundle directory.
pub fn write_evidence_bundle(
    evidence_root: &Path,
    request: &BundleWriteRequest,
    now: DateTime<Utc>,
) -> Result<PathBuf, ReadinessError> {
    validate_identifier("releaseId", &request.release_id)?;
    validate_identifier("gateId", &request.gate_id)?;
    validate_identifier("bundleId", &request.bundle_id)?;
    for name in request.extra_artifacts.keys() {
        validate_artifact_name(name)?;
    }

    let dir = bundle_dir(
        evidence_root,
        &request.release_id,
        &request.gate_id,
        &request.bundle_id,
    );
    let raw_dir = dir.join(RAW_DATA_DIR);
    fs::create_dir_all(&raw_dir).map_err(|err| write_error(&raw_dir, err))?;

    let stamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut results = request.results.clone();
    results.sort_by(|a, b| a.verification_id.cmp(&b.verification_id));

    let manifest = BundleManifest {
        release_id: request.release_id.clone(),
        gate_id: request.gate_id.clone(),
        bundle_id: request.bundle_id.clone(),
        scope: request.scope.clone(),
        generated_at_utc: stamp.clone(),
        artifact_version: ARTIFACT_VERSION.to_string(),
        story_ids: sorted_unique(&request.story_ids),
        verification_ids: results
            .iter()
            .map(|result| result.verification_id.clone())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect(),
    };
    write_json(&dir.join(MANIFEST_FILE), &manifest)?;

    write_text(
        &dir.join(RESULTS_FILE),
        &render_results_markdown(&results, request.results_appendix.as_deref()),
    )?;

    for result in &results {
        let path = raw_dir.join(format!("{}.json", result.verification_id));
        write_json(&path, result)?;
    }
    for (name, payload) in &request.extra_artifacts {
        let path = raw_dir.join(name);
        match payload {
            Value::String(text) => write_text(&path, text)?,
            other => write_json(&path, other)?,
        }
    }

    let decision = DecisionRecord {
        gate_id: request.gate_id.clone(),
        bundle_id: request.bundle_id.clone(),
        decision: request.decision,
        rationale: request.rationale.clone(),
        decided_at_utc: stamp.clone(),
    };
    write_json(&dir.join(DECISION_FILE), &decision)?;

    let approvals = ApprovalRecord {
        gate_id: request.gate_id.clone(),
        bundle_id: request.bundle_id.clone(),
        required_owners: sorted_unique(&request.required_owners),
        approvals: sorted_unique(&request.approvals),
        approved_at_utc: stamp,
    };
    write_json(&dir.join(APPROVALS_FILE), &approvals)?;

    Ok(dir)
}

fn render_results_markdown(
    results: &[VerificationRuleResult],
    appendix: Option<&str>,
) -> String {
    let mut out = String::new();
    out.push_str("# Verification Results\n\n");
    out.push_str("| Verification | Status | Evidence | Notes |\n");
    out.push_str("| --- | --- | --- | --- |\n");
    for result in results {
        let evidence = if result.evidence_refs.is_empty() {
            "-".to_string()
        } else {
            result.evidence_refs.join(", ")
        };
        let notes = result.notes.as_deref().unwrap_or("-");
        let _ = writeln!(
            out,
            "| {} | {} | {evidence} | {notes} |",
            result.verification_id,
            result.status.as_str()
        );
    }
    if let Some(appendix) = appendix {
        out.push('\n');
        out.push_str(appendix);
        if !appendix.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

fn sorted_unique(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

fn validate_identifier(label: &str, value: &str) -> Result<(), ReadinessError> {
    if value.trim().is_empty() {
        return Err(ReadinessError::InvalidRequest(format!(
            "{label} must be a non-empty string"
        )));
    }
    if value.contains('/') || value.contains('\\') || value.contains("..") {
        return Err(ReadinessError::InvalidRequest(format!(
            "{label} must not contain path separators: {value:?}"
        )));
    }
    Ok(())
}

fn validate_artifact_name(name: &str) -> Result<(), ReadinessError> {
    if name.trim().is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(ReadinessError::InvalidRequest(format!(
            "extra artifact name must be a plain file name: {name:?}"
        )));
    }
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, payload: &T) -> Result<(), ReadinessError> {
    let rendered = serde_json::to_string_pretty(payload).map_err(|err| {
        ReadinessError::ArtifactWrite {
            path: path.display().to_string(),
            detail: err.to_string(),
        }
    })?;
    write_text(path, &format!("{rendered}\n"))
}

fn write_text(path: &Path, content: &str) -> Result<(), ReadinessError> {
    fs::write(path, content).map_err(|err| write_error(path, err))
}

fn write_error(path: &Path, err: std::io::Error) -> ReadinessError {
    ReadinessError::ArtifactWrite {
        path: path.display().to_string(),
        detail: err.to_string(),
    }
}
