//! Typed payloads for the canonical bundle artifacts.
//!
//! Field names are the wire contract; they serialize exactly as written
//! here (snake_case, no renames).

use relgate_kernel::GateDecision;
use serde::{Deserialize, Serialize};

/// `manifest.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleManifest {
    pub release_id: String,
    pub gate_id: String,
    pub bundle_id: String,
    pub scope: String,
    pub generated_at_utc: String,
    pub artifact_version: String,
    pub story_ids: Vec<String>,
    pub verification_ids: Vec<String>,
}

/// `decision.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub gate_id: String,
    pub bundle_id: String,
    pub decision: GateDecision,
    pub rationale: String,
    pub decided_at_utc: String,
}

/// `approvals.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRecord {
    pub gate_id: String,
    pub bundle_id: String,
    pub required_owners: Vec<String>,
    pub approvals: Vec<String>,
    pub approved_at_utc: String,
}
