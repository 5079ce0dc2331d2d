//! Verification rule results and release-level reported records.

use serde::{Deserialize, Serialize};

/// Status of one verification rule run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pass,
    Fail,
}

impl VerificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
        }
    }

    pub fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// One immutable verification rule result, produced once per rule run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRuleResult {
    pub verification_id: String,
    pub status: VerificationStatus,
    /// Relative paths of supporting evidence, in reported order.
    #[serde(default)]
    pub evidence_refs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One reported outcome row from `verification-outcomes.json`.
///
/// `status` stays a plain string: a non-`pass` value is evaluator input,
/// not a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedOutcome {
    pub verification_id: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deterministic: Option<bool>,
}

impl ReportedOutcome {
    /// Determinism defaults to true when the producer omitted the flag.
    pub fn is_deterministic(&self) -> bool {
        self.deterministic.unwrap_or(true)
    }
}

/// One reported coverage row from `field-test-coverage.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioCoverageRecord {
    pub scenario_id: String,
    pub status: String,
}
