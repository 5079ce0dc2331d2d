//! CI enforcement over a finished readiness report.

use crate::report::{ReadinessStatus, ReleaseReadinessOutput};
use relgate_kernel::ReadinessSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    AllowPublication,
    BlockPublication,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationDecision {
    pub status: PublicationStatus,
    pub reason_codes: Vec<String>,
}

impl PublicationDecision {
    pub fn allows(&self) -> bool {
        self.status == PublicationStatus::AllowPublication
    }
}

/// Map a readiness report to a publication decision.
///
/// Publication is blocked outright whenever the report did not come from
/// a CI-authoritative run, no matter how clean it looks.
pub fn decide_publication(report: &ReleaseReadinessOutput) -> PublicationDecision {
    let mut reasons = BTreeSet::new();

    if report.source != ReadinessSource::CiAuthoritative {
        reasons.insert("non_authoritative_source".to_string());
    }
    if !report.status.is_ready() {
        reasons.insert("release_not_ready".to_string());
    }
    if !report.failing_verification_ids.is_empty() {
        reasons.insert("failing_verification_rules".to_string());
    }
    if !report.missing_artifacts.is_empty() {
        reasons.insert("incomplete_evidence_artifacts".to_string());
    }
    if !report.approval_issues.is_empty() {
        reasons.insert("approval_policy_violations".to_string());
    }
    if !report.field_test_coverage_issues.is_empty() {
        reasons.insert("field_test_coverage_gaps".to_string());
    }

    let status = if reasons.is_empty() {
        PublicationStatus::AllowPublication
    } else {
        PublicationStatus::BlockPublication
    };
    PublicationDecision {
        status,
        reason_codes: reasons.into_iter().collect(),
    }
}
