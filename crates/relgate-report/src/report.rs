//! The readiness report builder / orchestrator.
//!
//! Owns the lifecycle of a single readiness-evaluation request: resolve
//! canonical sources, load and validate evidence, run every evaluator,
//! and merge the results into one deterministic report. No shared mutable
//! state crosses requests.

use crate::approvals::validate_approvals;
use crate::field_tests::validate_field_coverage;
use crate::inputs::{load_coverage, load_outcomes};
use crate::optional::{evaluate_optional_outcomes, evaluate_optional_scenarios};
use crate::verification::evaluate_committed_outcomes;
use chrono::{DateTime, Utc};
use relgate_canon::{CanonicalSourceProvider, MarkdownSpecProvider};
use relgate_evidence::{
    ArtifactSchema, COVERAGE_FILE, OUTCOMES_FILE, read_evidence_bundles, release_dir,
    validate_bundles,
};
use relgate_kernel::{ReadinessError, ReadinessScope, ReadinessSource};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessStatus {
    Ready,
    NotReady,
}

impl ReadinessStatus {
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// The final readiness verdict for one release candidate.
///
/// Computed fresh on every invocation and never persisted by this
/// subsystem; callers may persist it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseReadinessOutput {
    pub status: ReadinessStatus,
    pub release_id: String,
    pub source: ReadinessSource,
    pub scope: ReadinessScope,
    pub failing_verification_ids: Vec<String>,
    pub missing_artifacts: Vec<String>,
    pub approval_issues: Vec<String>,
    pub field_test_coverage_issues: Vec<String>,
    pub follow_up_actions: Vec<String>,
}

/// One readiness-evaluation request.
#[derive(Debug, Clone)]
pub struct ReadinessRequest {
    pub release_id: String,
    pub scope: ReadinessScope,
    /// Explicit source; when absent it derives from `ci_environment`.
    pub source: Option<ReadinessSource>,
    /// Whether a CI environment indicator was present.
    pub ci_environment: bool,
    pub evidence_root: PathBuf,
    /// Override for `<release>/verification-outcomes.json`.
    pub outcomes_path: Option<PathBuf>,
    /// Override for `<release>/field-test-coverage.json`.
    pub coverage_path: Option<PathBuf>,
    pub specs_root: PathBuf,
    pub bundle_schema: ArtifactSchema,
    /// The single injected clock for the whole run.
    pub now: DateTime<Utc>,
}

/// The report plus run context callers need for auditing.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadinessEvaluation {
    pub report: ReleaseReadinessOutput,
    /// Machine-readable reason codes parallel to `failingVerificationIds`.
    pub verification_issues: Vec<String>,
    /// Specification documents actually consulted.
    pub consulted_documents: Vec<PathBuf>,
}

/// Evaluate readiness using the markdown specification documents under
/// `specs_root`.
pub fn evaluate_release_readiness(
    request: &ReadinessRequest,
) -> Result<ReadinessEvaluation, ReadinessError> {
    let provider = MarkdownSpecProvider::new(&request.specs_root)?;
    evaluate_with_provider(&provider, request)
}

/// Evaluate readiness against any canonical source provider.
pub fn evaluate_with_provider(
    provider: &dyn CanonicalSourceProvider,
    request: &ReadinessRequest,
) -> Result<ReadinessEvaluation, ReadinessError> {
    if request.release_id.trim().is_empty() {
        return Err(ReadinessError::InvalidRequest(
            "releaseId must be a non-empty string".to_string(),
        ));
    }

    let resolution = provider.resolve();
    let release_root = release_dir(&request.evidence_root, &request.release_id);
    let outcomes_path = request
        .outcomes_path
        .clone()
        .unwrap_or_else(|| release_root.join(OUTCOMES_FILE));
    let coverage_path = request
        .coverage_path
        .clone()
        .unwrap_or_else(|| release_root.join(COVERAGE_FILE));

    let mut failing_ids = BTreeSet::new();
    let mut verification_issues = BTreeSet::new();
    let mut missing_artifacts = BTreeSet::new();
    let mut approval_issues = BTreeSet::new();
    let mut coverage_issues = BTreeSet::new();

    let (outcomes_file, issues) = load_outcomes(&outcomes_path);
    missing_artifacts.extend(issues);
    let (coverage_file, issues) = load_coverage(&coverage_path);
    missing_artifacts.extend(issues);

    let bundles = read_evidence_bundles(&release_root, &request.bundle_schema);
    let validation = validate_bundles(&bundles, &request.release_id);
    missing_artifacts.extend(validation.issues.iter().cloned());

    let committed_eval = evaluate_committed_outcomes(
        &resolution.sources.committed_verification_ids,
        &outcomes_file.outcomes,
    );
    failing_ids.extend(committed_eval.failing_ids);
    verification_issues.extend(committed_eval.issues);

    approval_issues.extend(validate_approvals(
        &validation.valid_bundles,
        &resolution.sources.gate_owners_by_gate_id,
        request.now,
    ));
    // canonical gaps must never be silently treated as "nothing to check"
    for gap in &resolution.sources.unresolved_sources {
        approval_issues.insert(format!("unresolved_canonical_source:{gap}"));
    }

    coverage_issues.extend(validate_field_coverage(
        &resolution.sources.committed_field_test_scenario_ids,
        &coverage_file.scenarios,
    ));

    if request.scope.includes_optional() {
        let optional_eval = evaluate_optional_outcomes(&outcomes_file.optional_outcomes);
        failing_ids.extend(optional_eval.failing_ids);
        verification_issues.extend(optional_eval.issues);
        coverage_issues.extend(evaluate_optional_scenarios(&coverage_file.optional_scenarios));
    }

    let failing_verification_ids: Vec<String> = failing_ids.into_iter().collect();
    let missing_artifacts: Vec<String> = missing_artifacts.into_iter().collect();
    let approval_issues: Vec<String> = approval_issues.into_iter().collect();
    let field_test_coverage_issues: Vec<String> = coverage_issues.into_iter().collect();

    let status = if failing_verification_ids.is_empty()
        && missing_artifacts.is_empty()
        && approval_issues.is_empty()
        && field_test_coverage_issues.is_empty()
    {
        ReadinessStatus::Ready
    } else {
        ReadinessStatus::NotReady
    };

    let follow_up_actions = follow_up_actions(
        &failing_verification_ids,
        &missing_artifacts,
        &approval_issues,
        &field_test_coverage_issues,
    );

    let report = ReleaseReadinessOutput {
        status,
        release_id: request.release_id.clone(),
        source: request
            .source
            .unwrap_or_else(|| ReadinessSource::from_ci_indicator(request.ci_environment)),
        scope: request.scope,
        failing_verification_ids,
        missing_artifacts,
        approval_issues,
        field_test_coverage_issues,
        follow_up_actions,
    };

    Ok(ReadinessEvaluation {
        report,
        verification_issues: verification_issues.into_iter().collect(),
        consulted_documents: resolution.consulted,
    })
}

fn follow_up_actions(
    failing: &[String],
    missing: &[String],
    approvals: &[String],
    coverage: &[String],
) -> Vec<String> {
    let mut actions = Vec::new();
    if !failing.is_empty() {
        actions.push(
            "Re-run the failing committed verification rules and record fresh outcomes."
                .to_string(),
        );
    }
    if !missing.is_empty() {
        actions.push("Regenerate incomplete or inconsistent evidence bundles.".to_string());
    }
    if !approvals.is_empty() {
        actions.push("Collect fresh approvals from every canonical gate owner.".to_string());
    }
    if !coverage.is_empty() {
        actions
            .push("Close the committed field-test coverage gaps before publication.".to_string());
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use relgate_canon::{CanonicalResolution, CanonicalSourceSet};
    use std::collections::BTreeMap;

    struct StubProvider {
        resolution: CanonicalResolution,
    }

    impl CanonicalSourceProvider for StubProvider {
        fn resolve(&self) -> CanonicalResolution {
            self.resolution.clone()
        }
    }

    fn stub_provider(unresolved: &[&str]) -> StubProvider {
        let mut sources = CanonicalSourceSet {
            committed_verification_ids: ["VR-A".to_string()].into(),
            gate_owners_by_gate_id: BTreeMap::new(),
            committed_field_test_scenario_ids: BTreeSet::new(),
            unresolved_sources: unresolved.iter().map(|s| s.to_string()).collect(),
        };
        sources.committed_field_test_scenario_ids.insert("FT-1".to_string());
        StubProvider {
            resolution: CanonicalResolution {
                sources,
                consulted: vec![PathBuf::from("/specs/product-spec.md")],
            },
        }
    }

    fn request(dir: &std::path::Path) -> ReadinessRequest {
        ReadinessRequest {
            release_id: "RC-1".to_string(),
            scope: ReadinessScope::Committed,
            source: Some(ReadinessSource::CiAuthoritative),
            ci_environment: true,
            evidence_root: dir.to_path_buf(),
            outcomes_path: None,
            coverage_path: None,
            specs_root: dir.to_path_buf(),
            bundle_schema: ArtifactSchema::usability(),
            now: Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_release_id_fails_fast() {
        let provider = stub_provider(&[]);
        let dir = std::env::temp_dir();
        let mut req = request(&dir);
        req.release_id = "  ".to_string();
        let err = evaluate_with_provider(&provider, &req).unwrap_err();
        assert!(matches!(err, ReadinessError::InvalidRequest(_)));
    }

    #[test]
    fn unresolved_sources_surface_in_approval_issues() {
        let provider = stub_provider(&["missing_source:product-spec.md"]);
        let dir = std::env::temp_dir();
        let evaluation = evaluate_with_provider(&provider, &request(&dir)).unwrap();
        assert!(
            evaluation
                .report
                .approval_issues
                .contains(&"unresolved_canonical_source:missing_source:product-spec.md".to_string())
        );
        assert_eq!(evaluation.report.status, ReadinessStatus::NotReady);
    }

    #[test]
    fn missing_evidence_degrades_to_not_ready_with_codes() {
        let provider = stub_provider(&[]);
        let dir = std::env::temp_dir().join("relgate-report-empty-root");
        let evaluation = evaluate_with_provider(&provider, &request(&dir)).unwrap();
        let report = &evaluation.report;

        assert_eq!(report.status, ReadinessStatus::NotReady);
        assert_eq!(report.failing_verification_ids, vec!["VR-A".to_string()]);
        assert_eq!(
            evaluation.verification_issues,
            vec!["missing_outcome:VR-A".to_string()]
        );
        assert_eq!(
            report.field_test_coverage_issues,
            vec!["missing:FT-1".to_string()]
        );
        assert_eq!(report.missing_artifacts.len(), 2);
        assert!(report.missing_artifacts[0].starts_with("missing_input:"));
        // failing + artifacts + coverage categories are non-empty
        assert_eq!(report.follow_up_actions.len(), 3);
    }

    #[test]
    fn source_defaults_follow_the_ci_indicator() {
        let provider = stub_provider(&[]);
        let dir = std::env::temp_dir();
        let mut req = request(&dir);
        req.source = None;
        req.ci_environment = false;
        let evaluation = evaluate_with_provider(&provider, &req).unwrap();
        assert_eq!(evaluation.report.source, ReadinessSource::LocalPreview);
    }
}
