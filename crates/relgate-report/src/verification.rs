//! Committed verification outcome evaluation.

use relgate_kernel::ReportedOutcome;
use std::collections::BTreeSet;

/// Failing IDs plus the parallel machine-readable reason codes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerificationEvaluation {
    pub failing_ids: Vec<String>,
    pub issues: Vec<String>,
}

/// Reconcile committed verification IDs against reported outcomes.
///
/// Duplication is itself a failure: when more than one outcome exists for
/// a committed ID, no record is trusted and no winner is ever picked.
/// Non-committed IDs in the outcome list are ignored here; they only
/// matter under the optional scope.
pub fn evaluate_committed_outcomes(
    committed: &BTreeSet<String>,
    outcomes: &[ReportedOutcome],
) -> VerificationEvaluation {
    let mut failing = BTreeSet::new();
    let mut issues = BTreeSet::new();

    for id in committed {
        let matches: Vec<&ReportedOutcome> = outcomes
            .iter()
            .filter(|outcome| outcome.verification_id == *id)
            .collect();
        match matches.as_slice() {
            [] => {
                failing.insert(id.clone());
                issues.insert(format!("missing_outcome:{id}"));
            }
            [only] => {
                if !only.is_deterministic() {
                    failing.insert(id.clone());
                    issues.insert(format!("non_deterministic_outcome:{id}"));
                }
                if only.status != "pass" {
                    failing.insert(id.clone());
                    issues.insert(format!("non_pass_outcome:{id}:{}", only.status));
                }
            }
            _ => {
                failing.insert(id.clone());
                issues.insert(format!("duplicated_outcome:{id}"));
            }
        }
    }

    VerificationEvaluation {
        failing_ids: failing.into_iter().collect(),
        issues: issues.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(id: &str, status: &str) -> ReportedOutcome {
        ReportedOutcome {
            verification_id: id.to_string(),
            status: status.to_string(),
            deterministic: None,
        }
    }

    fn committed(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn all_passing_outcomes_are_clean() {
        let evaluation = evaluate_committed_outcomes(
            &committed(&["VR-A", "VR-B"]),
            &[outcome("VR-A", "pass"), outcome("VR-B", "pass")],
        );
        assert!(evaluation.failing_ids.is_empty());
        assert!(evaluation.issues.is_empty());
    }

    #[test]
    fn duplicate_and_missing_outcomes_both_fail() {
        // release RC-1: VR-A duplicated, VR-B missing
        let evaluation = evaluate_committed_outcomes(
            &committed(&["VR-A", "VR-B"]),
            &[outcome("VR-A", "pass"), outcome("VR-A", "pass")],
        );
        assert_eq!(
            evaluation.failing_ids,
            vec!["VR-A".to_string(), "VR-B".to_string()]
        );
        assert_eq!(
            evaluation.issues,
            vec![
                "duplicated_outcome:VR-A".to_string(),
                "missing_outcome:VR-B".to_string(),
            ]
        );
    }

    #[test]
    fn non_deterministic_single_outcome_fails() {
        let mut flaky = outcome("VR-A", "pass");
        flaky.deterministic = Some(false);
        let evaluation = evaluate_committed_outcomes(&committed(&["VR-A"]), &[flaky]);
        assert_eq!(evaluation.failing_ids, vec!["VR-A".to_string()]);
        assert_eq!(
            evaluation.issues,
            vec!["non_deterministic_outcome:VR-A".to_string()]
        );
    }

    #[test]
    fn non_pass_status_is_reported_with_the_status() {
        let evaluation =
            evaluate_committed_outcomes(&committed(&["VR-A"]), &[outcome("VR-A", "fail")]);
        assert_eq!(evaluation.issues, vec!["non_pass_outcome:VR-A:fail".to_string()]);
    }

    #[test]
    fn uncommitted_outcomes_are_ignored() {
        let evaluation = evaluate_committed_outcomes(
            &committed(&["VR-A"]),
            &[outcome("VR-A", "pass"), outcome("VR-OPT", "fail")],
        );
        assert!(evaluation.failing_ids.is_empty());
        assert!(evaluation.issues.is_empty());
    }
}
