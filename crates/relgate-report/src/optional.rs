//! Optional-scope evaluation.
//!
//! Only consulted when the caller requested `committed_plus_optional`.
//! Under plain `committed` scope the orchestrator never calls these
//! functions, so optional work cannot block a committed release.

use crate::verification::VerificationEvaluation;
use relgate_kernel::{ReportedOutcome, ScenarioCoverageRecord};
use std::collections::{BTreeMap, BTreeSet};

/// Fold failing optional verification outcomes into blocking entries.
///
/// Duplication stays a failure here too: two optional records for one ID
/// block rather than electing a winner.
pub fn evaluate_optional_outcomes(outcomes: &[ReportedOutcome]) -> VerificationEvaluation {
    let mut grouped: BTreeMap<&str, Vec<&ReportedOutcome>> = BTreeMap::new();
    for outcome in outcomes {
        grouped
            .entry(outcome.verification_id.as_str())
            .or_default()
            .push(outcome);
    }

    let mut failing = BTreeSet::new();
    let mut issues = BTreeSet::new();
    for (id, group) in grouped {
        match group.as_slice() {
            [only] => {
                if !only.is_deterministic() {
                    failing.insert(id.to_string());
                    issues.insert(format!("optional_non_deterministic_outcome:{id}"));
                }
                if only.status != "pass" {
                    failing.insert(id.to_string());
                    issues.insert(format!("optional_non_pass_outcome:{id}:{}", only.status));
                }
            }
            _ => {
                failing.insert(id.to_string());
                issues.insert(format!("optional_duplicated_outcome:{id}"));
            }
        }
    }

    VerificationEvaluation {
        failing_ids: failing.into_iter().collect(),
        issues: issues.into_iter().collect(),
    }
}

/// Fold failing optional field-test scenarios into blocking entries.
pub fn evaluate_optional_scenarios(records: &[ScenarioCoverageRecord]) -> Vec<String> {
    let mut grouped: BTreeMap<&str, Vec<&ScenarioCoverageRecord>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.scenario_id.as_str())
            .or_default()
            .push(record);
    }

    let mut issues = BTreeSet::new();
    for (id, group) in grouped {
        match group.as_slice() {
            [only] => {
                if only.status != "pass" {
                    issues.insert(format!("optional_scenario_{}:{id}", only.status));
                }
            }
            _ => {
                issues.insert(format!("optional_duplicated_scenario:{id}"));
            }
        }
    }
    issues.into_iter().collect()
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

    #[test]
    fn passing_optional_outcomes_never_block() {
        let evaluation = evaluate_optional_outcomes(&[outcome("VR-OPT-1", "pass")]);
        assert!(evaluation.failing_ids.is_empty());
        assert!(evaluation.issues.is_empty());
    }

    #[test]
    fn failing_and_flaky_optional_outcomes_block() {
        let mut flaky = outcome("VR-OPT-2", "pass");
        flaky.deterministic = Some(false);
        let evaluation =
            evaluate_optional_outcomes(&[outcome("VR-OPT-1", "fail"), flaky]);
        assert_eq!(
            evaluation.failing_ids,
            vec!["VR-OPT-1".to_string(), "VR-OPT-2".to_string()]
        );
        assert_eq!(
            evaluation.issues,
            vec![
                "optional_non_deterministic_outcome:VR-OPT-2".to_string(),
                "optional_non_pass_outcome:VR-OPT-1:fail".to_string(),
            ]
        );
    }

    #[test]
    fn duplicated_optional_outcomes_block_without_a_winner() {
        let evaluation = evaluate_optional_outcomes(&[
            outcome("VR-OPT-1", "pass"),
            outcome("VR-OPT-1", "fail"),
        ]);
        assert_eq!(evaluation.failing_ids, vec!["VR-OPT-1".to_string()]);
        assert_eq!(
            evaluation.issues,
            vec!["optional_duplicated_outcome:VR-OPT-1".to_string()]
        );
    }

    #[test]
    fn optional_scenarios_follow_the_same_rules() {
        let records = vec![
            ScenarioCoverageRecord {
                scenario_id: "FT-OPT-1".to_string(),
                status: "pass".to_string(),
            },
            ScenarioCoverageRecord {
                scenario_id: "FT-OPT-2".to_string(),
                status: "fail".to_string(),
            },
            ScenarioCoverageRecord {
                scenario_id: "FT-OPT-3".to_string(),
                status: "pass".to_string(),
            },
            ScenarioCoverageRecord {
                scenario_id: "FT-OPT-3".to_string(),
                status: "pass".to_string(),
            },
        ];
        assert_eq!(
            evaluate_optional_scenarios(&records),
            vec![
                "optional_duplicated_scenario:FT-OPT-3".to_string(),
                "optional_scenario_fail:FT-OPT-2".to_string(),
            ]
        );
    }
}
