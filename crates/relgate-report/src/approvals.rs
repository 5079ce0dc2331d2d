//! Owner approval validation over bundles that survived evidence
//! validation.

use chrono::{DateTime, Duration, Utc};
use relgate_evidence::ValidBundle;
use std::collections::{BTreeMap, BTreeSet};

/// The freshness window: an approval exactly this old still counts.
const APPROVAL_FRESHNESS_HOURS: i64 = 24;

/// Validate owner completeness, canonical-boundary match, and approval
/// freshness for every valid bundle.
pub fn validate_approvals(
    bundles: &[ValidBundle],
    gate_owners: &BTreeMap<String, Vec<String>>,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut issues = BTreeSet::new();

    for bundle in bundles {
        let gate = &bundle.gate_id;

        if bundle.required_owners.is_empty() {
            issues.insert(format!("missing_required_owners:{gate}"));
        } else {
            match gate_owners.get(gate) {
                None => {
                    issues.insert(format!("unresolved_gate_owner_source:{gate}"));
                }
                Some(canonical) => {
                    let required: BTreeSet<&str> =
                        bundle.required_owners.iter().map(String::as_str).collect();
                    let expected: BTreeSet<&str> =
                        canonical.iter().map(String::as_str).collect();
                    if required != expected {
                        issues.insert(format!("owner_boundary_mismatch:{gate}"));
                    } else {
                        let approved: BTreeSet<&str> =
                            bundle.approvals.iter().map(String::as_str).collect();
                        let unapproved: Vec<&str> = required
                            .iter()
                            .filter(|owner| !approved.contains(**owner))
                            .copied()
                            .collect();
                        if !unapproved.is_empty() {
                            issues.insert(format!(
                                "missing_owners:{gate}:{}",
                                unapproved.join(",")
                            ));
                        }
                    }
                }
            }
        }

        match bundle.approved_at_utc.as_deref().map(str::trim) {
            None | Some("") => {
                issues.insert(format!("missing_approval_timestamp:{gate}"));
            }
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Err(_) => {
                    issues.insert(format!("invalid_approval_timestamp:{gate}"));
                }
                Ok(approved_at) => {
                    let age = now.signed_duration_since(approved_at.with_timezone(&Utc));
                    if age > Duration::hours(APPROVAL_FRESHNESS_HOURS) {
                        let hours = age.num_milliseconds() as f64 / 3_600_000.0;
                        issues.insert(format!("stale_approval:{gate}:{hours:.2}h"));
                    }
                }
            },
        }
    }

    issues.into_iter().collect()
}
