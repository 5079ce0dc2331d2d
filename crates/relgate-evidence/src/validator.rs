//! Evidence bundle validator: presence, parseability, and cross-file
//! identity consistency.
//!
//! Identity checks only run once manifest, decision, and approvals all
//! parsed; the first mismatch short-circuits the bundle so one corrupted
//! copy never produces a cascade of secondary issues.

use crate::reader::RawBundle;
use serde_json::Value;

const DECISION_REQUIRED_FIELDS: [&str; 3] = ["decision", "rationale", "decided_at_utc"];

/// Approval payload of a bundle that survived validation, ready for the
/// approval validator.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBundle {
    pub gate_id: String,
    pub bundle_id: String,
    pub required_owners: Vec<String>,
    pub approvals: Vec<String>,
    pub approved_at_utc: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BundleValidation {
    pub valid_bundles: Vec<ValidBundle>,
    /// Prefixed issue strings in bundle-path order.
    pub issues: Vec<String>,
}

/// Validate every bundle against the candidate release.
pub fn validate_bundles(bundles: &[RawBundle], release_id: &str) -> BundleValidation {
    let mut validation = BundleValidation::default();

    for bundle in bundles {
        let key = format!("{}/{}", bundle.gate_id, bundle.bundle_id);
        let mut clean = true;

        for name in &bundle.missing_artifacts {
            validation.issues.push(format!("missing:{key}/{name}"));
            clean = false;
        }
        for detail in &bundle.parse_errors {
            validation.issues.push(format!("invalid_json:{key}/{detail}"));
            clean = false;
        }

        let (Some(manifest), Some(decision), Some(approvals)) =
            (&bundle.manifest, &bundle.decision, &bundle.approvals)
        else {
            continue;
        };

        if str_field(manifest, "release_id") != Some(release_id) {
            validation
                .issues
                .push(format!("release_id_mismatch:{key}/manifest.json"));
            continue;
        }

        let mut identity_ok = true;
        for (value, file) in [
            (manifest, "manifest.json"),
            (decision, "decision.json"),
            (approvals, "approvals.json"),
        ] {
            if str_field(value, "gate_id") != Some(bundle.gate_id.as_str()) {
                validation
                    .issues
                    .push(format!("gate_id_mismatch:{key}/{file}"));
                identity_ok = false;
                break;
            }
            if str_field(value, "bundle_id") != Some(bundle.bundle_id.as_str()) {
                validation
                    .issues
                    .push(format!("bundle_id_mismatch:{key}/{file}"));
                identity_ok = false;
                break;
            }
        }
        if !identity_ok {
            continue;
        }

        let mut decision_ok = true;
        for field in DECISION_REQUIRED_FIELDS {
            let present = str_field(decision, field)
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false);
            if !present {
                validation
                    .issues
                    .push(format!("invalid_payload:{key}/decision.json:{field}"));
                decision_ok = false;
            }
        }

        if clean && decision_ok {
            validation.valid_bundles.push(ValidBundle {
                gate_id: bundle.gate_id.clone(),
                bundle_id: bundle.bundle_id.clone(),
                required_owners: string_array(approvals, "required_owners"),
                approvals: string_array(approvals, "approvals"),
                approved_at_utc: str_field(approvals, "approved_at_utc").map(str::to_string),
            });
        }
    }

    validation
}

fn str_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(Value::as_str)
}

fn string_array(value: &Value, field: &str) -> Vec<String> {
    value
        .get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
