use crate::support::{exit_config_error, resolve_now};
use relgate_evidence::{BundleWriteRequest, write_evidence_bundle};
use relgate_kernel::{
    GateDecisionInput, OptionalModuleRecord, OptionalModuleRegistry, VerificationRuleResult,
    evaluate_gate_decision,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One verification run's bundle-write request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleWriteInput {
    release_id: String,
    gate_id: String,
    bundle_id: String,
    #[serde(default = "default_scope")]
    scope: String,
    #[serde(default)]
    story_ids: Vec<String>,
    #[serde(default)]
    results: Vec<VerificationRuleResult>,
    #[serde(default)]
    required_owners: Vec<String>,
    #[serde(default)]
    approvals: Vec<String>,
    /// Optional modules the gate decision depends on.
    #[serde(default)]
    optional_module_ids: Vec<String>,
    /// Registry records backing those references.
    #[serde(default)]
    optional_modules: Vec<OptionalModuleRecord>,
    #[serde(default)]
    results_appendix: Option<String>,
    #[serde(default)]
    extra_artifacts: BTreeMap<String, Value>,
}

fn default_scope() -> String {
    "committed".to_string()
}

fn load_input(path: &Path) -> BundleWriteInput {
    let text = fs::read_to_string(path).unwrap_or_else(|err| {
        exit_config_error(format!("failed reading {}: {err}", path.display()))
    });
    serde_json::from_str(&text).unwrap_or_else(|err| {
        exit_config_error(format!(
            "invalid bundle-write request {}: {err}",
            path.display()
        ))
    })
}

pub fn run(input: String, evidence_root: String, now: Option<String>, json_output: bool) {
    let input = load_input(&PathBuf::from(input));
    let now = resolve_now(now.as_deref());

    let registry = OptionalModuleRegistry::from_records(input.optional_modules.clone());
    let gate_input = GateDecisionInput {
        gate_id: input.gate_id.clone(),
        required_owners: input.required_owners.clone(),
        approvals: input.approvals.clone(),
        verification_results: input.results.clone(),
        optional_modules: input.optional_module_ids.clone(),
    };
    let outcome = evaluate_gate_decision(&gate_input, &registry);

    let request = BundleWriteRequest {
        release_id: input.release_id,
        gate_id: input.gate_id,
        bundle_id: input.bundle_id,
        scope: input.scope,
        story_ids: input.story_ids,
        results: input.results,
        required_owners: input.required_owners,
        approvals: input.approvals,
        decision: outcome.decision,
        rationale: outcome.rationale.clone(),
        results_appendix: input.results_appendix,
        extra_artifacts: input.extra_artifacts,
    };
    let bundle_dir = write_evidence_bundle(&PathBuf::from(evidence_root), &request, now)
        .unwrap_or_else(|err| exit_config_error(err.to_string()));

    if json_output {
        let payload = json!({
            "schema": 1,
            "checkKind": "release.bundle_write.v1",
            "bundleDir": bundle_dir.display().to_string(),
            "gateDecision": outcome,
        });
        let rendered = serde_json::to_string_pretty(&payload).unwrap_or_else(|err| {
            exit_config_error(format!("failed to render bundle-write payload: {err}"))
        });
        println!("{rendered}");
    } else {
        println!(
            "[bundle-write] OK (gate={}, decision={}, dir={})",
            outcome.gate_id,
            outcome.decision.as_str(),
            bundle_dir.display()
        );
    }
}
