//! Gate decision evaluation at verification-run time.
//!
//! A pure function over typed inputs: no filesystem, no clock. The outcome
//! feeds the evidence bundle writer, and later surfaces verbatim inside
//! `decision.json`.

use crate::optional_module::OptionalModuleRegistry;
use crate::outcome::VerificationRuleResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fixed rationale when no failure cause applies.
pub const GATE_SUCCESS_RATIONALE: &str = "all gate conditions satisfied";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateDecision {
    Retain,
    Cut,
}

impl GateDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Retain => "retain",
            Self::Cut => "cut",
        }
    }
}

/// Everything one gate decision depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateDecisionInput {
    pub gate_id: String,
    #[serde(default)]
    pub required_owners: Vec<String>,
    #[serde(default)]
    pub approvals: Vec<String>,
    #[serde(default)]
    pub verification_results: Vec<VerificationRuleResult>,
    /// Optional modules whose activation this gate depends on.
    #[serde(default)]
    pub optional_modules: Vec<String>,
}

/// Activation state of one referenced optional module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalModuleOutcome {
    pub module_id: String,
    pub activated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateDecisionOutcome {
    pub gate_id: String,
    pub decision: GateDecision,
    pub rationale: String,
    pub missing_approvals: Vec<String>,
    pub failing_verification_ids: Vec<String>,
    pub optional_module_outcomes: Vec<OptionalModuleOutcome>,
}

/// Decide retain/cut for one gate.
///
/// `retain` requires every required owner approved, every supplied
/// verification result passing, and every referenced optional module
/// activated. Any other state cuts the gate. The rationale is a
/// semicolon-joined sorted cause list, or [`GATE_SUCCESS_RATIONALE`] when
/// nothing failed.
pub fn evaluate_gate_decision(
    input: &GateDecisionInput,
    modules: &OptionalModuleRegistry,
) -> GateDecisionOutcome {
    let approved: BTreeSet<&str> = input.approvals.iter().map(String::as_str).collect();
    let missing_approvals: Vec<String> = input
        .required_owners
        .iter()
        .filter(|owner| !approved.contains(owner.as_str()))
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    let failing_verification_ids: Vec<String> = input
        .verification_results
        .iter()
        .filter(|result| !result.status.is_pass())
        .map(|result| result.verification_id.clone())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    let mut referenced = BTreeSet::new();
    let mut optional_module_outcomes = Vec::new();
    let mut causes = BTreeSet::new();

    for owner in &missing_approvals {
        causes.insert(format!("missing_approval={owner}"));
    }
    for id in &failing_verification_ids {
        causes.insert(format!("failing_verification={id}"));
    }
    for module_id in &input.optional_modules {
        if !referenced.insert(module_id.clone()) {
            continue;
        }
        let activation = modules.activation(module_id);
        if let Some(reason) = activation.reason {
            causes.insert(format!("optional_module_fail_closed={module_id}:{reason}"));
        }
        optional_module_outcomes.push(OptionalModuleOutcome {
            module_id: module_id.clone(),
            activated: activation.activated,
            reason: activation.reason.map(str::to_string),
        });
    }

    let decision = if causes.is_empty() {
        GateDecision::Retain
    } else {
        GateDecision::Cut
    };
    let rationale = if causes.is_empty() {
        GATE_SUCCESS_RATIONALE.to_string()
    } else {
        causes.into_iter().collect::<Vec<_>>().join("; ")
    };

    GateDecisionOutcome {
        gate_id: input.gate_id.clone(),
        decision,
        rationale,
        missing_approvals,
        failing_verification_ids,
        optional_module_outcomes,
    }
}
