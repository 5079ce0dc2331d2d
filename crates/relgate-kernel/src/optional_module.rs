//! Fail-closed optional-module activation registry.
//!
//! The registry is an explicit object passed by reference into gate
//! decisions, never process-wide state, so evaluation runs stay isolated.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Activation refusal reasons surfaced inside gate rationales.
pub mod activation_reason {
    pub const NOT_REGISTERED: &str = "not_registered";
    pub const NOT_ENABLED: &str = "not_enabled";
    pub const GATE_NOT_PASSED: &str = "gate_not_passed";
    pub const MISSING_OWNERS: &str = "missing_owners";
    pub const MISSING_APPROVALS: &str = "missing_approvals";
}

/// Declared state of one optional module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalModuleRecord {
    pub module_id: String,
    #[serde(default)]
    pub enabled: bool,
    /// Outcome of the module's own gate, as reported by its pipeline.
    #[serde(default)]
    pub gate_decision: String,
    #[serde(default)]
    pub owners: Vec<String>,
    #[serde(default)]
    pub approvals: Vec<String>,
}

/// Outcome of one activation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleActivation {
    pub activated: bool,
    pub reason: Option<&'static str>,
}

impl ModuleActivation {
    fn refused(reason: &'static str) -> Self {
        Self {
            activated: false,
            reason: Some(reason),
        }
    }
}

/// Registry of optional modules referenced by gate decisions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionalModuleRegistry {
    modules: BTreeMap<String, OptionalModuleRecord>,
}

impl OptionalModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = OptionalModuleRecord>) -> Self {
        let mut registry = Self::new();
        for record in records {
            registry.register(record);
        }
        registry
    }

    /// Register a module, replacing any earlier record with the same id.
    pub fn register(&mut self, record: OptionalModuleRecord) {
        self.modules.insert(record.module_id.clone(), record);
    }

    pub fn get(&self, module_id: &str) -> Option<&OptionalModuleRecord> {
        self.modules.get(module_id)
    }

    /// Fail-closed activation check.
    ///
    /// A module activates only when every condition holds explicitly:
    /// registered, enabled flag set, its own gate decision exactly `pass`,
    /// a non-empty owner list, and every owner approved.
    pub fn activation(&self, module_id: &str) -> ModuleActivation {
        let Some(record) = self.modules.get(module_id) else {
            return ModuleActivation::refused(activation_reason::NOT_REGISTERED);
        };
        if !record.enabled {
            return ModuleActivation::refused(activation_reason::NOT_ENABLED);
        }
        if record.gate_decision != "pass" {
            return ModuleActivation::refused(activation_reason::GATE_NOT_PASSED);
        }
        if record.owners.is_empty() {
            return ModuleActivation::refused(activation_reason::MISSING_OWNERS);
        }
        let approved: BTreeSet<&str> = record.approvals.iter().map(String::as_str).collect();
        if record
            .owners
            .iter()
            .any(|owner| !approved.contains(owner.as_str()))
        {
            return ModuleActivation::refused(activation_reason::MISSING_APPROVALS);
        }
        ModuleActivation {
            activated: true,
            reason: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_record() -> OptionalModuleRecord {
        OptionalModuleRecord {
            module_id: "barcode-scan".to_string(),
            enabled: true,
            gate_decision: "pass".to_string(),
            owners: vec!["alice".to_string(), "bob".to_string()],
            approvals: vec!["bob".to_string(), "alice".to_string()],
        }
    }

    #[test]
    fn fully_satisfied_module_activates() {
        let registry = OptionalModuleRegistry::from_records([clean_record()]);
        let activation = registry.activation("barcode-scan");
        assert!(activation.activated);
        assert_eq!(activation.reason, None);
    }

    #[test]
    fn unregistered_module_is_refused() {
        let registry = OptionalModuleRegistry::new();
        let activation = registry.activation("barcode-scan");
        assert!(!activation.activated);
        assert_eq!(activation.reason, Some(activation_reason::NOT_REGISTERED));
    }

    #[test]
    fn disabled_flag_wins_over_everything_else() {
        let mut record = clean_record();
        record.enabled = false;
        let registry = OptionalModuleRegistry::from_records([record]);
        assert_eq!(
            registry.activation("barcode-scan").reason,
            Some(activation_reason::NOT_ENABLED)
        );
    }

    #[test]
    fn non_pass_gate_decision_refuses_activation() {
        let mut record = clean_record();
        record.gate_decision = "fail".to_string();
        let registry = OptionalModuleRegistry::from_records([record]);
        assert_eq!(
            registry.activation("barcode-scan").reason,
            Some(activation_reason::GATE_NOT_PASSED)
        );
    }

    #[test]
    fn empty_owner_list_refuses_activation() {
        let mut record = clean_record();
        record.owners.clear();
        let registry = OptionalModuleRegistry::from_records([record]);
        assert_eq!(
            registry.activation("barcode-scan").reason,
            Some(activation_reason::MISSING_OWNERS)
        );
    }

    #[test]
    fn unapproved_owner_refuses_activation() {
        let mut record = clean_record();
        record.approvals = vec!["alice".to_string()];
        let registry = OptionalModuleRegistry::from_records([record]);
        assert_eq!(
            registry.activation("barcode-scan").reason,
            Some(activation_reason::MISSING_APPROVALS)
        );
    }
}
