//! Defensive loading of the release-level reported input files.

use relgate_kernel::{ReportedOutcome, ScenarioCoverageRecord};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct OutcomesFile {
    pub outcomes: Vec<ReportedOutcome>,
    pub optional_outcomes: Vec<ReportedOutcome>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct CoverageFile {
    pub scenarios: Vec<ScenarioCoverageRecord>,
    pub optional_scenarios: Vec<ScenarioCoverageRecord>,
}

pub(crate) fn load_outcomes(path: &Path) -> (OutcomesFile, Vec<String>) {
    let mut issues = Vec::new();
    let mut file = OutcomesFile::default();
    if let Some(root) = load_root_object(path, &mut issues) {
        file.outcomes = lenient_records(&root, "outcomes", path, &mut issues);
        file.optional_outcomes = lenient_records(&root, "optionalOutcomes", path, &mut issues);
    }
    (file, issues)
}

pub(crate) fn load_coverage(path: &Path) -> (CoverageFile, Vec<String>) {
    let mut issues = Vec::new();
    let mut file = CoverageFile::default();
    if let Some(root) = load_root_object(path, &mut issues) {
        file.scenarios = lenient_records(&root, "scenarios", path, &mut issues);
        file.optional_scenarios = lenient_records(&root, "optionalScenarios", path, &mut issues);
    }
    (file, issues)
}

fn load_root_object(path: &Path, issues: &mut Vec<String>) -> Option<Value> {
    if !path.is_file() {
        issues.push(format!("missing_input:{}", path.display()));
        return None;
    }
    let Ok(bytes) = fs::read(path) else {
        issues.push(format!("missing_input:{}", path.display()));
        return None;
    };
    let Ok(value) = serde_json::from_slice::<Value>(&bytes) else {
        issues.push(format!("invalid_json_parse:{}", path.display()));
        return None;
    };
    if !value.is_object() {
        issues.push(format!("invalid_json_object:{}", path.display()));
        return None;
    }
    Some(value)
}

/// Read one record array leniently: an absent field is empty, a
/// wrongly-typed field is an issue, and malformed entries are dropped
/// (their IDs then fail closed as missing records downstream).
fn lenient_records<T: DeserializeOwned>(
    root: &Value,
    field: &str,
    path: &Path,
    issues: &mut Vec<String>,
) -> Vec<T> {
    match root.get(field) {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
        Some(_) => {
            issues.push(format!("invalid_json_array:{}:{field}", path.display()));
            Vec::new()
        }
    }
}
