//! Evidence bundle reader: walks a release's evidence tree and loads every
//! bundle defensively.
//!
//! One broken bundle never aborts the walk; whatever could not be read or
//! parsed is recorded on that bundle's own record and the walk continues.

use crate::layout::{
    APPROVALS_FILE, ArtifactSchema, DECISION_FILE, MANIFEST_FILE, RAW_DATA_DIR, RESULTS_FILE,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One bundle's raw on-disk state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBundle {
    pub gate_id: String,
    pub bundle_id: String,
    pub dir: PathBuf,
    /// Bundle-relative names of absent required artifacts.
    pub missing_artifacts: Vec<String>,
    /// `<file>: <detail>` entries for files that existed but did not parse.
    pub parse_errors: Vec<String>,
    pub manifest: Option<Value>,
    pub decision: Option<Value>,
    pub approvals: Option<Value>,
    /// Parsed payloads of the schema-required raw-data files.
    pub raw_data: BTreeMap<String, Value>,
}

/// Walk `release_root` and load every bundle.
///
/// Each immediate subdirectory is a gate, each subdirectory of a gate is a
/// bundle; plain files at either level (such as the release-level outcome
/// reports) are skipped. Bundles come back sorted by full path.
pub fn read_evidence_bundles(release_root: &Path, schema: &ArtifactSchema) -> Vec<RawBundle> {
    let mut bundles = Vec::new();
    for gate_dir in sorted_subdirectories(release_root) {
        let Some(gate_id) = dir_name(&gate_dir) else {
            continue;
        };
        for bundle_dir in sorted_subdirectories(&gate_dir) {
            let Some(bundle_id) = dir_name(&bundle_dir) else {
                continue;
            };
            bundles.push(read_bundle(&gate_id, &bundle_id, &bundle_dir, schema));
        }
    }
    bundles.sort_by(|a, b| a.dir.cmp(&b.dir));
    bundles
}

fn read_bundle(
    gate_id: &str,
    bundle_id: &str,
    dir: &Path,
    schema: &ArtifactSchema,
) -> RawBundle {
    let mut bundle = RawBundle {
        gate_id: gate_id.to_string(),
        bundle_id: bundle_id.to_string(),
        dir: dir.to_path_buf(),
        ..RawBundle::default()
    };

    let manifest = load_required_json(dir, MANIFEST_FILE, &mut bundle);
    bundle.manifest = manifest;
    if !dir.join(RESULTS_FILE).is_file() {
        bundle.missing_artifacts.push(RESULTS_FILE.to_string());
    }
    let decision = load_required_json(dir, DECISION_FILE, &mut bundle);
    bundle.decision = decision;
    let approvals = load_required_json(dir, APPROVALS_FILE, &mut bundle);
    bundle.approvals = approvals;

    let raw_dir = dir.join(RAW_DATA_DIR);
    if !raw_dir.is_dir() {
        bundle.missing_artifacts.push(RAW_DATA_DIR.to_string());
        return bundle;
    }
    for name in &schema.required_raw_artifacts {
        let path = raw_dir.join(name);
        let rel = format!("{RAW_DATA_DIR}/{name}");
        if !path.is_file() {
            bundle.missing_artifacts.push(rel);
            continue;
        }
        match load_json_value(&path) {
            Ok(value) => {
                bundle.raw_data.insert(name.clone(), value);
            }
            Err(detail) => bundle.parse_errors.push(format!("{rel}: {detail}")),
        }
    }

    bundle
}

fn load_required_json(dir: &Path, name: &str, bundle: &mut RawBundle) -> Option<Value> {
    let path = dir.join(name);
    if !path.is_file() {
        bundle.missing_artifacts.push(name.to_string());
        return None;
    }
    match load_json_value(&path) {
        Ok(value) => Some(value),
        Err(detail) => {
            bundle.parse_errors.push(format!("{name}: {detail}"));
            None
        }
    }
}

fn load_json_value(path: &Path) -> Result<Value, String> {
    let bytes = fs::read(path).map_err(|err| format!("unreadable: {err}"))?;
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|err| format!("invalid json: {err}"))?;
    if !value.is_object() && !value.is_array() {
        return Err("unexpected json root (expected object or array)".to_string());
    }
    Ok(value)
}

fn sorted_subdirectories(path: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(path) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}
