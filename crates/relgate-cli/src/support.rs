//! Shared helpers for the relgate subcommands.

use chrono::{DateTime, Utc};
use relgate_evidence::ArtifactSchema;
use relgate_kernel::{ReadinessScope, ReadinessSource};
use relgate_report::ReadinessRequest;
use std::path::PathBuf;

/// Flag set shared by the evaluation subcommands.
pub struct EvalOptions {
    pub release: String,
    pub scope: String,
    pub source: Option<String>,
    pub evidence_root: String,
    pub outcomes: Option<String>,
    pub coverage: Option<String>,
    pub specs_root: String,
    pub now: Option<String>,
}

/// Configuration errors end the process before any evaluation output.
pub fn exit_config_error(message: impl AsRef<str>) -> ! {
    eprintln!("error: {}", message.as_ref());
    std::process::exit(2);
}

/// One `now` capture per invocation; `--now` pins it for reproducible runs.
pub fn resolve_now(raw: Option<&str>) -> DateTime<Utc> {
    match raw {
        None => Utc::now(),
        Some(raw) => match DateTime::parse_from_rfc3339(raw.trim()) {
            Ok(ts) => ts.with_timezone(&Utc),
            Err(err) => exit_config_error(format!("invalid --now timestamp: {err}")),
        },
    }
}

pub fn build_request(options: &EvalOptions) -> ReadinessRequest {
    let scope = ReadinessScope::parse(&options.scope)
        .unwrap_or_else(|err| exit_config_error(err.to_string()));
    let source = options.source.as_deref().map(|raw| {
        ReadinessSource::parse(raw).unwrap_or_else(|err| exit_config_error(err.to_string()))
    });
    ReadinessRequest {
        release_id: options.release.clone(),
        scope,
        source,
        ci_environment: std::env::var_os("CI").is_some(),
        evidence_root: PathBuf::from(&options.evidence_root),
        outcomes_path: options.outcomes.as_ref().map(PathBuf::from),
        coverage_path: options.coverage.as_ref().map(PathBuf::from),
        specs_root: PathBuf::from(&options.specs_root),
        bundle_schema: ArtifactSchema::default(),
        now: resolve_now(options.now.as_deref()),
    }
}
