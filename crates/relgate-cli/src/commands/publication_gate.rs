use crate::support::{EvalOptions, build_request, exit_config_error};
use relgate_report::{decide_publication, evaluate_release_readiness};
use serde_json::json;

pub fn run(options: EvalOptions, json_output: bool) {
    let request = build_request(&options);
    let evaluation = evaluate_release_readiness(&request)
        .unwrap_or_else(|err| exit_config_error(err.to_string()));
    let decision = decide_publication(&evaluation.report);

    if json_output {
        let payload = json!({
            "schema": 1,
            "checkKind": "release.publication_gate.v1",
            "decision": decision,
            "report": evaluation.report,
        });
        let rendered = serde_json::to_string_pretty(&payload).unwrap_or_else(|err| {
            exit_config_error(format!("failed to render publication payload: {err}"))
        });
        println!("{rendered}");
    } else if decision.allows() {
        println!(
            "[publication-gate] ALLOW (release={}, source={})",
            evaluation.report.release_id,
            evaluation.report.source.as_str()
        );
    } else {
        println!(
            "[publication-gate] BLOCK (release={}, reasons={})",
            evaluation.report.release_id,
            decision.reason_codes.len()
        );
        for reason in &decision.reason_codes {
            println!("  - {reason}");
        }
    }

    if !decision.allows() {
        std::process::exit(1);
    }
}
