use crate::support::{EvalOptions, build_request, exit_config_error};
use relgate_report::evaluate_release_readiness;
use serde_json::json;

pub fn run(options: EvalOptions, json_output: bool) {
    let request = build_request(&options);
    let evaluation = evaluate_release_readiness(&request)
        .unwrap_or_else(|err| exit_config_error(err.to_string()));
    let report = &evaluation.report;
    let ready = report.status.is_ready();

    if json_output {
        let payload = json!({
            "schema": 1,
            "checkKind": "release.readiness_check.v1",
            "report": report,
            "verificationIssues": evaluation.verification_issues,
            "consultedDocuments": evaluation
                .consulted_documents
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>(),
        });
        let rendered = serde_json::to_string_pretty(&payload).unwrap_or_else(|err| {
            exit_config_error(format!("failed to render readiness payload: {err}"))
        });
        println!("{rendered}");
    } else if ready {
        println!(
            "[readiness-check] READY (release={}, scope={}, source={})",
            report.release_id,
            report.scope.as_str(),
            report.source.as_str()
        );
    } else {
        println!(
            "[readiness-check] NOT READY (release={}, failing={}, artifacts={}, approvals={}, coverage={})",
            report.release_id,
            report.failing_verification_ids.len(),
            report.missing_artifacts.len(),
            report.approval_issues.len(),
            report.field_test_coverage_issues.len(),
        );
        for issue in report
            .failing_verification_ids
            .iter()
            .chain(&report.missing_artifacts)
            .chain(&report.approval_issues)
            .chain(&report.field_test_coverage_issues)
        {
            println!("  - {issue}");
        }
        for action in &report.follow_up_actions {
            println!("  next: {action}");
        }
    }

    if !ready {
        std::process::exit(1);
    }
}
