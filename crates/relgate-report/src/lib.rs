//! # Relgate Report
//!
//! The readiness evaluation pipeline, leaf to root:
//!
//! ```text
//! relgate-canon ──────▶ committed IDs / gate owners / scenarios
//! relgate-evidence ───▶ validated bundles + artifact issues
//!        │
//! verification  ← committed outcomes vs ground truth
//! approvals     ← owner completeness, boundary match, freshness
//! field_tests   ← committed scenario coverage
//! optional      ← opt-in folding of optional failures
//!        │
//! report        ← one ReleaseReadinessOutput, computed fresh per run
//! publication   ← CI allow/block decision over the report
//! ```
//!
//! Everything degrades to issue strings; only configuration errors return
//! `Err`. All output collections are sorted and de-duplicated, so equal
//! inputs under an equal injected clock produce byte-identical reports.

pub mod approvals;
mod inputs;
pub mod optional;
pub mod publication;
pub mod report;
pub mod verification;

pub use approvals::validate_approvals;
pub use field_tests::validate_field_coverage;
pub use optional::{evaluate_optional_outcomes, evaluate_optional_scenarios};
pub use publication::{PublicationDecision, PublicationStatus, decide_publication};
pub use report::{
    ReadinessEvaluation, ReadinessRequest, ReadinessStatus, ReleaseReadinessOutput,
    evaluate_release_readiness, evaluate_with_provider,
};
pub use verification::{VerificationEvaluation, evaluate_committed_outcomes};
