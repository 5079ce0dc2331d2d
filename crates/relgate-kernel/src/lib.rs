//! # Relgate Kernel
//!
//! Core model for the release readiness pipeline: verification rule
//! results, gate decisions, and fail-closed optional-module activation.
//!
//! This crate is **storage-agnostic**: it never touches the filesystem or
//! the clock. Evidence layout lives in `relgate-evidence`, canonical
//! source resolution in `relgate-canon`, and report assembly in
//! `relgate-report`.
//!
//! ## Architecture
//!
//! ```text
//! VerificationRuleResult   ← one immutable rule run
//!     │
//! GateDecisionInput        ← owners + approvals + results + module refs
//!     │
//! OptionalModuleRegistry   ← explicit, per-run activation state
//!     │
//! GateDecisionOutcome      ← retain/cut with sorted rationale causes
//! ```

pub mod error;
pub mod gate;
pub mod optional_module;
pub mod outcome;
pub mod scope;

pub use error::ReadinessError;
pub use gate::{
    GATE_SUCCESS_RATIONALE, GateDecision, GateDecisionInput, GateDecisionOutcome,
    OptionalModuleOutcome, evaluate_gate_decision,
};
pub use optional_module::{ModuleActivation, OptionalModuleRecord, OptionalModuleRegistry};
pub use outcome::{
    ReportedOutcome, ScenarioCoverageRecord, VerificationRuleResult, VerificationStatus,
};
pub use scope::{ReadinessScope, ReadinessSource};
