//! # Relgate Evidence
//!
//! The canonical on-disk evidence format and its lifecycle:
//!
//! ```text
//! BundleWriteRequest ──writer──▶ <root>/<release>/<gate>/<bundle>/
//!                                  manifest.json
//!                                  verification-results.md
//!                                  decision.json
//!                                  approvals.json
//!                                  raw-data/<verificationId>.json (+ extras)
//!                                       │
//!                                 reader (defensive, per-bundle isolation)
//!                                       │
//!                                 validator (identity + payload checks)
//! ```
//!
//! The file set is a wire contract: CI and audit tooling depend on the
//! exact field names and the five-file/one-subdirectory shape byte for
//! byte. Downstream readiness validation only ever sees bundles that
//! survived the validator.

pub mod layout;
pub mod reader;
pub mod record;
#[cfg(test)]
pub(crate) mod testutil;
pub mod validator;
pub mod writer;

pub use layout::{
    APPROVALS_FILE, ARTIFACT_VERSION, ArtifactSchema, COVERAGE_FILE, DECISION_FILE, MANIFEST_FILE,
    OUTCOMES_FILE, RAW_DATA_DIR, RESULTS_FILE, bundle_dir, release_dir,
};
pub use reader::{RawBundle, read_evidence_bundles};
pub use record::{ApprovalRecord, BundleManifest, DecisionRecord};
pub use validator::{BundleValidation, ValidBundle, validate_bundles};
pub use writer::{BundleWriteRequest, write_evidence_bundle};
