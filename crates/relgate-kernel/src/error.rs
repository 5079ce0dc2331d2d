//! Error types for readiness pipeline configuration failures.
//!
//! Only this class of failure surfaces as `Err`: everything the pipeline
//! learns about broken evidence or unreadable documents degrades to issue
//! strings inside the readiness report instead.

/// Errors that abort an evaluation before any further work starts.
#[derive(Debug, thiserror::Error)]
pub enum ReadinessError {
    /// The requested scope string is not a known scope.
    #[error("invalid readiness scope: {value:?}")]
    InvalidScope { value: String },

    /// The requested source string is not a known source.
    #[error("invalid readiness source: {value:?}")]
    InvalidSource { value: String },

    /// The canonical specs root is missing or not a directory.
    #[error("canonical specs root is not a readable directory: {path}")]
    SpecsRootUnreadable { path: String },

    /// A bundle-write request is structurally unusable.
    #[error("invalid bundle-write request: {0}")]
    InvalidRequest(String),

    /// An evidence artifact could not be written at verification-run time.
    #[error("failed writing evidence artifact {path}: {detail}")]
    ArtifactWrite { path: String, detail: String },
}
