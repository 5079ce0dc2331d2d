//! # Relgate Canon
//!
//! Ground-truth extraction for readiness evaluation: which verification
//! IDs, gate-owner sets, and field-test scenario IDs are *committed* for a
//! release, scraped from the specification documents.
//!
//! Prose scraping is fragile by nature, so it lives behind the
//! [`CanonicalSourceProvider`] seam: a future structured-data source (a
//! small declarative manifest) can replace the markdown implementation
//! without touching any downstream validator.
//!
//! Resolution never fails across document boundaries. A missing or
//! unscannable document leaves its ID sets empty and records an
//! `unresolved_sources` entry — silence is never a pass.

pub mod markdown;
pub mod provider;
pub mod sources;

pub use markdown::MarkdownSpecProvider;
pub use provider::{CanonicalResolution, CanonicalSourceProvider};
pub use sources::{
    CanonicalSourceSet, FIELD_TEST_BACKLOG_DOC, PRODUCT_SPEC_DOC, RELEASE_GATES_DOC,
};
