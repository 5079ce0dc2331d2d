//! The provider seam between document formats and downstream validators.

use crate::sources::CanonicalSourceSet;
use std::path::PathBuf;

/// Result of one canonical-source resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalResolution {
    pub sources: CanonicalSourceSet,
    /// Documents actually opened and read, in resolution order.
    pub consulted: Vec<PathBuf>,
}

/// A source of committed-ID ground truth.
///
/// Implementations must never fail across document boundaries: gaps are
/// reported through `unresolved_sources`, not errors.
pub trait CanonicalSourceProvider {
    fn resolve(&self) -> CanonicalResolution;
}
