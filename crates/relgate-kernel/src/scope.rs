//! Requested evaluation scope and report provenance.

use crate::error::ReadinessError;
use serde::{Deserialize, Serialize};

/// Which verification population may block the release.
///
/// Optional work never blocks a committed release unless the caller
/// explicitly opts in with [`ReadinessScope::CommittedPlusOptional`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessScope {
    Committed,
    CommittedPlusOptional,
}

impl ReadinessScope {
    /// Parse a caller-supplied scope string.
    ///
    /// An unknown scope is a configuration error and fails fast, before
    /// any I/O.
    pub fn parse(raw: &str) -> Result<Self, ReadinessError> {
        match raw.trim() {
            "committed" => Ok(Self::Committed),
            "committed_plus_optional" => Ok(Self::CommittedPlusOptional),
            other => Err(ReadinessError::InvalidScope {
                value: other.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Committed => "committed",
            Self::CommittedPlusOptional => "committed_plus_optional",
        }
    }

    pub fn includes_optional(self) -> bool {
        matches!(self, Self::CommittedPlusOptional)
    }
}

/// Where the evaluation ran.
///
/// Publication is only ever allowed from a CI-authoritative run; local
/// previews exist for developers and always block publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessSource {
    CiAuthoritative,
    LocalPreview,
}

impl ReadinessSource {
    pub fn parse(raw: &str) -> Result<Self, ReadinessError> {
        match raw.trim() {
            "ci_authoritative" => Ok(Self::CiAuthoritative),
            "local_preview" => Ok(Self::LocalPreview),
            other => Err(ReadinessError::InvalidSource {
                value: other.to_string(),
            }),
        }
    }

    /// Derive the source from the CI environment indicator when the caller
    /// did not pin one explicitly.
    pub fn from_ci_indicator(ci_environment: bool) -> Self {
        if ci_environment {
            Self::CiAuthoritative
        } else {
            Self::LocalPreview
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CiAuthoritative => "ci_authoritative",
            Self::LocalPreview => "local_preview",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_parses_known_values() {
        assert_eq!(
            ReadinessScope::parse("committed").unwrap(),
            ReadinessScope::Committed
        );
        assert_eq!(
            ReadinessScope::parse(" committed_plus_optional ").unwrap(),
            ReadinessScope::CommittedPlusOptional
        );
    }

    #[test]
    fn scope_rejects_unknown_values() {
        let err = ReadinessScope::parse("committed-plus-optional").unwrap_err();
        assert!(matches!(err, ReadinessError::InvalidScope { .. }));
    }

    #[test]
    fn source_derivation_follows_ci_indicator() {
        assert_eq!(
            ReadinessSource::from_ci_indicator(true),
            ReadinessSource::CiAuthoritative
        );
        assert_eq!(
            ReadinessSource::from_ci_indicator(false),
            ReadinessSource::LocalPreview
        );
    }

    #[test]
    fn serde_round_trip_uses_snake_case() {
        let json = serde_json::to_value(ReadinessScope::CommittedPlusOptional).unwrap();
        assert_eq!(json, serde_json::json!("committed_plus_optional"));
        let json = serde_json::to_value(ReadinessSource::CiAuthoritative).unwrap();
        assert_eq!(json, serde_json::json!("ci_authoritative"));
    }
}
