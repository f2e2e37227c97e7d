// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy for mapping operations.
//!
//! Every failure is raised synchronously to the caller. There is no retry:
//! mapping is a single-pass, in-memory transform without transient failures.

use thiserror::Error;

/// Errors raised by the mapping engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// Mutation disallowed under the active policy, or an invalid type
    /// registration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Missing key with no fallback policy.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Coercion impossible while strict mode is on.
    #[error("type mismatch: cannot map {found} into {expected}")]
    TypeMismatch { expected: String, found: String },

    /// Shape pairing the engine does not understand. Always fatal.
    #[error("unsupported conversion from {from} to {to}")]
    UnsupportedConversion { from: String, to: String },

    /// Deep copy revisited an object already on the current path.
    #[error("object graph cycle detected at {0}")]
    GraphCycle(String),

    /// Deep copy exceeded the configured nesting ceiling.
    #[error("object graph deeper than {limit} levels")]
    DepthExceeded { limit: usize },

    /// Options profile could not be read or parsed.
    #[error("profile error: {0}")]
    Profile(String),
}

impl MapError {
    pub(crate) fn mismatch(expected: impl ToString, found: impl ToString) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub(crate) fn unsupported(from: impl ToString, to: impl ToString) -> Self {
        Self::UnsupportedConversion {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// True for errors that strict-off mapping downgrades to `Undefined`.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = MapError::mismatch("i64", "\"abc\"");
        assert_eq!(err.to_string(), "type mismatch: cannot map \"abc\" into i64");
        assert!(err.is_mismatch());

        let err = MapError::unsupported("bool", "Class<Person>");
        assert!(!err.is_mismatch());
        assert!(err.to_string().contains("Class<Person>"));
    }
}
