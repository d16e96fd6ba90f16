//! errors.rs - Custom error types for the purify-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//! Type mismatches, target-shape contract violations and rule-specific
//! failures are kept apart so callers can match on them.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `purify-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PurifyError {
    /// A leaf rule received a value that is neither text nor a byte sequence.
    #[error("must be either a string or a byte sequence, got {found}")]
    TypeMismatch { found: &'static str },

    /// A slot cannot hold the value the pipeline produced.
    #[error("expected {expected}, got {found}")]
    SlotMismatch { expected: &'static str, found: &'static str },

    /// A declared key holds a nested array or object instead of a scalar.
    #[error("nested {kind} values cannot be sanitized; only flat scalar entries are supported")]
    NestedValue { kind: &'static str },

    /// The target of a record sanitization is not record-shaped.
    #[error("only a record (object) can be sanitized, got {found}")]
    NotARecord { found: &'static str },

    /// The target of a mapping sanitization is not a mapping.
    #[error("only a map can be sanitized with sanitize_map, got {found}")]
    NotAMapping { found: &'static str },

    /// Field declaration `index` resolved to a slot that refused the sanitized value.
    #[error("field {index} is not settable: {reason}")]
    FieldNotSettable { index: usize, reason: String },

    /// The entry under `key` refused the sanitized value.
    #[error("key '{key}' is not settable: {reason}")]
    KeyNotSettable { key: String, reason: String },

    /// A rule-specific failure surfaced verbatim from a custom rule.
    #[error("rule '{rule}' failed: {message}")]
    Rule { rule: String, message: String },

    #[error("Unknown sanitization rule '{0}'")]
    UnknownRule(String),

    #[error("Profile validation failed:\n{0}")]
    InvalidProfile(String),

    #[error("Failed to parse profile YAML: {0}")]
    Yaml(String),

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl PurifyError {
    /// Convenience constructor for errors raised by custom rules.
    pub fn rule(rule: impl Into<String>, message: impl Into<String>) -> Self {
        PurifyError::Rule {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_message_names_the_expected_types() {
        let err = PurifyError::TypeMismatch { found: "integer" };
        assert!(err.to_string().contains("must be either a string or a byte sequence"));
        assert!(err.to_string().ends_with("integer"));
    }

    #[test]
    fn field_not_settable_is_positional() {
        let err = PurifyError::FieldNotSettable { index: 2, reason: "expected text".into() };
        assert_eq!(err.to_string(), "field 2 is not settable: expected text");
    }
}
