//! Change reporting and PII-aware debug logging for `purify-core`.
//!
//! Sanitized values are frequently personal data (names, e-mail addresses), so
//! anything that reaches the debug log goes through [`loggable`], which redacts
//! the value unless `PURIFY_ALLOW_DEBUG_PII=true` is set in the environment.

use log::debug;
use serde::{Deserialize, Serialize};

use lazy_static::lazy_static;

use crate::value::Value;

lazy_static! {
    /// Initialized once: whether raw values may appear in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("PURIFY_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// One declared key whose value was changed by sanitization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Index of the record in the input (0 for a single object).
    pub record: usize,
    pub key: String,
    pub before: String,
    pub after: String,
}

pub fn pii_debug_allowed() -> bool {
    *PII_DEBUG_ALLOWED
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

/// Renders a value for logs, redacting textual content unless PII logging is allowed.
pub fn loggable(value: &Value) -> String {
    match value {
        Value::Text(_) | Value::Bytes(_) if !pii_debug_allowed() => redact_sensitive(&value.to_string()),
        other => other.to_string(),
    }
}

pub fn log_rule_step_debug(rule_name: &str, before: &Value, after: &Value) {
    debug!(
        target: "purify_core::pipeline",
        "Rule '{}' applied: before='{}', after='{}'",
        rule_name,
        loggable(before),
        loggable(after)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("123456789"), "[REDACTED: 9 chars]".to_string());
    }

    #[test]
    fn test_loggable_keeps_non_text_values() {
        assert_eq!(loggable(&Value::Int(7)), "7");
        assert_eq!(loggable(&Value::Absent), "<absent>");
    }
}
