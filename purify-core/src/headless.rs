//! `headless.rs`
//! Convenience wrappers for using profiles in headless mode (non-UI).
//! Provides one-shot sanitization of JSON documents: a single object, or an
//! array of objects processed in order.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::debug;

use crate::errors::PurifyError;
use crate::map::{sanitize_json, KeyRules};
use crate::profile::SanitizeProfile;
use crate::report::FieldChange;

/// Fully sanitizes a JSON document with the given profile and re-serializes it.
///
/// # Arguments
///
/// * `profile` - The (possibly merged) profile to apply.
/// * `input` - A JSON object, or an array of objects and nulls.
/// * `pretty` - Whether to pretty-print the output.
pub fn headless_sanitize_json(profile: &SanitizeProfile, input: &str, pretty: bool) -> Result<String> {
    let (output, _) = headless_sanitize_json_with_report(profile, input, pretty)?;
    Ok(output)
}

/// Like [`headless_sanitize_json`], also returning every declared key whose value changed.
pub fn headless_sanitize_json_with_report(
    profile: &SanitizeProfile,
    input: &str,
    pretty: bool,
) -> Result<(String, Vec<FieldChange>)> {
    let keys = profile
        .compile()
        .with_context(|| format!("Failed to compile profile '{}'", profile.name))?;
    let mut document: serde_json::Value = serde_json::from_str(input).context("Input is not valid JSON")?;
    let changes = sanitize_document(&mut document, &keys)?;

    debug!("Sanitization changed {} values.", changes.len());
    let output = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok((output, changes))
}

/// Sanitizes a parsed JSON document in place with compiled key declarations.
///
/// An array is treated as a list of records; anything else is a single record.
/// Returns the declared keys whose values changed.
pub fn sanitize_document(document: &mut serde_json::Value, keys: &[KeyRules<String>]) -> Result<Vec<FieldChange>> {
    let mut changes = Vec::new();
    match document {
        serde_json::Value::Array(records) => {
            debug!("Sanitizing {} records.", records.len());
            for (index, record) in records.iter_mut().enumerate() {
                sanitize_record(record, index, keys, &mut changes)
                    .with_context(|| format!("Failed to sanitize record {}", index))?;
            }
        }
        other => {
            sanitize_record(other, 0, keys, &mut changes).context("Failed to sanitize record")?;
        }
    }
    Ok(changes)
}

fn sanitize_record(
    record: &mut serde_json::Value,
    index: usize,
    keys: &[KeyRules<String>],
    changes: &mut Vec<FieldChange>,
) -> Result<(), PurifyError> {
    let before = record.clone();
    sanitize_json(record, keys)?;

    let (serde_json::Value::Object(old), serde_json::Value::Object(new)) = (&before, &*record) else {
        return Ok(());
    };
    for declared in keys {
        let name = declared.key();
        if let (Some(old_value), Some(new_value)) = (old.get(name), new.get(name)) {
            if old_value != new_value {
                changes.push(FieldChange {
                    record: index,
                    key: name.clone(),
                    before: render(old_value),
                    after: render(new_value),
                });
            }
        }
    }
    Ok(())
}

fn render(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    fn profile() -> SanitizeProfile {
        SanitizeProfile::from_yaml_str(
            r#"
name: test
version: "1"
keys:
  - key: name
    rules: [trim_space, to_title_case]
  - key: email
    rules: [to_email]
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_headless_sanitize_single_object() -> Result<()> {
        let out = headless_sanitize_json(&profile(), r#"{"name":"  john doe ","age":3}"#, false)?;
        let parsed: serde_json::Value = serde_json::from_str(&out)?;
        assert_eq!(parsed, json!({"name": "John Doe", "age": 3}));
        Ok(())
    }

    #[test]
    fn test_headless_sanitize_array_with_report() -> Result<()> {
        let input = r#"[{"name":"ann"}, null, {"email":"A@EX.COM","name":"Bob"}]"#;
        let (out, changes) = headless_sanitize_json_with_report(&profile(), input, false)?;
        let parsed: serde_json::Value = serde_json::from_str(&out)?;
        assert_eq!(parsed, json!([{"name": "Ann"}, null, {"email": "A@ex.com", "name": "Bob"}]));
        assert_eq!(
            changes,
            vec![
                FieldChange { record: 0, key: "name".into(), before: "ann".into(), after: "Ann".into() },
                FieldChange { record: 2, key: "email".into(), before: "A@EX.COM".into(), after: "A@ex.com".into() },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_headless_rejects_non_object_records() {
        let err = headless_sanitize_json(&profile(), r#"[{"name":"a"}, 5]"#, false).unwrap_err();
        assert!(format!("{:#}", err).contains("record 1"));
        assert!(matches!(
            err.downcast_ref::<PurifyError>(),
            Some(PurifyError::NotAMapping { .. })
        ));
    }

    #[test]
    fn test_headless_pretty_output() -> Result<()> {
        let out = headless_sanitize_json(&profile(), r#"{"name":"x"}"#, true)?;
        assert!(out.contains('\n'));
        Ok(())
    }
}
