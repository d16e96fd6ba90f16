// purify-core/tests/profile_tests.rs
use anyhow::Result;
use std::fs;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

use purify_core::{
    headless_sanitize_json, load_profile_by_name, merge_profiles, sanitize_json, RuleSpec, SanitizeProfile,
};
use serde_json::json;

const CONTACT_PROFILE: &str = r#"
name: contact
description: Contact form cleanup
version: "2"
keys:
  - key: name
    rules: [trim_space, to_alpha, to_title_case]
  - key: email
    rules:
      - trim_space
      - to_email
      - when: false
        then: [to_sha256]
"#;

#[test]
fn test_load_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(CONTACT_PROFILE.as_bytes())?;

    let profile = SanitizeProfile::load_from_file(file.path())?;
    assert_eq!(profile.name, "contact");
    assert_eq!(profile.version, "2");
    assert_eq!(profile.description.as_deref(), Some("Contact form cleanup"));
    assert_eq!(profile.keys.len(), 2);
    Ok(())
}

#[test]
fn test_load_from_missing_file_has_context() {
    let err = SanitizeProfile::load_from_file("/nonexistent/purify/profile.yaml").unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read profile file"));
}

#[test]
fn test_invalid_profile_file_reports_all_problems() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(
        br#"
name: ""
version: "1"
keys:
  - key: email
    rules: [to_emial]
"#,
    )?;

    let err = SanitizeProfile::load_from_file(file.path()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("empty `name` field"));
    assert!(message.contains("unknown rule 'to_emial'"));
    Ok(())
}

#[test]
fn test_load_profile_by_name_from_path() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("contact.yaml");
    fs::write(&path, CONTACT_PROFILE)?;

    let profile = load_profile_by_name(path.to_str().expect("utf-8 temp path"))?;
    assert_eq!(profile.name, "contact");
    Ok(())
}

#[test]
fn test_load_profile_by_unknown_name_fails() {
    let err = load_profile_by_name("purify-no-such-profile-7f3a").unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_merge_with_default_profile() -> Result<()> {
    let base = SanitizeProfile::load_default()?;
    let user = SanitizeProfile::from_yaml_str(CONTACT_PROFILE)?;
    let base_len = base.keys.len();

    let merged = merge_profiles(base, Some(user));
    assert_eq!(merged.name, "contact");
    assert_eq!(merged.keys.len(), base_len);
    let email = merged.keys.iter().find(|k| k.key == "email").expect("email key");
    assert_eq!(email.rules.len(), 3);
    assert!(matches!(email.rules[2], RuleSpec::When { when: false, .. }));
    Ok(())
}

#[test]
fn test_compiled_profile_with_false_condition() -> Result<()> {
    let keys = SanitizeProfile::from_yaml_str(CONTACT_PROFILE)?.compile()?;
    let mut record = json!({"name": "  mary-ann o'neil ", "email": "Mary@Example.ORG"});
    sanitize_json(&mut record, &keys)?;
    assert_eq!(record, json!({"name": "Maryann Oneil", "email": "Mary@example.org"}));
    Ok(())
}

#[test]
fn test_headless_with_loaded_profile() -> Result<()> {
    let profile = SanitizeProfile::from_yaml_str(CONTACT_PROFILE)?;
    let out = headless_sanitize_json(&profile, r#"[{"name":" bob "},{"email":"X@Y.Z"}]"#, false)?;
    let parsed: serde_json::Value = serde_json::from_str(&out)?;
    assert_eq!(parsed, json!([{"name": "Bob"}, {"email": "X@y.z"}]));
    Ok(())
}
