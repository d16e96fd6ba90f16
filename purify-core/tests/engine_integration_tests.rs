// purify-core/tests/engine_integration_tests.rs
use std::collections::{BTreeMap, HashMap};

use purify_core::catalog::{
    STRIP_HTML, TO_ALPHA, TO_EMAIL, TO_LOWER, TO_NUMERIC, TO_SHA256, TO_TITLE_CASE, TO_UPPER, TRIM_SPACE,
};
use purify_core::{
    field, key, nested, rules, sanitize, sanitize_json, sanitize_map, sanitize_struct, when, PurifyError, Record,
    Sanitizable, Value,
};
use serde_json::json;
use test_log::test;

#[derive(Debug, Default)]
struct Profile {
    bio: String,
    phone: String,
}

impl Record for Profile {}

impl Sanitizable for Profile {
    fn sanitize(&mut self) -> Result<(), PurifyError> {
        sanitize_struct(
            self,
            &[
                field(|p: &mut Profile| &mut p.bio, rules![STRIP_HTML, TRIM_SPACE]),
                field(|p: &mut Profile| &mut p.phone, rules![TO_NUMERIC]),
            ],
        )
    }
}

#[derive(Debug, Default)]
struct Account {
    name: String,
    email: String,
    username: Vec<u8>,
    profile: Option<Box<Profile>>,
}

impl Record for Account {
    fn nested_mut(&mut self) -> Vec<&mut dyn Sanitizable> {
        nested(&mut self.profile).into_iter().collect()
    }
}

#[test]
fn test_struct_end_to_end_with_conditional_and_nested_record() -> anyhow::Result<()> {
    let anonymize = true;
    let mut account = Account {
        name: " john doe123 ".into(),
        email: " John@EXAMPLE.com ".into(),
        username: b"  JDoe ".to_vec(),
        profile: Some(Box::new(Profile {
            bio: " <p>Hello &amp; welcome</p> ".into(),
            phone: "+1 (555) 010-2030".into(),
        })),
    };

    sanitize_struct(
        &mut account,
        &[
            field(|a: &mut Account| &mut a.name, rules![TRIM_SPACE, TO_ALPHA, TO_TITLE_CASE]),
            field(
                |a: &mut Account| &mut a.email,
                rules![TRIM_SPACE, TO_EMAIL, when(anonymize, rules![TO_SHA256]).otherwise(rules![TO_UPPER])],
            ),
            field(|a: &mut Account| &mut a.username, rules![TRIM_SPACE, TO_LOWER]),
        ],
    )?;

    assert_eq!(account.name, "John Doe");
    assert_eq!(account.email, "20740450eae791b7928c1869d3a0c964e8685544eb0d70c386d6ba825270b12e");
    assert_eq!(account.username, b"jdoe".to_vec());
    let profile = account.profile.as_ref().expect("profile is populated");
    assert_eq!(profile.bio, "Hello & welcome");
    assert_eq!(profile.phone, "15550102030");
    Ok(())
}

#[test]
fn test_map_end_to_end() -> anyhow::Result<()> {
    let mut form: HashMap<String, String> = HashMap::new();
    form.insert("name".into(), " john doe123 ".into());
    form.insert("email".into(), " John@EXAMPLE.com ".into());
    form.insert("country".into(), " us ".into());

    sanitize_map(
        &mut form,
        &[
            key("name", rules![TRIM_SPACE, TO_ALPHA, TO_TITLE_CASE]),
            key("email", rules![TRIM_SPACE, TO_EMAIL]),
            key("missing", rules![TO_UPPER]),
        ],
    )?;

    assert_eq!(form["name"], "John Doe");
    assert_eq!(form["email"], "John@example.com");
    assert_eq!(form["country"], " us ");
    assert!(!form.contains_key("missing"));
    Ok(())
}

#[test]
fn test_value_map_with_mixed_entries() {
    let mut row: BTreeMap<&str, Value> = BTreeMap::new();
    row.insert("email", Value::from("John@example.com"));
    row.insert("age", Value::Int(42));

    let err = sanitize_map(
        &mut row,
        &[key("email", rules![TO_SHA256]), key("age", rules![TRIM_SPACE])],
    )
    .unwrap_err();

    assert!(matches!(err, PurifyError::TypeMismatch { found: "integer" }));
    assert_eq!(
        row["email"],
        Value::from("20740450eae791b7928c1869d3a0c964e8685544eb0d70c386d6ba825270b12e")
    );
    assert_eq!(row["age"], Value::Int(42));
}

#[test]
fn test_json_document_sanitization() -> anyhow::Result<()> {
    let mut doc = json!({"email": " A@B.COM ", "tags": ["x"], "note": null});
    sanitize_json(&mut doc, &[key("email", rules![TRIM_SPACE, TO_EMAIL]), key("note", rules![TO_UPPER])])?;
    assert_eq!(doc, json!({"email": "A@b.com", "tags": ["x"], "note": null}));

    let err = sanitize_json(&mut doc, &[key("tags", rules![TO_UPPER])]).unwrap_err();
    assert!(matches!(err, PurifyError::NestedValue { .. }));
    Ok(())
}

#[test]
fn test_pipeline_order_matters() -> anyhow::Result<()> {
    let input = Value::from("  john doe  ");
    let trimmed_then_hashed = sanitize(input.clone(), &rules![TRIM_SPACE, TO_SHA256])?;
    let hashed_then_trimmed = sanitize(input, &rules![TO_SHA256, TRIM_SPACE])?;
    assert_ne!(trimmed_then_hashed, hashed_then_trimmed);
    Ok(())
}
