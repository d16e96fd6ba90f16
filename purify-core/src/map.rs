//! Batch sanitization of mappings.
//!
//! Keys are declared with [`key`]. [`sanitize_map`] looks each key up, runs its
//! rules and writes the result back under the same key. Keys absent from the
//! map are skipped. Keys are flat: there is no path syntax for nested values.
//!
//! License: MIT OR APACHE 2.0

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};

use log::debug;

use crate::errors::PurifyError;
use crate::pipeline::sanitize;
use crate::rule::Rules;
use crate::slot::{Slot, Target};

/// A key declaration: which entry and which rules.
#[derive(Debug)]
pub struct KeyRules<K> {
    key: K,
    rules: Rules,
}

/// Declares a mapping key and the rules to apply to its value.
pub fn key<K>(key: impl Into<K>, rules: Rules) -> KeyRules<K> {
    KeyRules {
        key: key.into(),
        rules,
    }
}

impl<K> KeyRules<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn rules(&self) -> &[Box<dyn crate::rule::Rule>] {
        &self.rules
    }
}

/// A collection whose entries can be bound by key.
pub trait Mapping {
    type Key;

    /// The slot for `key`, or `None` when the key is absent.
    fn slot_mut(&mut self, key: &Self::Key) -> Option<&mut dyn Slot>;
}

impl<K, V, S> Mapping for HashMap<K, V, S>
where
    K: Eq + Hash,
    V: Slot + 'static,
    S: BuildHasher,
{
    type Key = K;

    fn slot_mut(&mut self, key: &K) -> Option<&mut dyn Slot> {
        self.get_mut(key).map(|v| v as &mut dyn Slot)
    }
}

impl<K, V> Mapping for BTreeMap<K, V>
where
    K: Ord,
    V: Slot + 'static,
{
    type Key = K;

    fn slot_mut(&mut self, key: &K) -> Option<&mut dyn Slot> {
        self.get_mut(key).map(|v| v as &mut dyn Slot)
    }
}

impl Mapping for serde_json::Map<String, serde_json::Value> {
    type Key = String;

    fn slot_mut(&mut self, key: &String) -> Option<&mut dyn Slot> {
        self.get_mut(key).map(|v| v as &mut dyn Slot)
    }
}

/// Sanitizes the declared entries of `map`, in declaration order.
///
/// A `None` map is a successful no-op and missing keys are skipped. The
/// first failing entry aborts the call; entries already updated stay updated.
pub fn sanitize_map<'m, M>(map: impl Target<'m, M>, keys: &[KeyRules<M::Key>]) -> Result<(), PurifyError>
where
    M: Mapping + 'm,
    M::Key: fmt::Display,
{
    let Some(map) = map.into_target() else {
        debug!("sanitize_map called with no map; nothing to do.");
        return Ok(());
    };

    for declaration in keys {
        let Some(slot) = map.slot_mut(&declaration.key) else {
            debug!("Key '{}' not present; skipping.", declaration.key);
            continue;
        };
        let current = slot.get()?;
        let sanitized = sanitize(current, &declaration.rules)?;
        slot.set(sanitized).map_err(|e| PurifyError::KeyNotSettable {
            key: declaration.key.to_string(),
            reason: e.to_string(),
        })?;
        debug!("Key '{}' sanitized with {} rules.", declaration.key, declaration.rules.len());
    }

    Ok(())
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Sanitizes a JSON value that is expected to be an object.
///
/// `null` is a no-op; anything other than an object is not a mapping.
pub fn sanitize_json(value: &mut serde_json::Value, keys: &[KeyRules<String>]) -> Result<(), PurifyError> {
    match value {
        serde_json::Value::Null => Ok(()),
        serde_json::Value::Object(map) => sanitize_map(map, keys),
        other => Err(PurifyError::NotAMapping { found: json_kind(other) }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{TO_ALPHA, TO_EMAIL, TO_SHA256, TO_TITLE_CASE, TRIM_SPACE};
    use crate::rules;
    use crate::value::Value;
    use serde_json::json;
    use test_log::test;

    #[test]
    fn sanitizes_string_map_and_leaves_undeclared_keys() {
        let mut m: HashMap<String, String> = HashMap::from([
            ("name".to_string(), " john doe123 ".to_string()),
            ("email".to_string(), " John@EXAMPLE.com ".to_string()),
            ("country".to_string(), "US".to_string()),
        ]);
        sanitize_map(
            &mut m,
            &[
                key("name", rules![TRIM_SPACE, TO_ALPHA, TO_TITLE_CASE]),
                key("email", rules![TRIM_SPACE, TO_EMAIL]),
            ],
        )
        .unwrap();
        assert_eq!(m["name"], "John Doe");
        assert_eq!(m["email"], "John@example.com");
        assert_eq!(m["country"], "US");
    }

    #[test]
    fn untyped_map_can_hash() {
        let mut m: BTreeMap<&str, Value> = BTreeMap::from([
            ("name", Value::from(" john doe123 ")),
            ("email", Value::from(" John@EXAMPLE.com ")),
        ]);
        sanitize_map(
            &mut m,
            &[
                key("name", rules![TRIM_SPACE, TO_ALPHA, TO_TITLE_CASE]),
                key("email", rules![TRIM_SPACE, TO_EMAIL, TO_SHA256]),
            ],
        )
        .unwrap();
        assert_eq!(m["name"], Value::from("John Doe"));
        assert_eq!(
            m["email"],
            Value::from("20740450eae791b7928c1869d3a0c964e8685544eb0d70c386d6ba825270b12e")
        );
    }

    #[test]
    fn missing_keys_are_skipped() {
        let mut m: HashMap<String, String> = HashMap::from([("name".to_string(), " x ".to_string())]);
        sanitize_map(&mut m, &[key("missing", rules![TO_EMAIL]), key("name", rules![TRIM_SPACE])]).unwrap();
        assert_eq!(m.len(), 1);
        assert_eq!(m["name"], "x");
    }

    #[test]
    fn none_map_is_a_no_op() {
        let keys: [KeyRules<String>; 1] = [key("name", rules![TRIM_SPACE])];
        assert!(sanitize_map(None::<&mut HashMap<String, String>>, &keys).is_ok());
    }

    #[test]
    fn first_error_aborts_and_keeps_earlier_updates() {
        let mut m: BTreeMap<String, Value> = BTreeMap::from([
            ("a".to_string(), Value::from(" a ")),
            ("b".to_string(), Value::Int(1)),
            ("c".to_string(), Value::from(" c ")),
        ]);
        let err = sanitize_map(
            &mut m,
            &[key("a", rules![TRIM_SPACE]), key("b", rules![TRIM_SPACE]), key("c", rules![TRIM_SPACE])],
        )
        .unwrap_err();
        assert!(matches!(err, PurifyError::TypeMismatch { found: "integer" }));
        assert_eq!(m["a"], Value::from("a"));
        assert_eq!(m["c"], Value::from(" c "));
    }

    #[test]
    fn json_objects_null_and_non_objects() {
        let keys = [key("name", rules![TRIM_SPACE]), key("age", rules![])];

        let mut doc = json!({"name": " ada ", "age": 36, "nick": null});
        sanitize_json(&mut doc, &keys).unwrap();
        assert_eq!(doc, json!({"name": "ada", "age": 36, "nick": null}));

        let mut null = json!(null);
        assert!(sanitize_json(&mut null, &keys).is_ok());

        let mut list = json!(["a"]);
        assert!(matches!(
            sanitize_json(&mut list, &keys),
            Err(PurifyError::NotAMapping { found: "array" })
        ));
    }

    #[test]
    fn json_null_entry_halts_leaf_rules() {
        let mut doc = json!({"nick": null});
        sanitize_json(&mut doc, &[key("nick", rules![TRIM_SPACE, TO_EMAIL])]).unwrap();
        assert_eq!(doc, json!({"nick": null}));
    }

    #[test]
    fn large_json_integers_survive_pass_through_pipelines() {
        let mut doc = json!({"id": u64::MAX, "big": -9_007_199_254_740_993_i64});
        sanitize_json(
            &mut doc,
            &[
                key("id", rules![]),
                key("big", rules![crate::when::when(false, rules![TRIM_SPACE])]),
            ],
        )
        .unwrap();
        assert_eq!(doc, json!({"id": u64::MAX, "big": -9_007_199_254_740_993_i64}));
    }

    #[test]
    fn nested_json_values_are_not_scalars() {
        let mut doc = json!({"address": {"city": "Paris"}});
        let err = sanitize_json(&mut doc, &[key("address", rules![])]).unwrap_err();
        assert!(matches!(err, PurifyError::NestedValue { kind: "object" }));
    }
}
