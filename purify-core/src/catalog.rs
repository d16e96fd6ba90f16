//! catalog.rs - The named catalog of leaf string rules.
//!
//! Each constant is a [`StringRule`] usable directly in any rule sequence. The
//! same rules are addressable by name through a global, immutable registry,
//! which is what profiles use to turn rule names from YAML into rule values.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::errors::PurifyError;
use crate::rule::{Rule, Rules, StringRule};
use crate::transforms;

pub const TRIM_SPACE: StringRule = StringRule::new("trim_space", transforms::trim_space);
pub const LTRIM_SPACE: StringRule = StringRule::new("ltrim_space", transforms::ltrim_space);
pub const RTRIM_SPACE: StringRule = StringRule::new("rtrim_space", transforms::rtrim_space);
pub const TO_UPPER: StringRule = StringRule::new("to_upper", transforms::to_upper);
pub const TO_LOWER: StringRule = StringRule::new("to_lower", transforms::to_lower);
pub const TO_TITLE_CASE: StringRule = StringRule::new("to_title_case", transforms::to_title_case);
pub const TO_CAMEL_CASE: StringRule = StringRule::new("to_camel_case", transforms::to_camel_case);
pub const TO_KEBAB_CASE: StringRule = StringRule::new("to_kebab_case", transforms::to_kebab_case);
pub const TO_SNAKE_CASE: StringRule = StringRule::new("to_snake_case", transforms::to_snake_case);
pub const STRIP_HTML: StringRule = StringRule::new("strip_html", transforms::strip_html);
pub const STRIP_ACCENTS: StringRule = StringRule::new("strip_accents", transforms::strip_accents);
pub const TO_NAME: StringRule = StringRule::new("to_name", transforms::to_name);
pub const TO_PATH: StringRule = StringRule::new("to_path", transforms::to_path);
pub const TO_NUMERIC: StringRule = StringRule::new("to_numeric", transforms::to_numeric);
pub const TO_ALPHA: StringRule = StringRule::new("to_alpha", transforms::to_alpha);
pub const TO_ALPHA_NUMERIC: StringRule = StringRule::new("to_alpha_numeric", transforms::to_alpha_numeric);
pub const TO_EMAIL: StringRule = StringRule::new("to_email", transforms::to_email);
pub const TO_SHA256: StringRule = StringRule::new("to_sha256", transforms::to_sha256);

const ALL: [StringRule; 18] = [
    TRIM_SPACE,
    LTRIM_SPACE,
    RTRIM_SPACE,
    TO_UPPER,
    TO_LOWER,
    TO_TITLE_CASE,
    TO_CAMEL_CASE,
    TO_KEBAB_CASE,
    TO_SNAKE_CASE,
    STRIP_HTML,
    STRIP_ACCENTS,
    TO_NAME,
    TO_PATH,
    TO_NUMERIC,
    TO_ALPHA,
    TO_ALPHA_NUMERIC,
    TO_EMAIL,
    TO_SHA256,
];

// Sorted by name so listings are stable.
static REGISTRY: Lazy<BTreeMap<&'static str, StringRule>> = Lazy::new(|| {
    let registry: BTreeMap<_, _> = ALL.iter().map(|rule| (rule.label(), *rule)).collect();
    debug!("Leaf rule catalog initialized with {} rules.", registry.len());
    registry
});

/// Looks up a catalog rule by name.
pub fn lookup(name: &str) -> Option<StringRule> {
    REGISTRY.get(name).copied()
}

/// All catalog rule names, sorted.
pub fn names() -> impl Iterator<Item = &'static str> {
    REGISTRY.keys().copied()
}

/// Resolves a list of rule names into a rule sequence, preserving order.
///
/// Every unknown name is reported, not just the first one.
pub fn compile_rule_names<S: AsRef<str>>(names: &[S]) -> Result<Rules, PurifyError> {
    debug!("Resolving {} rule names.", names.len());

    let mut rules: Rules = Vec::with_capacity(names.len());
    let mut unknown = Vec::new();

    for name in names {
        match lookup(name.as_ref()) {
            Some(rule) => rules.push(Box::new(rule) as Box<dyn Rule>),
            None => unknown.push(name.as_ref().to_string()),
        }
    }

    if unknown.is_empty() {
        Ok(rules)
    } else {
        Err(PurifyError::UnknownRule(unknown.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::sanitize;
    use crate::value::Value;

    #[test]
    fn every_constant_is_registered_under_its_name() {
        for rule in ALL {
            let found = lookup(rule.label()).expect("registered");
            assert_eq!(found.label(), rule.label());
        }
        assert_eq!(names().count(), ALL.len());
    }

    #[test]
    fn names_are_sorted() {
        let listed: Vec<_> = names().collect();
        let mut sorted = listed.clone();
        sorted.sort_unstable();
        assert_eq!(listed, sorted);
    }

    #[test]
    fn compile_preserves_order() {
        let rules = compile_rule_names(&["trim_space", "to_email"]).unwrap();
        let out = sanitize(Value::from(" John@EXAMPLE.com "), &rules).unwrap();
        assert_eq!(out, Value::from("John@example.com"));
    }

    #[test]
    fn compile_reports_all_unknown_names() {
        let err = compile_rule_names(&["trim_space", "nope", "to_shout"]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown sanitization rule 'nope, to_shout'");
    }
}
