//! Batch sanitization of records (structs).
//!
//! Fields are declared with [`field`], pairing an accessor closure with the
//! rules for that field. [`sanitize_struct`] runs the declarations in order,
//! writes every result back, then hands control to any nested records the
//! type lists through [`Record::nested_mut`].
//!
//! ```rust
//! use purify_core::{field, rules, sanitize_struct, Record};
//! use purify_core::catalog::{TO_ALPHA, TO_EMAIL, TO_TITLE_CASE, TRIM_SPACE};
//!
//! struct Signup {
//!     name: String,
//!     email: String,
//! }
//!
//! impl Record for Signup {}
//!
//! let mut form = Signup { name: " john doe123 ".into(), email: " John@EXAMPLE.com ".into() };
//! sanitize_struct(&mut form, &[
//!     field(|f: &mut Signup| &mut f.name, rules![TRIM_SPACE, TO_ALPHA, TO_TITLE_CASE]),
//!     field(|f: &mut Signup| &mut f.email, rules![TRIM_SPACE, TO_EMAIL]),
//! ]).unwrap();
//!
//! assert_eq!(form.name, "John Doe");
//! assert_eq!(form.email, "John@example.com");
//! ```
//!
//! License: MIT OR APACHE 2.0

use std::fmt;
use std::marker::PhantomData;

use log::debug;

use crate::errors::PurifyError;
use crate::pipeline::sanitize;
use crate::rule::Rules;
use crate::slot::{Slot, Target};

/// A value that knows how to sanitize itself, typically by calling
/// [`sanitize_struct`] with its own field declarations.
pub trait Sanitizable {
    fn sanitize(&mut self) -> Result<(), PurifyError>;
}

/// A record type that can be the target of [`sanitize_struct`].
pub trait Record {
    /// The populated, reference-typed nested records to sanitize after the
    /// declared fields. Value-typed nested records are not listed here.
    fn nested_mut(&mut self) -> Vec<&mut dyn Sanitizable> {
        Vec::new()
    }
}

/// Builds an entry for [`Record::nested_mut`] from a boxed optional child.
pub fn nested<S: Sanitizable>(child: &mut Option<Box<S>>) -> Option<&mut dyn Sanitizable> {
    child.as_deref_mut().map(|c| c as &mut dyn Sanitizable)
}

/// Resolves a record to one of its slots.
trait Accessor<T>: Send + Sync {
    fn slot<'a>(&self, record: &'a mut T) -> &'a mut dyn Slot;
}

struct FnAccessor<F, S> {
    f: F,
    _slot: PhantomData<fn() -> S>,
}

impl<T, S, F> Accessor<T> for FnAccessor<F, S>
where
    S: Slot + 'static,
    F: for<'a> Fn(&'a mut T) -> &'a mut S + Send + Sync,
{
    fn slot<'a>(&self, record: &'a mut T) -> &'a mut dyn Slot {
        (self.f)(record)
    }
}

/// A field declaration: where the field lives and which rules it gets.
pub struct FieldRules<T> {
    name: Option<String>,
    accessor: Box<dyn Accessor<T>>,
    rules: Rules,
}

/// Declares a record field and the rules to apply to it.
pub fn field<T, S, F>(accessor: F, rules: Rules) -> FieldRules<T>
where
    S: Slot + 'static,
    F: for<'a> Fn(&'a mut T) -> &'a mut S + Send + Sync + 'static,
{
    FieldRules {
        name: None,
        accessor: Box::new(FnAccessor {
            f: accessor,
            _slot: PhantomData,
        }),
        rules,
    }
}

impl<T> FieldRules<T> {
    /// Attaches a field name, used in log output only.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn field_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl<T> fmt::Debug for FieldRules<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRules")
            .field("name", &self.name)
            .field("rules", &self.rules)
            .finish()
    }
}

/// Sanitizes the declared fields of `record`, in declaration order.
///
/// A `None` record is a successful no-op. Processing stops at the first
/// failing field; fields already processed keep their new values. When every
/// declared field succeeds, each record listed by [`Record::nested_mut`] is
/// asked to sanitize itself.
pub fn sanitize_struct<'r, T>(
    record: impl Target<'r, T>,
    fields: &[FieldRules<T>],
) -> Result<(), PurifyError>
where
    T: Record + 'r,
{
    let Some(record) = record.into_target() else {
        debug!("sanitize_struct called with no record; nothing to do.");
        return Ok(());
    };

    for (index, declaration) in fields.iter().enumerate() {
        let slot = declaration.accessor.slot(record);
        let current = slot.get()?;
        let sanitized = sanitize(current, &declaration.rules)?;
        slot.set(sanitized).map_err(|e| PurifyError::FieldNotSettable {
            index,
            reason: e.to_string(),
        })?;
        debug!(
            "Field {} ({}) sanitized with {} rules.",
            index,
            declaration.name.as_deref().unwrap_or("unnamed"),
            declaration.rules.len()
        );
    }

    for child in record.nested_mut() {
        child.sanitize()?;
    }

    Ok(())
}

/// Dynamic counterpart of [`sanitize_struct`] for JSON records.
///
/// `null` is a no-op, an object is sanitized entry by entry, and any other
/// JSON value is not record-shaped.
pub fn sanitize_json_record(
    record: &mut serde_json::Value,
    keys: &[crate::map::KeyRules<String>],
) -> Result<(), PurifyError> {
    match record {
        serde_json::Value::Null => Ok(()),
        serde_json::Value::Object(map) => crate::map::sanitize_map(map, keys),
        other => Err(PurifyError::NotARecord {
            found: crate::map::json_kind(other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{TO_ALPHA, TO_EMAIL, TO_TITLE_CASE, TO_UPPER, TRIM_SPACE};
    use crate::errors::PurifyError;
    use crate::rule::{Outcome, Rule};
    use crate::rules;
    use crate::value::Value;
    use serde_json::json;
    use test_log::test;

    #[derive(Debug, Default, PartialEq)]
    struct Address {
        city: String,
    }

    impl Record for Address {}

    impl Sanitizable for Address {
        fn sanitize(&mut self) -> Result<(), PurifyError> {
            sanitize_struct(self, &[field(|a: &mut Address| &mut a.city, rules![TRIM_SPACE, TO_UPPER])])
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct User {
        name: String,
        email: String,
        nickname: Option<String>,
        age: i64,
        home: Option<Box<Address>>,
        work: Option<Box<Address>>,
        // Value-typed: never visited.
        billing: Address,
    }

    impl Record for User {
        fn nested_mut(&mut self) -> Vec<&mut dyn Sanitizable> {
            [nested(&mut self.home), nested(&mut self.work)].into_iter().flatten().collect()
        }
    }

    fn user() -> User {
        User {
            name: " john doe123 ".into(),
            email: " John@EXAMPLE.com ".into(),
            ..User::default()
        }
    }

    struct Reject;

    impl Rule for Reject {
        fn apply(&self, _value: &Value) -> Result<Outcome, PurifyError> {
            Err(PurifyError::rule("reject", "no"))
        }
    }

    #[test]
    fn sanitizes_declared_fields_in_place() {
        let mut u = user();
        sanitize_struct(
            &mut u,
            &[
                field(|u: &mut User| &mut u.name, rules![TRIM_SPACE, TO_ALPHA, TO_TITLE_CASE]).named("name"),
                field(|u: &mut User| &mut u.email, rules![TRIM_SPACE, TO_EMAIL]),
            ],
        )
        .unwrap();
        assert_eq!(u.name, "John Doe");
        assert_eq!(u.email, "John@example.com");
    }

    #[test]
    fn none_record_is_a_no_op() {
        let fields = [field(|u: &mut User| &mut u.name, rules![Reject])];
        assert!(sanitize_struct(None::<&mut User>, &fields).is_ok());
    }

    #[test]
    fn first_error_aborts_without_rollback() {
        let mut u = user();
        let err = sanitize_struct(
            &mut u,
            &[
                field(|u: &mut User| &mut u.name, rules![TRIM_SPACE]),
                field(|u: &mut User| &mut u.email, rules![Reject]),
                field(|u: &mut User| &mut u.nickname, rules![TO_UPPER]),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, PurifyError::Rule { .. }));
        assert_eq!(u.name, "john doe123");
        assert_eq!(u.email, " John@EXAMPLE.com ");
    }

    #[test]
    fn leaf_rule_on_integer_field_is_a_type_mismatch() {
        let mut u = user();
        let err = sanitize_struct(&mut u, &[field(|u: &mut User| &mut u.age, rules![TRIM_SPACE])]).unwrap_err();
        assert!(matches!(err, PurifyError::TypeMismatch { found: "integer" }));
    }

    #[test]
    fn slot_refusing_the_result_is_positional() {
        struct Stringify;
        impl Rule for Stringify {
            fn apply(&self, value: &Value) -> Result<Outcome, PurifyError> {
                Ok(Outcome::Replace(Value::Text(value.to_string())))
            }
        }

        let mut u = user();
        let err = sanitize_struct(
            &mut u,
            &[
                field(|u: &mut User| &mut u.name, rules![]),
                field(|u: &mut User| &mut u.age, rules![Stringify]),
            ],
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "field 1 is not settable: expected integer, got string");
    }

    #[test]
    fn failed_write_keeps_empty_optional_field_empty() {
        struct Placeholder;
        impl Rule for Placeholder {
            fn apply(&self, _value: &Value) -> Result<Outcome, PurifyError> {
                Ok(Outcome::Replace(Value::from("n/a")))
            }
        }

        #[derive(Default)]
        struct Counter {
            count: Option<i64>,
        }
        impl Record for Counter {}

        let mut c = Counter::default();
        let err = sanitize_struct(&mut c, &[field(|c: &mut Counter| &mut c.count, rules![Placeholder])]).unwrap_err();
        assert_eq!(err.to_string(), "field 0 is not settable: expected integer, got string");
        assert_eq!(c.count, None);
    }

    #[test]
    fn empty_optional_field_is_left_untouched() {
        let mut u = user();
        sanitize_struct(&mut u, &[field(|u: &mut User| &mut u.nickname, rules![TRIM_SPACE, TO_UPPER])]).unwrap();
        assert_eq!(u.nickname, None);

        u.nickname = Some(" jd ".into());
        sanitize_struct(&mut u, &[field(|u: &mut User| &mut u.nickname, rules![TRIM_SPACE, TO_UPPER])]).unwrap();
        assert_eq!(u.nickname.as_deref(), Some("JD"));
    }

    #[test]
    fn visits_only_populated_boxed_children() {
        let mut u = user();
        u.home = Some(Box::new(Address { city: " paris ".into() }));
        u.billing = Address { city: " lyon ".into() };

        let no_fields: [FieldRules<User>; 0] = [];
        sanitize_struct(&mut u, &no_fields).unwrap();

        assert_eq!(u.home.as_ref().map(|a| a.city.as_str()), Some("PARIS"));
        assert!(u.work.is_none());
        assert_eq!(u.billing.city, " lyon ");
    }

    #[test]
    fn json_record_shape_is_checked() {
        let keys = [crate::map::key("name", rules![TRIM_SPACE])];

        let mut obj = json!({"name": " x "});
        sanitize_json_record(&mut obj, &keys).unwrap();
        assert_eq!(obj, json!({"name": "x"}));

        assert!(sanitize_json_record(&mut json!(null), &keys).is_ok());
        assert!(matches!(
            sanitize_json_record(&mut json!([1]), &keys),
            Err(PurifyError::NotARecord { found: "array" })
        ));
    }
}
