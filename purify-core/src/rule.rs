// purify-core/src/rule.rs
//! Defines the core `Rule` trait and the leaf `StringRule`.
//!
//! The `Rule` trait is the single contract every transformation satisfies, from
//! a one-line string transform to a conditional rule holding whole
//! sub-pipelines. Because composite rules implement the same trait as leaves,
//! rules nest uniformly behind `Box<dyn Rule>`.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;

use crate::errors::PurifyError;
use crate::value::Value;

/// What a rule did with its input.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The value to hand to the next rule.
    Replace(Value),
    /// The absent marker: stop the pipeline and keep the current value.
    Halt,
}

/// A trait that defines a single unit of transformation.
///
/// Implementations must be pure functions of their input and their own fixed
/// configuration. A rule may fail with its own error (see
/// [`PurifyError::rule`]); the pipeline surfaces it verbatim.
pub trait Rule: Send + Sync {
    /// Transforms `value`, or returns [`Outcome::Halt`] when the rule does not
    /// apply and nothing after it should run.
    fn apply(&self, value: &Value) -> Result<Outcome, PurifyError>;

    /// A name used in logs and diagnostics.
    fn name(&self) -> &str {
        "custom"
    }
}

impl fmt::Debug for dyn Rule + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({})", self.name())
    }
}

/// An ordered rule sequence.
pub type Rules = Vec<Box<dyn Rule>>;

/// Builds a [`Rules`] vector from any mix of rule values.
///
/// ```rust
/// use purify_core::{rules, sanitize, catalog::{TRIM_SPACE, TO_TITLE_CASE}, Value};
///
/// let cleaned = sanitize(Value::from("  jane doe "), &rules![TRIM_SPACE, TO_TITLE_CASE]).unwrap();
/// assert_eq!(cleaned, Value::from("Jane Doe"));
/// ```
#[macro_export]
macro_rules! rules {
    () => {
        ::std::vec::Vec::<::std::boxed::Box<dyn $crate::rule::Rule>>::new()
    };
    ($($rule:expr),+ $(,)?) => {
        ::std::vec![$(::std::boxed::Box::new($rule) as ::std::boxed::Box<dyn $crate::rule::Rule>),+]
    };
}

/// A leaf rule wrapping a pure `&str -> String` function.
///
/// Text and UTF-8 byte sequences are transformed into text, an absent value
/// halts the pipeline, and anything else is a type mismatch.
#[derive(Clone, Copy)]
pub struct StringRule {
    name: &'static str,
    transform: fn(&str) -> String,
}

impl StringRule {
    pub const fn new(name: &'static str, transform: fn(&str) -> String) -> Self {
        Self { name, transform }
    }

    /// The rule's name with its full `'static` lifetime.
    pub const fn label(&self) -> &'static str {
        self.name
    }

    /// Runs the wrapped transform directly, bypassing value coercion.
    pub fn transform(&self, input: &str) -> String {
        (self.transform)(input)
    }
}

impl fmt::Debug for StringRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringRule").field("name", &self.name).finish()
    }
}

impl Rule for StringRule {
    fn apply(&self, value: &Value) -> Result<Outcome, PurifyError> {
        if value.is_absent() {
            return Ok(Outcome::Halt);
        }
        let text = value.as_text()?;
        Ok(Outcome::Replace(Value::Text((self.transform)(&text))))
    }

    fn name(&self) -> &str {
        self.name
    }
}
