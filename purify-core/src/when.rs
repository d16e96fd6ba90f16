//! WHEN rule - conditional sub-pipelines.
//!
//! [`when`] builds a composite rule that runs one of two rule sequences. The
//! condition is a plain `bool` the caller computes once, when the rule is
//! built; it is never re-evaluated per value.
//!
//! ```rust
//! use purify_core::{rules, sanitize, when, catalog::{TO_ALPHA, TO_ALPHA_NUMERIC}, Value};
//!
//! let keep_digits = false;
//! let rules = rules![when(keep_digits, rules![TO_ALPHA_NUMERIC]).otherwise(rules![TO_ALPHA])];
//! assert_eq!(sanitize(Value::from("john doe123!"), &rules).unwrap(), Value::from("john doe"));
//! ```

use crate::errors::PurifyError;
use crate::pipeline::sanitize;
use crate::rule::{Outcome, Rule, Rules};
use crate::value::Value;

/// A rule that delegates to `rules` when its condition holds and to
/// `else_rules` otherwise. An empty branch passes the value through.
#[derive(Debug)]
pub struct WhenRule {
    condition: bool,
    rules: Rules,
    else_rules: Rules,
}

/// Creates a [`WhenRule`] with an empty false branch.
pub fn when(condition: bool, rules: Rules) -> WhenRule {
    WhenRule {
        condition,
        rules,
        else_rules: Vec::new(),
    }
}

impl WhenRule {
    /// Sets the rules applied when the condition is false.
    pub fn otherwise(mut self, rules: Rules) -> Self {
        self.else_rules = rules;
        self
    }

    pub fn condition(&self) -> bool {
        self.condition
    }

    /// The branch selected by the condition.
    fn branch(&self) -> &[Box<dyn Rule>] {
        if self.condition {
            &self.rules
        } else {
            &self.else_rules
        }
    }
}

impl Rule for WhenRule {
    fn apply(&self, value: &Value) -> Result<Outcome, PurifyError> {
        sanitize(value.clone(), self.branch()).map(Outcome::Replace)
    }

    fn name(&self) -> &str {
        "when"
    }
}
