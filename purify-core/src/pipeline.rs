//! The pipeline executor.
//!
//! [`sanitize`] threads one value through an ordered rule sequence. It stops
//! at the first error (returned verbatim) or at the first rule that halts, in
//! which case the value reached so far is the result.
//!
//! License: MIT OR APACHE 2.0

use log::trace;

use crate::errors::PurifyError;
use crate::report::log_rule_step_debug;
use crate::rule::{Outcome, Rule};
use crate::value::Value;

/// Sanitizes `value` with `rules`, applied left to right.
///
/// An empty rule list returns the input unchanged.
pub fn sanitize(value: Value, rules: &[Box<dyn Rule>]) -> Result<Value, PurifyError> {
    let mut current = value;

    for rule in rules {
        match rule.apply(&current)? {
            Outcome::Replace(next) => {
                log_rule_step_debug(rule.name(), &current, &next);
                current = next;
            }
            Outcome::Halt => {
                trace!(target: "purify_core::pipeline", "Rule '{}' halted the pipeline.", rule.name());
                break;
            }
        }
    }

    Ok(current)
}
