//! # Purify Core Library
//!
//! `purify-core` provides the rule engine behind `purify`: an ordered pipeline of
//! sanitization rules applied to selected fields of a struct, or selected keys of a
//! mapping, writing the cleaned values back in place.
//!
//! The library performs no I/O in the engine itself. Profiles (YAML files naming keys
//! and rules) and the headless helpers sit on top of the engine for application use.
//!
//! ## Modules
//!
//! * `value`: The tagged [`Value`] union that flows through pipelines.
//! * `rule`: The [`Rule`] trait, the [`Outcome`] of applying one, and leaf [`StringRule`]s.
//! * `pipeline`: The executor, [`sanitize`].
//! * `when`: The conditional composite rule, [`when`].
//! * `transforms` / `catalog`: The built-in string transforms and their named rules.
//! * `slot`: The [`Slot`] binder used to read and write one scalar.
//! * `record` / `map`: Batch sanitizers over structs and mappings.
//! * `profile`: YAML profiles, their validation, merging and compilation.
//! * `headless`: One-shot sanitization of JSON documents.
//! * `report`: Change reporting and PII-safe debug logging.
//!
//! ## Usage Example
//!
//! ```rust
//! use purify_core::catalog::{TO_SHA256, TO_TITLE_CASE, TRIM_SPACE};
//! use purify_core::{field, rules, sanitize_struct, when, Record};
//! use anyhow::Result;
//!
//! struct Signup {
//!     name: String,
//!     email: String,
//! }
//!
//! impl Record for Signup {}
//!
//! fn main() -> Result<()> {
//!     let mut signup = Signup {
//!         name: "  john doe ".to_string(),
//!         email: "John@example.com".to_string(),
//!     };
//!
//!     let hash_emails = true;
//!     let fields = [
//!         field(|s: &mut Signup| &mut s.name, rules![TRIM_SPACE, TO_TITLE_CASE]),
//!         field(|s: &mut Signup| &mut s.email, rules![when(hash_emails, rules![TO_SHA256])]),
//!     ];
//!     sanitize_struct(&mut signup, &fields)?;
//!
//!     assert_eq!(signup.name, "John Doe");
//!     assert_eq!(signup.email.len(), 64);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Engine operations return [`PurifyError`]. The first failing rule aborts the
//! pipeline, and the first failing declaration aborts the batch; values written
//! before the failure stay written. Profile loading and headless helpers return
//! `anyhow::Result` with context attached.
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod catalog;
pub mod errors;
pub mod headless;
pub mod map;
pub mod pipeline;
pub mod profile;
pub mod record;
pub mod report;
pub mod rule;
pub mod slot;
pub mod transforms;
pub mod value;
pub mod when;

/// Re-exports the custom error type for clear error reporting.
pub use errors::PurifyError;

/// Re-exports the value model and rule abstractions.
pub use value::Value;
pub use rule::{Outcome, Rule, Rules, StringRule};
pub use pipeline::sanitize;
pub use when::{when, WhenRule};

/// Re-exports the binders and batch sanitizers.
pub use slot::{Slot, Target};
pub use record::{field, nested, sanitize_json_record, sanitize_struct, FieldRules, Record, Sanitizable};
pub use map::{key, sanitize_json, sanitize_map, KeyRules, Mapping};

/// Re-exports profile configuration types and loaders.
pub use profile::{
    list_profiles,
    load_profile_by_name,
    merge_profiles,
    profile_candidate_paths,
    profile_search_dirs,
    KeySpec,
    RuleSpec,
    SanitizeProfile,
};

/// Re-exports types and functions for one-shot, non-interactive use.
pub use headless::{headless_sanitize_json, headless_sanitize_json_with_report, sanitize_document};

/// Re-exports change reporting helpers.
pub use report::{redact_sensitive, FieldChange};
