// purify/src/commands/mod.rs
pub mod profiles;
pub mod rules;
pub mod sanitize;
