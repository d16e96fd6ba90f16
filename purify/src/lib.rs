// purify/src/lib.rs
//! # Purify CLI Application
//!
//! This crate provides the command-line interface for the purify rule engine.
//! The engine itself lives in `purify-core`; this crate handles argument
//! parsing, I/O, logging setup and terminal output.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
