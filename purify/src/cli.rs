// purify/src/cli.rs
//! This file defines the command-line interface (CLI) for the purify application,
//! including all available commands and their arguments.
//! License: MIT OR APACHE 2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "purify",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Sanitize JSON records with declarative rule profiles",
    long_about = "Purify normalizes loosely-formatted records such as form submissions or imported rows. A profile names the keys to clean and the ordered rules to apply to each one: trimming, case conversion, character stripping, hashing and conditional branches.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for the purify crates)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `purify` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes JSON records from a file or stdin.
    #[command(about = "Sanitizes JSON records from a file or stdin using a profile.")]
    Sanitize(SanitizeCommand),

    /// Lists the built-in rule names usable in profiles.
    #[command(about = "Lists the built-in rule names usable in profiles.")]
    Rules,

    /// Provides tools for managing sanitize profiles.
    #[command(subcommand, about = "Provides tools for managing sanitize profiles.")]
    Profiles(ProfilesCommand),
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Profile name or path. The built-in default profile is used when omitted.
    #[arg(long = "profile", short = 'p', value_name = "NAME|FILE", help = "Profile name (searched in the profile directories) or path to a profile file.")]
    pub profile: Option<String>,

    /// Override profile merged on top of the selected profile.
    #[arg(long = "config", value_name = "FILE", help = "Path to a profile whose keys override the selected profile.")]
    pub config: Option<PathBuf>,

    /// Treat every input line as a separate JSON document.
    #[arg(long = "line-buffered", help = "Process input line by line, one JSON document per line.")]
    pub line_buffered: bool,

    /// Pretty-print the JSON output.
    #[arg(long = "pretty", conflicts_with = "line_buffered", help = "Pretty-print the JSON output.")]
    pub pretty: bool,

    /// Print the changed keys to stderr.
    #[arg(long = "summary", help = "Print a summary of changed keys to stderr.")]
    pub summary: bool,
}

/// Subcommands for the `profiles` command.
#[derive(Subcommand, Debug)]
pub enum ProfilesCommand {
    #[command(about = "Lists all profiles found in the profile directories.")]
    List,
    #[command(about = "Validates a profile and prints its keys and rules.")]
    Check {
        /// Profile name or path.
        #[arg(value_name = "NAME|FILE", help = "Profile name or path to a profile file.")]
        profile: String,
    },
}
