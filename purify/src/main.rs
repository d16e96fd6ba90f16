// purify/src/main.rs
//! Purify entry point.
//!
//! Parses arguments, initializes logging and the theme, then dispatches to
//! the selected command.

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use log::LevelFilter;
use std::io;
use std::process::ExitCode;

use purify::cli::{Cli, Commands, ProfilesCommand};
use purify::commands::{profiles, rules, sanitize};
use purify::logger;
use purify::ui::theme::{build_theme_map, ThemeStyle};

fn run(args: Cli) -> Result<()> {
    let theme_map = build_theme_map(args.theme.as_ref()).context("Theme error")?;
    let stdout_supports_color = io::stdout().is_terminal();

    match args.command {
        Commands::Sanitize(cmd) => {
            let opts = sanitize::SanitizeOptions::from_command(cmd, args.quiet);
            sanitize::run_sanitize_opts(opts, &theme_map)
        }
        Commands::Rules => rules::run_rules(&mut io::stdout(), &theme_map, stdout_supports_color),
        Commands::Profiles(ProfilesCommand::List) => {
            profiles::run_list(&mut io::stdout(), &theme_map, stdout_supports_color)
        }
        Commands::Profiles(ProfilesCommand::Check { profile }) => {
            profiles::run_check(&profile, &mut io::stdout(), &theme_map, stdout_supports_color)
        }
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = if args.quiet {
        Some(LevelFilter::Off)
    } else if args.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            sanitize::error_msg(format!("{:#}", e), &ThemeStyle::default_theme_map());
            ExitCode::FAILURE
        }
    }
}
