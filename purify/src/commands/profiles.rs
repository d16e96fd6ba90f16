//! `profiles` subcommands: list and check sanitize profiles.

use anyhow::{Context, Result};
use std::io::Write;

use purify_core::{list_profiles, load_profile_by_name, profile_search_dirs, RuleSpec};

use crate::ui::output_format::paint;
use crate::ui::theme::{ThemeEntry, ThemeMap};

pub fn run_list<W: Write>(writer: &mut W, theme: &ThemeMap, supports_color: bool) -> Result<()> {
    let profiles = list_profiles();
    if profiles.is_empty() {
        writeln!(writer, "No profiles found. Searched:")?;
        for dir in profile_search_dirs() {
            writeln!(writer, "  {}", dir.display())?;
        }
        return Ok(());
    }

    writeln!(writer, "{}", paint("Available profiles:", ThemeEntry::Header, theme, supports_color))?;
    for (name, path) in profiles {
        writeln!(
            writer,
            "  {} ({})",
            paint(&name, ThemeEntry::SummaryKey, theme, supports_color),
            path.display()
        )?;
    }
    Ok(())
}

fn describe(specs: &[RuleSpec]) -> String {
    specs
        .iter()
        .map(|spec| match spec {
            RuleSpec::Named(name) => name.clone(),
            RuleSpec::When { when, then, otherwise } => {
                format!("when({})[{}] else [{}]", when, describe(then), describe(otherwise))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Loads and validates a profile, then prints its keys and rule chains.
pub fn run_check<W: Write>(name_or_path: &str, writer: &mut W, theme: &ThemeMap, supports_color: bool) -> Result<()> {
    let profile = load_profile_by_name(name_or_path)
        .with_context(|| format!("Profile '{}' is not valid", name_or_path))?;

    writeln!(
        writer,
        "{}",
        paint(
            &format!("Profile '{}' (version {}) is valid.", profile.name, profile.version),
            ThemeEntry::Success,
            theme,
            supports_color
        )
    )?;
    if let Some(description) = &profile.description {
        writeln!(writer, "  {}", description)?;
    }
    for spec in &profile.keys {
        writeln!(
            writer,
            "  {}: {}",
            paint(&spec.key, ThemeEntry::SummaryKey, theme, supports_color),
            describe(&spec.rules)
        )?;
    }
    Ok(())
}
