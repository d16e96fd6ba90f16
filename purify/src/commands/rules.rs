//! `rules` command: lists the built-in rule names.

use anyhow::Result;
use std::io::Write;

use purify_core::catalog;

use crate::ui::output_format::paint;
use crate::ui::theme::{ThemeEntry, ThemeMap};

pub fn run_rules<W: Write>(writer: &mut W, theme: &ThemeMap, supports_color: bool) -> Result<()> {
    writeln!(writer, "{}", paint("Available rules:", ThemeEntry::Header, theme, supports_color))?;
    for name in catalog::names() {
        writeln!(writer, "  {}", paint(name, ThemeEntry::RuleName, theme, supports_color))?;
    }
    writeln!(writer, "  {} (conditional block: when / then / else)", paint("when", ThemeEntry::RuleName, theme, supports_color))?;
    Ok(())
}
