//! Prints the per-key change summary after a sanitize run.
//!
//! Values are personal data more often than not, so they are shown redacted
//! unless `PURIFY_ALLOW_DEBUG_PII=true` is set.

use std::collections::BTreeMap;
use std::io::{self, Write};

use purify_core::FieldChange;
use purify_core::report::pii_debug_allowed;
use purify_core::redact_sensitive;

use crate::ui::output_format::paint;
use crate::ui::theme::{ThemeEntry, ThemeMap};

fn shown(value: &str, reveal: bool) -> String {
    if reveal { value.to_string() } else { redact_sensitive(value) }
}

/// Writes a summary of `changes` to `writer`.
///
/// The first block counts changes per key; the second lists each change.
pub fn print_summary<W: Write>(
    changes: &[FieldChange],
    writer: &mut W,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    print_summary_with(changes, writer, theme, supports_color, pii_debug_allowed())
}

fn print_summary_with<W: Write>(
    changes: &[FieldChange],
    writer: &mut W,
    theme: &ThemeMap,
    supports_color: bool,
    reveal: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint("Sanitization Summary:", ThemeEntry::Header, theme, supports_color))?;

    if changes.is_empty() {
        writeln!(writer, "  No values were changed.")?;
        return Ok(());
    }

    let mut per_key: BTreeMap<&str, usize> = BTreeMap::new();
    for change in changes {
        *per_key.entry(change.key.as_str()).or_default() += 1;
    }
    for (key, count) in &per_key {
        writeln!(
            writer,
            "  {}: {} change{}",
            paint(key, ThemeEntry::SummaryKey, theme, supports_color),
            count,
            if *count == 1 { "" } else { "s" }
        )?;
    }

    writeln!(writer)?;
    for change in changes {
        writeln!(
            writer,
            "  [{}] {}: {} -> {}",
            change.record,
            paint(&change.key, ThemeEntry::SummaryKey, theme, supports_color),
            paint(&shown(&change.before, reveal), ThemeEntry::SummaryBefore, theme, supports_color),
            paint(&shown(&change.after, reveal), ThemeEntry::SummaryAfter, theme, supports_color),
        )?;
    }
    Ok(())
}
