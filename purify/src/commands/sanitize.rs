//! `sanitize` command implementation.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

use purify_core::{
    load_profile_by_name, merge_profiles, sanitize_document, FieldChange, KeyRules, SanitizeProfile,
};

use crate::cli::SanitizeCommand;
use crate::ui::change_summary;
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Options for [`run_sanitize_opts`], decoupled from clap.
pub struct SanitizeOptions {
    pub input_file: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub profile: Option<String>,
    pub config: Option<PathBuf>,
    pub line_buffered: bool,
    pub pretty: bool,
    pub summary: bool,
    pub quiet: bool,
}

impl SanitizeOptions {
    pub fn from_command(cmd: SanitizeCommand, quiet: bool) -> Self {
        SanitizeOptions {
            input_file: cmd.input_file,
            output_path: cmd.output,
            profile: cmd.profile,
            config: cmd.config,
            line_buffered: cmd.line_buffered,
            pretty: cmd.pretty,
            summary: cmd.summary,
            quiet,
        }
    }
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Resolves the profile to apply: the named or default profile, with the
/// optional override merged on top.
pub fn resolve_profile(profile: Option<&str>, config: Option<&PathBuf>) -> Result<SanitizeProfile> {
    let base = match profile {
        Some(name) => {
            load_profile_by_name(name).with_context(|| format!("Failed to load profile '{}'", name))?
        }
        None => SanitizeProfile::load_default()?,
    };
    let user = match config {
        Some(path) => Some(SanitizeProfile::load_from_file(path)?),
        None => None,
    };
    Ok(merge_profiles(base, user))
}

/// The main operation runner for the `sanitize` command.
pub fn run_sanitize_opts(opts: SanitizeOptions, theme: &ThemeMap) -> Result<()> {
    info!("Starting purify sanitize operation.");

    let profile = resolve_profile(opts.profile.as_deref(), opts.config.as_ref())?;
    let keys = profile
        .compile()
        .with_context(|| format!("Failed to compile profile '{}'", profile.name))?;
    debug!("Profile '{}' compiled with {} keys.", profile.name, keys.len());

    let reader: Box<dyn BufRead> = match &opts.input_file {
        Some(path) => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let changes = match &opts.output_path {
        Some(path) => {
            if !opts.quiet {
                info_msg(format!("Writing sanitized content to file: {}", path.display()), theme);
            }
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            sanitize_stream(reader, &mut file, &keys, opts.line_buffered, opts.pretty)?
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            sanitize_stream(reader, &mut writer, &keys, opts.line_buffered, opts.pretty)?
        }
    };

    if opts.summary && !opts.quiet {
        let stderr_supports_color = io::stderr().is_terminal();
        change_summary::print_summary(&changes, &mut io::stderr(), theme, stderr_supports_color)?;
    }

    info!("Purify sanitize operation completed.");
    Ok(())
}

/// Reads JSON from `reader`, sanitizes it and writes the result to `writer`.
///
/// In line-buffered mode each non-blank line is its own document and is
/// flushed as soon as it is written; blank lines are passed through. Record
/// indices in the returned changes count records across the whole input.
pub fn sanitize_stream<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    keys: &[KeyRules<String>],
    line_buffered: bool,
    pretty: bool,
) -> Result<Vec<FieldChange>> {
    if !line_buffered {
        let mut input = String::new();
        reader.read_to_string(&mut input).context("Failed to read input")?;
        let mut document: serde_json::Value = serde_json::from_str(&input).context("Input is not valid JSON")?;
        let changes = sanitize_document(&mut document, keys)?;
        let output = if pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        writeln!(writer, "{}", output)?;
        return Ok(changes);
    }

    let mut changes = Vec::new();
    let mut offset = 0;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read input line")?;
        if line.trim().is_empty() {
            writeln!(writer)?;
            writer.flush()?;
            continue;
        }
        let mut document: serde_json::Value = serde_json::from_str(&line)
            .with_context(|| format!("Line {} is not valid JSON", line_no + 1))?;
        let records = match &document {
            serde_json::Value::Array(items) => items.len(),
            _ => 1,
        };
        let line_changes = sanitize_document(&mut document, keys)
            .with_context(|| format!("Failed to sanitize line {}", line_no + 1))?;
        changes.extend(line_changes.into_iter().map(|mut c| {
            c.record += offset;
            c
        }));
        offset += records;

        writeln!(writer, "{}", serde_json::to_string(&document)?)?;
        writer.flush()?;
    }
    Ok(changes)
}
