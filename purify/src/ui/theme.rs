//! Module for managing the CLI color theme.
//!
//! Users may customize the foreground color of each output element with a
//! YAML file mapping theme entries to 16-color ANSI names. Entries missing
//! from a custom theme fall back to white.

use anyhow::{Context, Result};
use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Type alias for the theme map, providing a consistent type definition.
pub type ThemeMap = HashMap<ThemeEntry, ThemeStyle>;

/// The different logical parts of the output that can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeEntry {
    /// Style for prominent headers or section titles.
    Header,
    /// Style for successful operation messages.
    Success,
    /// Style for general informational messages.
    Info,
    /// Style for warning messages.
    Warn,
    /// Style for error messages.
    Error,
    /// Style for a key name in the change summary.
    SummaryKey,
    /// Style for the value before sanitization.
    SummaryBefore,
    /// Style for the value after sanitization.
    SummaryAfter,
    /// Style for rule names in listings.
    RuleName,
}

impl ThemeEntry {
    pub const ALL: [ThemeEntry; 9] = [
        ThemeEntry::Header,
        ThemeEntry::Success,
        ThemeEntry::Info,
        ThemeEntry::Warn,
        ThemeEntry::Error,
        ThemeEntry::SummaryKey,
        ThemeEntry::SummaryBefore,
        ThemeEntry::SummaryAfter,
        ThemeEntry::RuleName,
    ];
}

/// Represents an ANSI color that can be used in the theme.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ThemeColor {
    /// A named ANSI color (e.g., "red", "brightgreen").
    Named(String),
}

/// Error type for parsing an invalid `ThemeColor` string.
#[derive(Debug, Clone)]
pub struct ParseThemeColorError;

impl fmt::Display for ParseThemeColorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Invalid theme color; expected one of: black, red, green, yellow, blue, \
            magenta, cyan, white, brightblack, brightred, brightgreen, brightyellow, \
            brightblue, brightmagenta, brightcyan, brightwhite."
        )
    }
}

impl std::error::Error for ParseThemeColorError {}

impl FromStr for ThemeColor {
    type Err = ParseThemeColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "black" | "red" | "green" | "yellow" | "blue" | "magenta" | "cyan" | "white" | "brightblack"
            | "brightred" | "brightgreen" | "brightyellow" | "brightblue" | "brightmagenta" | "brightcyan"
            | "brightwhite" => Ok(ThemeColor::Named(lower)),
            _ => Err(ParseThemeColorError),
        }
    }
}

impl ThemeColor {
    fn named(name: &str) -> Self {
        ThemeColor::Named(name.to_string())
    }

    /// Converts the color name into its `owo_colors::AnsiColors` value.
    pub fn to_ansi_color(&self) -> AnsiColors {
        match self {
            ThemeColor::Named(name) => match name.as_str() {
                "black" => AnsiColors::Black,
                "red" => AnsiColors::Red,
                "green" => AnsiColors::Green,
                "yellow" => AnsiColors::Yellow,
                "blue" => AnsiColors::Blue,
                "magenta" => AnsiColors::Magenta,
                "cyan" => AnsiColors::Cyan,
                "white" => AnsiColors::White,
                "brightblack" => AnsiColors::BrightBlack,
                "brightred" => AnsiColors::BrightRed,
                "brightgreen" => AnsiColors::BrightGreen,
                "brightyellow" => AnsiColors::BrightYellow,
                "brightblue" => AnsiColors::BrightBlue,
                "brightmagenta" => AnsiColors::BrightMagenta,
                "brightcyan" => AnsiColors::BrightCyan,
                "brightwhite" => AnsiColors::BrightWhite,
                _ => AnsiColors::White,
            },
        }
    }
}

/// Represents the style configuration for a specific `ThemeEntry`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeStyle {
    /// An optional `ThemeColor` to apply as the foreground color.
    pub fg: Option<ThemeColor>,
}

/// Loads a theme configuration from a YAML file or returns the default theme.
pub fn build_theme_map(theme_path: Option<&PathBuf>) -> Result<ThemeMap> {
    if let Some(path) = theme_path {
        ThemeStyle::load_from_file(path)
    } else {
        Ok(ThemeStyle::default_theme_map())
    }
}

/// The foreground color configured for `entry`, if any.
pub fn color_for(entry: ThemeEntry, theme: &ThemeMap) -> Option<AnsiColors> {
    theme.get(&entry).and_then(|s| s.fg.as_ref()).map(ThemeColor::to_ansi_color)
}

impl ThemeStyle {
    /// Loads a theme configuration from a YAML file on disk, filling in missing entries.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ThemeMap> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let mut custom: ThemeMap = serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse theme file {}", path.display()))?;

        for entry in ThemeEntry::ALL {
            custom.entry(entry).or_insert_with(|| ThemeStyle { fg: Some(ThemeColor::named("white")) });
        }
        Ok(custom)
    }

    /// Returns a default theme map with predefined color mappings.
    pub fn default_theme_map() -> ThemeMap {
        let mut default_theme = HashMap::new();
        default_theme.insert(ThemeEntry::Header, ThemeStyle { fg: Some(ThemeColor::named("brightcyan")) });
        default_theme.insert(ThemeEntry::Success, ThemeStyle { fg: Some(ThemeColor::named("green")) });
        default_theme.insert(ThemeEntry::Warn, ThemeStyle { fg: Some(ThemeColor::named("yellow")) });
        default_theme.insert(ThemeEntry::Error, ThemeStyle { fg: Some(ThemeColor::named("red")) });
        default_theme.insert(ThemeEntry::SummaryKey, ThemeStyle { fg: Some(ThemeColor::named("cyan")) });
        default_theme.insert(ThemeEntry::SummaryBefore, ThemeStyle { fg: Some(ThemeColor::named("red")) });
        default_theme.insert(ThemeEntry::SummaryAfter, ThemeStyle { fg: Some(ThemeColor::named("green")) });
        default_theme.insert(ThemeEntry::RuleName, ThemeStyle { fg: Some(ThemeColor::named("magenta")) });

        for entry in ThemeEntry::ALL {
            default_theme.entry(entry).or_insert_with(|| ThemeStyle { fg: Some(ThemeColor::named("white")) });
        }
        default_theme
    }
}
