//! Sanitize profiles: YAML-declared key/rule lists.
//!
//! A profile names flat keys and the catalog rules to run on them, optionally
//! wrapped in `when` entries. This module handles loading profiles from disk
//! or from the embedded default, validating them, merging an override onto a
//! base profile, and compiling them into [`KeyRules`] for [`crate::sanitize_json`].
//!
//! ```yaml
//! name: signup
//! version: "1"
//! keys:
//!   - key: email
//!     rules:
//!       - trim_space
//!       - to_email
//!       - when: true
//!         then: [to_sha256]
//! ```
//!
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog;
use crate::errors::PurifyError;
use crate::map::{key, KeyRules};
use crate::rule::{Rule, Rules};
use crate::when::when;

/// One entry of a rule list: a catalog rule name or a conditional block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    Named(String),
    When {
        when: bool,
        #[serde(default)]
        then: Vec<RuleSpec>,
        #[serde(default, rename = "else")]
        otherwise: Vec<RuleSpec>,
    },
}

/// The rules declared for one key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeySpec {
    pub key: String,
    pub rules: Vec<RuleSpec>,
}

/// The top-level profile document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SanitizeProfile {
    pub name: String,
    pub description: Option<String>,
    pub version: String,
    pub keys: Vec<KeySpec>,
}

impl SanitizeProfile {
    /// Parses and validates a profile from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, PurifyError> {
        let profile: SanitizeProfile =
            serde_yml::from_str(text).map_err(|e| PurifyError::Yaml(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    /// Loads a profile from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading sanitize profile from: {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile file {}", path.display()))?;
        let profile = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to load profile file {}", path.display()))?;
        info!("Loaded profile '{}' with {} keys.", profile.name, profile.keys.len());
        Ok(profile)
    }

    /// Loads the profile embedded in the library.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default profile from embedded string...");
        let default_yaml = include_str!("../config/default_profile.yaml");
        let profile = Self::from_yaml_str(default_yaml).context("Failed to parse default profile")?;
        debug!("Loaded default profile with {} keys.", profile.keys.len());
        Ok(profile)
    }

    /// Checks the profile's integrity, reporting every problem at once.
    pub fn validate(&self) -> Result<(), PurifyError> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        if self.name.trim().is_empty() {
            errors.push("The profile has an empty `name` field.".to_string());
        }
        if self.version.trim().is_empty() {
            errors.push(format!("Profile '{}': 'version' field cannot be empty.", self.name));
        }

        for spec in &self.keys {
            if spec.key.is_empty() {
                errors.push("A key entry has an empty `key` field.".to_string());
            } else if !seen.insert(spec.key.as_str()) {
                errors.push(format!("Duplicate key found: '{}'.", spec.key));
            }
            collect_unknown_rules(&spec.key, &spec.rules, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PurifyError::InvalidProfile(errors.join("\n")))
        }
    }

    /// Builds the key declarations for this profile, in profile order.
    pub fn compile(&self) -> Result<Vec<KeyRules<String>>, PurifyError> {
        self.keys
            .iter()
            .map(|spec| Ok(key(spec.key.clone(), compile_specs(&spec.rules)?)))
            .collect()
    }
}

fn collect_unknown_rules(key: &str, specs: &[RuleSpec], errors: &mut Vec<String>) {
    for spec in specs {
        match spec {
            RuleSpec::Named(name) => {
                if catalog::lookup(name).is_none() {
                    errors.push(format!("Key '{}' references unknown rule '{}'.", key, name));
                }
            }
            RuleSpec::When { then, otherwise, .. } => {
                collect_unknown_rules(key, then, errors);
                collect_unknown_rules(key, otherwise, errors);
            }
        }
    }
}

fn compile_specs(specs: &[RuleSpec]) -> Result<Rules, PurifyError> {
    let mut rules: Rules = Vec::with_capacity(specs.len());
    for spec in specs {
        let rule: Box<dyn Rule> = match spec {
            RuleSpec::Named(name) => {
                Box::new(catalog::lookup(name).ok_or_else(|| PurifyError::UnknownRule(name.clone()))?)
            }
            RuleSpec::When { when: condition, then, otherwise } => {
                Box::new(when(*condition, compile_specs(then)?).otherwise(compile_specs(otherwise)?))
            }
        };
        rules.push(rule);
    }
    Ok(rules)
}

/// Merges an override profile onto a base profile.
///
/// Override entries replace base entries with the same key in place; keys the
/// base does not know are appended in override order. Non-empty override
/// metadata wins.
pub fn merge_profiles(base: SanitizeProfile, user: Option<SanitizeProfile>) -> SanitizeProfile {
    let Some(user) = user else {
        debug!("No override profile; using '{}' as-is.", base.name);
        return base;
    };
    debug!("Merging {} override keys onto profile '{}'.", user.keys.len(), base.name);

    let mut merged = base;
    let positions: HashMap<String, usize> = merged
        .keys
        .iter()
        .enumerate()
        .map(|(i, spec)| (spec.key.clone(), i))
        .collect();

    for spec in user.keys {
        match positions.get(&spec.key) {
            Some(&i) => merged.keys[i] = spec,
            None => merged.keys.push(spec),
        }
    }

    if !user.name.trim().is_empty() {
        merged.name = user.name;
    }
    if !user.version.trim().is_empty() {
        merged.version = user.version;
    }
    if user.description.is_some() {
        merged.description = user.description;
    }

    debug!("Final key count after merge: {}", merged.keys.len());
    merged
}

/// Directories searched for named profiles, in priority order.
pub fn profile_search_dirs() -> Vec<PathBuf> {
    [
        dirs::home_dir().map(|p| p.join(".purify").join("profiles")),
        dirs::config_dir().map(|p| p.join("purify").join("profiles")),
        Some(PathBuf::from("/etc/purify/profiles")),
        Some(PathBuf::from("./config")),
        Some(PathBuf::from("../config")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub fn profile_candidate_paths(name: &str) -> Vec<PathBuf> {
    profile_search_dirs()
        .into_iter()
        .flat_map(|dir| [dir.join(format!("{}.yaml", name)), dir.join(format!("{}.yml", name))])
        .collect()
}

/// Lists the profile files present in the search directories as `(name, path)`.
///
/// A name found in several directories is reported once, from the first one.
pub fn list_profiles() -> Vec<(String, PathBuf)> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    for dir in profile_search_dirs() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && matches!(p.extension().and_then(|e| e.to_str()), Some("yaml" | "yml")))
            .collect();
        paths.sort();
        for path in paths {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            if seen.insert(stem.clone()) {
                found.push((stem, path));
            }
        }
    }
    debug!("Found {} profiles in search directories.", found.len());
    found
}

/// Loads a profile from a file path, or by name from the candidate directories.
pub fn load_profile_by_name(name_or_path: &str) -> Result<SanitizeProfile> {
    debug!("Attempting to load profile from: '{}'", name_or_path);

    let path = Path::new(name_or_path);
    let path_to_load = if path.is_file() {
        debug!("Input is a valid file path. Loading directly from: {}", path.display());
        Some(path.to_path_buf())
    } else {
        profile_candidate_paths(name_or_path).into_iter().find(|p| p.is_file())
    }
    .with_context(|| {
        format!(
            "Profile '{}' not found. It is not a valid file path, and was not found in expected locations.",
            name_or_path
        )
    })?;

    SanitizeProfile::load_from_file(&path_to_load)
}
