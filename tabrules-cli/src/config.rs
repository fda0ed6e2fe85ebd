//! Configuration file handling for the tabrules CLI.
//!
//! A `tabrules.toml` document holds the persisted ruleset format and the
//! route table the core treats as opaque external collaborators: a named
//! map from ruleset identifier to an ordered list of rule-source strings,
//! plus a priority-ordered list of filename-routing patterns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

fn default_config_file_name() -> String {
    "tabrules.toml".to_string()
}

/// One filename-routing rule: a regex searched against the base file name,
/// naming the ruleset to apply when it matches. Routes are tried in
/// descending priority order; the first match wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteConfig {
    pub pattern: String,
    pub ruleset: String,
    #[serde(default = "default_priority")]
    pub priority: i32,
}

fn default_priority() -> i32 {
    10
}

/// Top-level tabrules configuration, loaded from a TOML document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub routes: Vec<RouteConfig>,

    /// Ruleset identifier to its ordered rule-source lines.
    #[serde(default)]
    pub rulesets: BTreeMap<String, Vec<String>>,

    #[serde(default = "default_config_file_name")]
    pub config_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            rulesets: BTreeMap::new(),
            config_file_name: default_config_file_name(),
        }
    }
}

impl Config {
    /// Loads configuration by searching, in order: the current directory,
    /// the user's home directory, then the platform config directory.
    /// Returns the default (empty) configuration if none is found.
    pub fn load() -> Result<Config> {
        match find_config_file()? {
            Some(path) => Config::load_from_path(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CliError::FileOperation(format!("reading {}: {e}", path.display())))?;
        let config: Config = toml::from_str(&text)?;
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("serializing config: {e}")))?;
        std::fs::write(path, text)
            .map_err(|e| CliError::FileOperation(format!("writing {}: {e}", path.display())))?;
        Ok(())
    }

    /// Routes a file name against the configured routes, descending by
    /// priority, and returns the first match's ruleset identifier and
    /// named-capture metadata.
    pub fn route(&self, file_name: &str) -> Option<(String, BTreeMap<String, String>)> {
        let mut candidates: Vec<&RouteConfig> = self.routes.iter().collect();
        candidates.sort_by(|a, b| b.priority.cmp(&a.priority));

        for route in candidates {
            let Ok(re) = regex::Regex::new(&route.pattern) else {
                continue;
            };
            if let Some(captures) = re.captures(file_name) {
                let metadata = re
                    .capture_names()
                    .flatten()
                    .filter_map(|name| {
                        captures
                            .name(name)
                            .map(|m| (name.to_string(), m.as_str().to_string()))
                    })
                    .collect();
                return Some((route.ruleset.clone(), metadata));
            }
        }
        None
    }

    pub fn ruleset_source(&self, name: &str) -> Result<String> {
        self.rulesets
            .get(name)
            .map(|lines| lines.join("\n"))
            .ok_or_else(|| CliError::UnknownRuleset(name.to_string()))
    }
}

fn find_config_file() -> Result<Option<PathBuf>> {
    let name = default_config_file_name();

    let cwd_candidate = PathBuf::from(&name);
    if cwd_candidate.exists() {
        return Ok(Some(cwd_candidate));
    }

    if let Some(home) = dirs::home_dir() {
        let candidate = home.join(format!(".{name}"));
        if candidate.exists() {
            return Ok(Some(candidate));
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let candidate = config_dir.join("tabrules").join(&name);
        if candidate.exists() {
            return Ok(Some(candidate));
        }
    }

    Ok(None)
}
