// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

//! User configuration for envact.
//!
//! Loaded from `~/.config/envact/config.yaml` when present, with
//! environment-variable overrides applied on top. Everything has a usable
//! default so a missing config file is not an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::state::EnvTable;

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

/// Config file location under the user config directory.
const CONFIG_FILE: &str = "envact/config.yaml";

/// Environment variable overriding `change_prompt`.
pub const CHANGE_PROMPT_VAR: &str = "ENVACT_CHANGE_PROMPT";
/// Environment variable overriding `root_prefix`.
pub const ROOT_PREFIX_VAR: &str = "ENVACT_ROOT_PREFIX";
/// Environment variable overriding `envs_dirs` (delimited like PATH).
pub const ENVS_DIRS_VAR: &str = "ENVACT_ENVS_DIRS";

/// User-facing settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Decorate the shell prompt with the active environment name.
    #[serde(default = "default_change_prompt")]
    pub change_prompt: bool,

    /// Root (base) environment prefix. Defaults to `~/.envact`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_prefix: Option<PathBuf>,

    /// Directories searched for named environments.
    /// Defaults to `<root_prefix>/envs`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub envs_dirs: Vec<PathBuf>,

    /// Use the Windows environment layout (`Scripts` instead of `bin`).
    #[serde(default = "default_windows_layout")]
    pub windows_layout: bool,
}

fn default_change_prompt() -> bool {
    true
}

fn default_windows_layout() -> bool {
    cfg!(windows)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            change_prompt: default_change_prompt(),
            root_prefix: None,
            envs_dirs: Vec::new(),
            windows_layout: default_windows_layout(),
        }
    }
}

impl Config {
    /// Parse config from YAML string.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        serde_yaml::from_str(yaml).map_err(|error| crate::Error::InvalidConfig { error })
    }

    /// Load config from the user config directory and apply environment
    /// overrides from the given table.
    pub fn load(table: &EnvTable) -> crate::Result<Self> {
        let mut config = match dirs::config_dir().map(|dir| dir.join(CONFIG_FILE)) {
            Some(path) if path.is_file() => Self::load_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides(table);
        Ok(config)
    }

    /// Load config from a specific file path.
    pub fn load_file(path: &Path) -> crate::Result<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|error| crate::Error::ReadFailed {
            path: path.to_path_buf(),
            error,
        })?;
        Self::from_yaml(&yaml)
    }

    /// Environment variables win over the config file.
    pub fn apply_env_overrides(&mut self, table: &EnvTable) {
        if table.get(CHANGE_PROMPT_VAR).is_some() {
            self.change_prompt = table.is_truthy(CHANGE_PROMPT_VAR);
        }
        if let Some(root) = table.get(ROOT_PREFIX_VAR).filter(|value| !value.is_empty()) {
            self.root_prefix = Some(PathBuf::from(root));
        }
        if let Some(dirs) = table.get(ENVS_DIRS_VAR).filter(|value| !value.is_empty()) {
            let delimiter = if cfg!(windows) { ';' } else { ':' };
            self.envs_dirs = dirs.split(delimiter).map(PathBuf::from).collect();
        }
    }

    /// Root prefix with the default applied.
    pub fn resolved_root_prefix(&self) -> PathBuf {
        self.root_prefix.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".envact")
        })
    }

    /// Environment search directories with the default applied.
    pub fn resolved_envs_dirs(&self) -> Vec<PathBuf> {
        if self.envs_dirs.is_empty() {
            vec![self.resolved_root_prefix().join("envs")]
        } else {
            self.envs_dirs.clone()
        }
    }
}
