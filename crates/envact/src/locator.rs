// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

//! Resolution of environment references to filesystem prefixes.
//!
//! The engine treats the environment store as an opaque collaborator behind
//! the [`EnvLocator`] trait; [`DirsLocator`] is the shipped implementation
//! that resolves named environments out of configured directories.

use std::path::{Path, PathBuf};

use crate::config::Config;

#[cfg(test)]
#[path = "./locator_test.rs"]
mod locator_test;

/// Reserved names for the base environment.
pub const ROOT_ENV_NAMES: [&str; 2] = ["root", "base"];

/// A reference containing a path separator is an explicit prefix, not an
/// environment name.
pub(crate) fn is_path_ref(env_ref: &str) -> bool {
    env_ref.contains(['/', '\\'])
}

/// Resolves environment references for the activation engine.
pub trait EnvLocator {
    /// Confirm the reference names a usable environment without resolving
    /// anything else. Must not mutate any state.
    fn check_env(&self, env_ref: &str) -> crate::Result<()> {
        self.resolve_prefix(env_ref).map(|_| ())
    }

    /// Absolute prefix of the referenced environment.
    fn resolve_prefix(&self, env_ref: &str) -> crate::Result<PathBuf>;

    /// Binary directory of the referenced environment.
    fn resolve_bin_dir(&self, env_ref: &str) -> crate::Result<PathBuf> {
        Ok(self.bin_dir_for_prefix(&self.resolve_prefix(env_ref)?))
    }

    /// Binary directory for an already-resolved prefix. Used on deactivation,
    /// where the environment may no longer exist on disk.
    fn bin_dir_for_prefix(&self, prefix: &Path) -> PathBuf {
        prefix.join("bin")
    }
}

/// Directory-based environment store.
///
/// Named environments live directly under one of `envs_dirs`; `root` and
/// `base` refer to the root prefix; references containing a path separator
/// are treated as explicit prefixes.
#[derive(Debug, Clone)]
pub struct DirsLocator {
    pub root_prefix: PathBuf,
    pub envs_dirs: Vec<PathBuf>,
    pub windows_layout: bool,
}

impl DirsLocator {
    pub fn from_config(config: &Config) -> Self {
        Self {
            root_prefix: config.resolved_root_prefix(),
            envs_dirs: config.resolved_envs_dirs(),
            windows_layout: config.windows_layout,
        }
    }

    fn resolve_path_ref(&self, env_ref: &str) -> crate::Result<PathBuf> {
        let expanded = if let Some(rest) = env_ref.strip_prefix("~/") {
            match dirs::home_dir() {
                Some(home) => home.join(rest),
                None => PathBuf::from(env_ref),
            }
        } else {
            PathBuf::from(env_ref)
        };
        let canonical = dunce::canonicalize(&expanded).map_err(|_| {
            crate::Error::EnvironmentNotFound {
                reference: env_ref.to_string(),
                searched: Vec::new(),
            }
        })?;
        if canonical.is_dir() {
            Ok(canonical)
        } else {
            Err(crate::Error::EnvironmentNotFound {
                reference: env_ref.to_string(),
                searched: Vec::new(),
            })
        }
    }
}

impl EnvLocator for DirsLocator {
    fn resolve_prefix(&self, env_ref: &str) -> crate::Result<PathBuf> {
        if is_path_ref(env_ref) {
            return self.resolve_path_ref(env_ref);
        }
        if ROOT_ENV_NAMES.contains(&env_ref.to_ascii_lowercase().as_str()) {
            return Ok(self.root_prefix.clone());
        }
        for dir in &self.envs_dirs {
            let candidate = dir.join(env_ref);
            if candidate.is_dir() {
                return Ok(dunce::canonicalize(&candidate).unwrap_or(candidate));
            }
        }
        Err(crate::Error::EnvironmentNotFound {
            reference: env_ref.to_string(),
            searched: self.envs_dirs.clone(),
        })
    }

    fn bin_dir_for_prefix(&self, prefix: &Path) -> PathBuf {
        if self.windows_layout {
            prefix.join("Scripts")
        } else {
            prefix.join("bin")
        }
    }
}
