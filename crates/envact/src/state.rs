// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

//! Session state and the environment-variable table it is serialized in.
//!
//! The engine never touches ambient process globals: it reads an explicit
//! [`EnvTable`] snapshot into an [`EnvironmentState`], mutates that record,
//! and hands the serialized changes back as emitter operations. The only
//! place a live process environment is read is [`EnvTable::from_process`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::shell::ShellFlavor;
use crate::{DEFAULT_ENV_VAR, PATH_VAR, PREFIX_VAR, PROMPT_BACKUP_VAR, STACK_DEPTH_VAR};

#[cfg(test)]
#[path = "./state_test.rs"]
mod state_test;

/// An ordered snapshot of environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvTable {
    vars: BTreeMap<String, String>,
}

impl EnvTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the calling process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn set<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn unset(&mut self, name: &str) {
        self.vars.remove(name);
    }

    /// Interpret a variable as a boolean setting.
    pub fn is_truthy(&self, name: &str) -> bool {
        self.get(name)
            .is_some_and(|value| matches!(value, "1" | "true" | "yes" | "on"))
    }
}

/// The session-scoped activation record.
///
/// Created implicitly at shell-session start (depth 0) and destroyed with
/// the session; between those points it lives serialized in the session's
/// environment-variable table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentState {
    /// Absolute root of the active environment; `None` when inactive.
    pub prefix: Option<PathBuf>,
    /// Short display form of the active environment.
    pub default_env: Option<String>,
    /// Current search-path list, in order.
    pub path_entries: Vec<String>,
    /// Current value of the dialect's prompt variable, if any.
    pub prompt: Option<String>,
    /// Prompt snapshot taken at the most recent activation.
    pub prompt_backup: Option<String>,
    /// Count of nested activations; 0 means no environment is active.
    pub stack_depth: u32,
}

impl EnvironmentState {
    /// Deserialize session state from an environment table.
    ///
    /// The invariant `stack_depth == 0 ⇔ prefix empty` is enforced here: a
    /// table left inconsistent by an interrupted activation is normalized
    /// to the inactive side with a warning rather than rejected.
    pub fn capture(table: &EnvTable, flavor: ShellFlavor) -> Self {
        let prefix = table
            .get(PREFIX_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let mut stack_depth: u32 = table
            .get(STACK_DEPTH_VAR)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0);

        if prefix.is_some() && stack_depth == 0 {
            tracing::warn!("active prefix found with zero stack depth, assuming depth 1");
            stack_depth = 1;
        }
        let prefix = if stack_depth > 0 { prefix } else { None };
        if prefix.is_none() && stack_depth > 0 {
            tracing::warn!(stack_depth, "stack depth set without an active prefix, resetting to 0");
            stack_depth = 0;
        }

        let delimiter = flavor.path_delimiter();
        let path_entries = table
            .get(PATH_VAR)
            .filter(|value| !value.is_empty())
            .map(|value| value.split(delimiter).map(String::from).collect())
            .unwrap_or_default();

        Self {
            prefix,
            default_env: table.get(DEFAULT_ENV_VAR).map(String::from),
            path_entries,
            prompt: flavor.prompt_var().and_then(|var| table.get(var)).map(String::from),
            prompt_backup: table.get(PROMPT_BACKUP_VAR).map(String::from),
            stack_depth,
        }
    }

    pub fn is_active(&self) -> bool {
        self.stack_depth > 0
    }

    /// Join the path entries back into the dialect's list syntax.
    pub fn path_string(&self, flavor: ShellFlavor) -> String {
        self.path_entries.join(&flavor.path_delimiter().to_string())
    }

    /// Replace the path entries from a joined list value.
    pub fn set_path_from(&mut self, joined: &str, flavor: ShellFlavor) {
        self.path_entries = if joined.is_empty() {
            Vec::new()
        } else {
            joined
                .split(flavor.path_delimiter())
                .map(String::from)
                .collect()
        };
    }
}
