// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

//! The activation state machine.
//!
//! All activate/deactivate/reactivate control logic lives here, independent
//! of shell dialect. Each operation mutates an [`EnvironmentState`] in place
//! and returns the ordered [`EnvOp`] list that, once rendered by the
//! emitter and evaluated by the calling shell, brings the live session to
//! the same state.
//!
//! Validation is all-or-nothing: every precondition is resolved before the
//! first mutation, so a failed activation leaves both the state record and
//! the emitted surface untouched. Once mutation begins the sequence runs to
//! completion; hook discovery problems are logged, never raised.

use std::path::PathBuf;

use crate::cleanup::{CleanupMode, cleanup};
use crate::config::Config;
use crate::hooks;
use crate::locator::{EnvLocator, is_path_ref};
use crate::shell::ShellFlavor;
use crate::state::EnvironmentState;
use crate::{DEFAULT_ENV_VAR, PATH_VAR, PREFIX_VAR, PROMPT_BACKUP_VAR, STACK_DEPTH_VAR};

#[cfg(test)]
#[path = "./engine_test.rs"]
mod engine_test;

/// One serialized state change, rendered per dialect by the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvOp {
    /// Export an environment variable.
    Export { name: String, value: String },
    /// Remove an environment variable.
    Unset { name: String },
    /// Rewrite the dialect's prompt variable.
    SetPrompt { value: String },
    /// Source a hook script.
    RunScript { path: PathBuf },
    /// Invalidate the shell's executable-lookup cache.
    Rehash,
}

/// The shell-independent activation engine.
pub struct Engine<'a> {
    locator: &'a dyn EnvLocator,
    config: &'a Config,
    flavor: ShellFlavor,
}

impl<'a> Engine<'a> {
    pub fn new(locator: &'a dyn EnvLocator, config: &'a Config, flavor: ShellFlavor) -> Self {
        Self {
            locator,
            config,
            flavor,
        }
    }

    /// Activate the referenced environment.
    ///
    /// When an environment is already active it is popped first, so
    /// stacking is pop-then-push and repeated activations cannot
    /// accumulate stale path entries.
    pub fn activate(
        &self,
        state: &mut EnvironmentState,
        env_ref: &str,
    ) -> crate::Result<Vec<EnvOp>> {
        self.activate_impl(state, env_ref, None)
    }

    /// Deactivate the current environment. A no-op success when nothing is
    /// active.
    pub fn deactivate(&self, state: &mut EnvironmentState) -> crate::Result<Vec<EnvOp>> {
        if !state.is_active() {
            tracing::debug!("no active environment, deactivate is a no-op");
            return Ok(Vec::new());
        }
        self.pop(state)
    }

    /// Refresh the current environment after an external mutation, keeping
    /// its logical identity. Equivalent to deactivate-then-activate of the
    /// current prefix; a no-op when nothing is active.
    pub fn reactivate(&self, state: &mut EnvironmentState) -> crate::Result<Vec<EnvOp>> {
        let Some(prefix) = state.prefix.clone() else {
            tracing::debug!("no active environment, reactivate is a no-op");
            return Ok(Vec::new());
        };
        let display = state.default_env.clone();
        self.activate_impl(state, &prefix.display().to_string(), display)
    }

    fn activate_impl(
        &self,
        state: &mut EnvironmentState,
        env_ref: &str,
        display_override: Option<String>,
    ) -> crate::Result<Vec<EnvOp>> {
        // Resolve every precondition before touching the state record.
        self.locator.check_env(env_ref)?;
        let prefix = self.locator.resolve_prefix(env_ref)?;
        let bin_dir = self.locator.resolve_bin_dir(env_ref)?;

        let mut ops = Vec::new();
        if state.is_active() {
            ops.extend(self.pop(state)?);
        }

        // Named `display_name` rather than `display` because the tracing
        // macros import `tracing::field::display`, which shadows a caller
        // local of the same name inside the macro expansion.
        let display_name = display_override.unwrap_or_else(|| {
            if is_path_ref(env_ref) {
                prefix.display().to_string()
            } else {
                env_ref.to_string()
            }
        });

        // Prepend, never append: later directories must not shadow the
        // environment's binaries.
        state
            .path_entries
            .insert(0, bin_dir.display().to_string());
        ops.push(EnvOp::Export {
            name: PATH_VAR.to_string(),
            value: state.path_string(self.flavor),
        });

        state.prefix = Some(prefix.clone());
        ops.push(EnvOp::Export {
            name: PREFIX_VAR.to_string(),
            value: prefix.display().to_string(),
        });

        state.default_env = Some(display_name.clone());
        ops.push(EnvOp::Export {
            name: DEFAULT_ENV_VAR.to_string(),
            value: display_name.clone(),
        });

        if self.config.change_prompt {
            if let Some(current) = state.prompt.clone() {
                state.prompt_backup = Some(current.clone());
                ops.push(EnvOp::Export {
                    name: PROMPT_BACKUP_VAR.to_string(),
                    value: current.clone(),
                });
                let decorated = format!("({display_name}) {current}");
                state.prompt = Some(decorated.clone());
                ops.push(EnvOp::SetPrompt { value: decorated });
            }
        }

        state.stack_depth += 1;
        ops.push(EnvOp::Export {
            name: STACK_DEPTH_VAR.to_string(),
            value: state.stack_depth.to_string(),
        });

        for path in hooks::activate_scripts(&prefix, self.flavor) {
            ops.push(EnvOp::RunScript { path });
        }
        ops.push(EnvOp::Rehash);

        tracing::info!(environment = %display_name, "activated");
        Ok(ops)
    }

    /// Strip the active environment's contribution: the exact reverse of
    /// the most recent push.
    fn pop(&self, state: &mut EnvironmentState) -> crate::Result<Vec<EnvOp>> {
        let Some(prefix) = state.prefix.clone() else {
            return Ok(Vec::new());
        };
        let mut ops = Vec::new();

        for path in hooks::deactivate_scripts(&prefix, self.flavor) {
            ops.push(EnvOp::RunScript { path });
        }

        if let Some(backup) = state.prompt_backup.take() {
            state.prompt = Some(backup.clone());
            ops.push(EnvOp::SetPrompt { value: backup });
            ops.push(EnvOp::Unset {
                name: PROMPT_BACKUP_VAR.to_string(),
            });
        }

        // Remove exactly the entry added by the matching push: first match
        // only, fuzzy to tolerate trailing-slash differences.
        let bin_dir = self.locator.bin_dir_for_prefix(&prefix).display().to_string();
        let joined = state.path_string(self.flavor);
        let cleaned = cleanup(
            &joined,
            self.flavor.path_delimiter(),
            CleanupMode::Remove,
            &[bin_dir.as_str()],
            true,
        )?;
        state.set_path_from(&cleaned, self.flavor);
        ops.push(EnvOp::Export {
            name: PATH_VAR.to_string(),
            value: cleaned,
        });

        state.prefix = None;
        ops.push(EnvOp::Unset {
            name: PREFIX_VAR.to_string(),
        });
        state.default_env = None;
        ops.push(EnvOp::Unset {
            name: DEFAULT_ENV_VAR.to_string(),
        });

        state.stack_depth = state.stack_depth.saturating_sub(1);
        ops.push(EnvOp::Export {
            name: STACK_DEPTH_VAR.to_string(),
            value: state.stack_depth.to_string(),
        });
        ops.push(EnvOp::Rehash);

        tracing::info!(prefix = %prefix.display(), "deactivated");
        Ok(ops)
    }
}
