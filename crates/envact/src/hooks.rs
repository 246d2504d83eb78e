// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

//! Discovery of activation and deactivation hook scripts.
//!
//! Hooks live under well-known directories inside an environment prefix and
//! are sourced by the calling shell from the emitted snippet. Discovery is
//! best-effort: a missing or unreadable directory yields no hooks and a
//! warning, never an error, so a broken hook tree cannot block activation.

use std::path::{Path, PathBuf};

use crate::shell::ShellFlavor;
use crate::{ACTIVATE_HOOKS_DIR, DEACTIVATE_HOOKS_DIR};

#[cfg(test)]
#[path = "./hooks_test.rs"]
mod hooks_test;

/// Hook scripts to source after activating the given prefix.
pub fn activate_scripts(prefix: &Path, flavor: ShellFlavor) -> Vec<PathBuf> {
    discover(&prefix.join(ACTIVATE_HOOKS_DIR), flavor)
}

/// Hook scripts to source before deactivating the given prefix.
pub fn deactivate_scripts(prefix: &Path, flavor: ShellFlavor) -> Vec<PathBuf> {
    discover(&prefix.join(DEACTIVATE_HOOKS_DIR), flavor)
}

/// List hook scripts with the dialect's extension, in lexical filename
/// order.
fn discover(dir: &Path, flavor: ShellFlavor) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(error) => {
            tracing::warn!(dir = %dir.display(), %error, "cannot read hook directory, skipping");
            return Vec::new();
        }
    };

    let extension = flavor.script_extension();
    let mut scripts: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(error) => {
                tracing::warn!(dir = %dir.display(), %error, "skipping unreadable hook entry");
                None
            }
        })
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
        })
        .collect();

    scripts.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));
    scripts
}
