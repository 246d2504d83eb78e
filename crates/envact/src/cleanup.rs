// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

//! Delimited-list cleanup for PATH-like environment values.
//!
//! All operations are pure string transforms: given identical inputs they
//! produce byte-identical output. A leading or trailing delimiter present in
//! the input survives into the output so the functions can be re-applied to
//! partially normalized values without drift.

use std::collections::HashSet;

#[cfg(test)]
#[path = "./cleanup_test.rs"]
mod cleanup_test;

/// How entries are selected for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupMode {
    /// Remove all duplicate entries, keeping the first occurrence in place.
    Duplicate,
    /// Remove the first entry matching any target.
    Remove,
    /// Remove every entry matching any target.
    Global,
}

/// Clean up a delimited list value.
///
/// In `Duplicate` mode no targets may be given; in `Remove` and `Global`
/// mode at least one target is required. With `fuzzy`, an entry matches a
/// target when it contains the target as a substring; the whole entry is
/// removed either way.
pub fn cleanup(
    list: &str,
    delimiter: char,
    mode: CleanupMode,
    targets: &[&str],
    fuzzy: bool,
) -> crate::Result<String> {
    match mode {
        CleanupMode::Duplicate if !targets.is_empty() => {
            return Err(crate::Error::MalformedArgument(
                "duplicate mode does not accept targets".to_string(),
            ));
        }
        CleanupMode::Remove | CleanupMode::Global if targets.is_empty() => {
            return Err(crate::Error::MalformedArgument(
                "remove and global modes require at least one target".to_string(),
            ));
        }
        _ => {}
    }

    if list.is_empty() {
        return Ok(String::new());
    }

    let core = list.strip_prefix(delimiter).unwrap_or(list);
    let leading = core.len() != list.len();
    let trimmed = core.strip_suffix(delimiter).unwrap_or(core);
    let trailing = trimmed.len() != core.len();

    let entries: Vec<&str> = trimmed.split(delimiter).collect();

    let kept: Vec<&str> = match mode {
        CleanupMode::Duplicate => {
            let mut seen = HashSet::new();
            entries
                .into_iter()
                .filter(|entry| seen.insert(*entry))
                .collect()
        }
        CleanupMode::Remove => {
            let mut removed = false;
            entries
                .into_iter()
                .filter(|entry| {
                    if !removed && matches_any(entry, targets, fuzzy) {
                        removed = true;
                        false
                    } else {
                        true
                    }
                })
                .collect()
        }
        CleanupMode::Global => entries
            .into_iter()
            .filter(|entry| !matches_any(entry, targets, fuzzy))
            .collect(),
    };

    let mut out = String::with_capacity(list.len());
    if leading {
        out.push(delimiter);
    }
    out.push_str(&kept.join(&delimiter.to_string()));
    if trailing {
        out.push(delimiter);
    }
    Ok(out)
}

fn matches_any(entry: &str, targets: &[&str], fuzzy: bool) -> bool {
    targets.iter().any(|target| {
        if fuzzy {
            entry.contains(target)
        } else {
            entry == *target
        }
    })
}
