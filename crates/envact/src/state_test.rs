// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;

use super::*;

#[rstest]
fn test_capture_inactive_session() {
    let mut table = EnvTable::new();
    table.set("PATH", "/usr/bin:/bin");
    table.set("PS1", "$ ");

    let state = EnvironmentState::capture(&table, ShellFlavor::Bash);
    assert!(!state.is_active());
    assert_eq!(state.stack_depth, 0);
    assert_eq!(state.prefix, None);
    assert_eq!(state.path_entries, vec!["/usr/bin", "/bin"]);
    assert_eq!(state.prompt.as_deref(), Some("$ "));
    assert_eq!(state.prompt_backup, None);
}

#[rstest]
fn test_capture_active_session() {
    let mut table = EnvTable::new();
    table.set("PATH", "/envs/dev/bin:/usr/bin");
    table.set("ENVACT_PREFIX", "/envs/dev");
    table.set("ENVACT_DEFAULT_ENV", "dev");
    table.set("ENVACT_SHLVL", "1");
    table.set("ENVACT_PROMPT_BACKUP", "$ ");
    table.set("PS1", "(dev) $ ");

    let state = EnvironmentState::capture(&table, ShellFlavor::Bash);
    assert!(state.is_active());
    assert_eq!(state.prefix, Some(PathBuf::from("/envs/dev")));
    assert_eq!(state.default_env.as_deref(), Some("dev"));
    assert_eq!(state.prompt_backup.as_deref(), Some("$ "));
}

#[rstest]
fn test_capture_normalizes_prefix_without_depth() {
    let mut table = EnvTable::new();
    table.set("ENVACT_PREFIX", "/envs/dev");

    let state = EnvironmentState::capture(&table, ShellFlavor::Bash);
    assert!(state.is_active());
    assert_eq!(state.stack_depth, 1);
}

#[rstest]
fn test_capture_normalizes_depth_without_prefix() {
    let mut table = EnvTable::new();
    table.set("ENVACT_SHLVL", "2");

    let state = EnvironmentState::capture(&table, ShellFlavor::Bash);
    assert!(!state.is_active());
    assert_eq!(state.stack_depth, 0);
}

#[rstest]
fn test_capture_garbage_depth_defaults_to_zero() {
    let mut table = EnvTable::new();
    table.set("ENVACT_SHLVL", "not-a-number");

    let state = EnvironmentState::capture(&table, ShellFlavor::Bash);
    assert_eq!(state.stack_depth, 0);
}

#[rstest]
fn test_path_round_trip_preserves_bytes() {
    let mut table = EnvTable::new();
    // Trailing delimiter and an embedded empty entry must survive.
    table.set("PATH", "/usr/bin::/bin:");

    let state = EnvironmentState::capture(&table, ShellFlavor::Bash);
    assert_eq!(state.path_string(ShellFlavor::Bash), "/usr/bin::/bin:");
}

#[rstest]
fn test_windows_delimiter_split() {
    let mut table = EnvTable::new();
    table.set("PATH", r"C:\env\Scripts;C:\Windows");

    let state = EnvironmentState::capture(&table, ShellFlavor::Cmd);
    assert_eq!(state.path_entries, vec![r"C:\env\Scripts", r"C:\Windows"]);
}

#[rstest]
fn test_csh_prompt_variable() {
    let mut table = EnvTable::new();
    table.set("prompt", "% ");

    let state = EnvironmentState::capture(&table, ShellFlavor::Tcsh);
    assert_eq!(state.prompt.as_deref(), Some("% "));
}

#[rstest]
fn test_empty_path_captures_no_entries() {
    let mut table = EnvTable::new();
    table.set("PATH", "");

    let state = EnvironmentState::capture(&table, ShellFlavor::Bash);
    assert!(state.path_entries.is_empty());
    assert_eq!(state.path_string(ShellFlavor::Bash), "");
}

#[rstest]
fn test_set_path_from_joined_value() {
    let mut state = EnvironmentState::default();
    state.set_path_from("/a:/b", ShellFlavor::Bash);
    assert_eq!(state.path_entries, vec!["/a", "/b"]);
    state.set_path_from("", ShellFlavor::Bash);
    assert!(state.path_entries.is_empty());
}

#[rstest]
fn test_env_table_truthy_values() {
    let mut table = EnvTable::new();
    table.set("A", "1");
    table.set("B", "yes");
    table.set("C", "0");
    assert!(table.is_truthy("A"));
    assert!(table.is_truthy("B"));
    assert!(!table.is_truthy("C"));
    assert!(!table.is_truthy("MISSING"));
}
