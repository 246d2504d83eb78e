// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use rstest::rstest;

use super::*;
use crate::state::EnvTable;

/// Fake process table built from an ancestry chain: the first pair is the
/// current process, each following pair is its parent.
struct FakeTable {
    current: u32,
    entries: HashMap<u32, ProcessEntry>,
}

impl FakeTable {
    fn new(chain: &[(u32, &str)]) -> Self {
        let mut entries = HashMap::new();
        for (index, (pid, command)) in chain.iter().enumerate() {
            let ppid = chain.get(index + 1).map(|(pid, _)| *pid).unwrap_or(1);
            entries.insert(
                *pid,
                ProcessEntry {
                    pid: *pid,
                    ppid,
                    command: command.to_string(),
                },
            );
        }
        Self {
            current: chain.first().map(|(pid, _)| *pid).unwrap_or(0),
            entries,
        }
    }
}

impl ProcessTable for FakeTable {
    fn current_pid(&self) -> u32 {
        self.current
    }

    fn lookup(&self, pid: u32) -> Option<ProcessEntry> {
        self.entries.get(&pid).cloned()
    }
}

#[rstest]
#[case("ZSH_VERSION", "5.9", ShellFlavor::Zsh)]
#[case("BASH_VERSION", "5.2.21(1)-release", ShellFlavor::Bash)]
#[case("XONSH_VERSION", "0.15.1", ShellFlavor::Xonsh)]
#[case("tcsh", "6.24.07", ShellFlavor::Tcsh)]
fn test_detect_from_environment_marker(
    #[case] marker: &str,
    #[case] value: &str,
    #[case] expected: ShellFlavor,
) {
    let mut env = EnvTable::new();
    env.set(marker, value);
    // Ancestry says bash, but the marker wins.
    let table = FakeTable::new(&[(100, "envact"), (50, "/usr/bin/bash")]);
    let flavor = detect(&env, &table, HostOs::Linux).expect("marker should classify the shell");
    assert_eq!(flavor, expected);
}

#[rstest]
#[case("/usr/bin/zsh", ShellFlavor::Zsh)]
#[case("-bash", ShellFlavor::Bash)]
#[case("/bin/tcsh -l", ShellFlavor::Tcsh)]
#[case(r"C:\Windows\System32\cmd.exe", ShellFlavor::Cmd)]
#[case("pwsh", ShellFlavor::Powershell)]
#[case("mksh", ShellFlavor::Ksh)]
fn test_detect_from_parent_command(#[case] command: &str, #[case] expected: ShellFlavor) {
    let env = EnvTable::new();
    let table = FakeTable::new(&[(100, "envact"), (50, command)]);
    let flavor = detect(&env, &table, HostOs::Linux).expect("ancestry should classify the shell");
    assert_eq!(flavor, expected);
}

#[rstest]
fn test_detect_walks_past_non_shell_ancestors() {
    let env = EnvTable::new();
    let table = FakeTable::new(&[
        (100, "envact"),
        (90, "/usr/bin/env"),
        (80, "make"),
        (70, "/usr/bin/zsh"),
    ]);
    let flavor = detect(&env, &table, HostOs::Linux).unwrap();
    assert_eq!(flavor, ShellFlavor::Zsh);
}

#[rstest]
#[case(HostOs::Linux, "/bin/sh", ShellFlavor::Dash)]
#[case(HostOs::Linux, "-sh", ShellFlavor::Bash)]
#[case(HostOs::MacOs, "/bin/sh", ShellFlavor::Bash)]
#[case(HostOs::OtherUnix, "/bin/sh", ShellFlavor::Ksh)]
fn test_ambiguous_sh_resolved_from_host_os(
    #[case] os: HostOs,
    #[case] command: &str,
    #[case] expected: ShellFlavor,
) {
    let env = EnvTable::new();
    let table = FakeTable::new(&[(100, "envact"), (50, command)]);
    let flavor = detect(&env, &table, os).unwrap();
    assert_eq!(flavor, expected);
}

#[rstest]
fn test_named_shell_preferred_over_earlier_sh_wrapper() {
    let env = EnvTable::new();
    let table = FakeTable::new(&[(100, "envact"), (90, "sh"), (80, "/usr/bin/tcsh")]);
    let flavor = detect(&env, &table, HostOs::Linux).unwrap();
    assert_eq!(flavor, ShellFlavor::Tcsh);
}

#[rstest]
fn test_unrecognized_ancestry_is_an_error() {
    let env = EnvTable::new();
    let table = FakeTable::new(&[(100, "envact"), (50, "systemd")]);
    let result = detect(&env, &table, HostOs::Linux);
    assert!(matches!(
        result,
        Err(crate::Error::UnrecognizedShell { .. })
    ));
}

#[rstest]
fn test_empty_process_table_is_an_error() {
    let env = EnvTable::new();
    let table = FakeTable::new(&[]);
    assert!(detect(&env, &table, HostOs::Linux).is_err());
}

#[rstest]
#[case("bash", ShellFlavor::Bash)]
#[case("POWERSHELL", ShellFlavor::Powershell)]
#[case("cmd.exe", ShellFlavor::Cmd)]
fn test_flavor_from_str(#[case] input: &str, #[case] expected: ShellFlavor) {
    let flavor: ShellFlavor = input.parse().expect("should parse flavor name");
    assert_eq!(flavor, expected);
}

#[rstest]
fn test_flavor_from_str_rejects_unknown() {
    assert!("fish".parse::<ShellFlavor>().is_err());
}

#[rstest]
fn test_dialect_tables() {
    assert_eq!(ShellFlavor::Bash.path_delimiter(), ':');
    assert_eq!(ShellFlavor::Cmd.path_delimiter(), ';');
    assert_eq!(ShellFlavor::Tcsh.prompt_var(), Some("prompt"));
    assert_eq!(ShellFlavor::Powershell.prompt_var(), None);
    assert_eq!(ShellFlavor::Zsh.script_extension(), "sh");
    assert_eq!(ShellFlavor::Cmd.script_extension(), "bat");
}
