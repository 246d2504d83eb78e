// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

//! Shell-flavor detection from environment markers and process ancestry.
//!
//! The detector usually runs in a short-lived child of the shell being
//! classified, so it inspects the parent process chain rather than the
//! current process. All OS and shell specific pattern matching stays inside
//! this module; callers only see [`ShellFlavor`] and the [`ProcessTable`]
//! seam, which tests replace with fake tables.

use once_cell::sync::Lazy;
use strum::{Display, EnumString};

use crate::state::EnvTable;

#[cfg(test)]
#[path = "./shell_test.rs"]
mod shell_test;

/// Maximum number of ancestor processes inspected before giving up.
const MAX_ANCESTRY_DEPTH: usize = 8;

/// The shell dialects envact can emit snippets for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ShellFlavor {
    Bash,
    Zsh,
    Dash,
    Posh,
    Ksh,
    Csh,
    Tcsh,
    #[strum(serialize = "cmd", serialize = "cmd.exe")]
    Cmd,
    #[strum(serialize = "powershell", serialize = "pwsh")]
    Powershell,
    Xonsh,
}

impl ShellFlavor {
    /// Delimiter used in PATH-like list variables for this dialect.
    pub fn path_delimiter(&self) -> char {
        match self {
            Self::Cmd | Self::Powershell => ';',
            _ => ':',
        }
    }

    /// Name of the prompt variable, if the dialect keeps its prompt in one.
    ///
    /// PowerShell derives its prompt from a function rather than a
    /// variable, so prompt decoration is skipped there.
    pub fn prompt_var(&self) -> Option<&'static str> {
        match self {
            Self::Bash | Self::Zsh | Self::Dash | Self::Posh | Self::Ksh => Some("PS1"),
            Self::Csh | Self::Tcsh => Some("prompt"),
            Self::Cmd | Self::Xonsh => Some("PROMPT"),
            Self::Powershell => None,
        }
    }

    /// File extension of hook scripts this dialect can source.
    pub fn script_extension(&self) -> &'static str {
        match self {
            Self::Bash | Self::Zsh | Self::Dash | Self::Posh | Self::Ksh => "sh",
            Self::Csh | Self::Tcsh => "csh",
            Self::Cmd => "bat",
            Self::Powershell => "ps1",
            Self::Xonsh => "xsh",
        }
    }

    /// Map a normalized process command name to a flavor.
    ///
    /// Returns `None` for unknown names and for the ambiguous `sh`, which
    /// needs host OS context to resolve (see [`detect`]).
    fn from_command_name(name: &str) -> Option<Self> {
        match name {
            "bash" => Some(Self::Bash),
            "zsh" => Some(Self::Zsh),
            "dash" => Some(Self::Dash),
            "posh" => Some(Self::Posh),
            "ksh" | "ksh93" | "mksh" | "pdksh" => Some(Self::Ksh),
            "csh" => Some(Self::Csh),
            "tcsh" => Some(Self::Tcsh),
            "cmd" => Some(Self::Cmd),
            "powershell" | "powershell_ise" | "pwsh" => Some(Self::Powershell),
            "xonsh" => Some(Self::Xonsh),
            _ => None,
        }
    }
}

/// Host operating system, as far as `sh` disambiguation cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Linux,
    MacOs,
    Windows,
    OtherUnix,
}

impl HostOs {
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(windows) {
            Self::Windows
        } else {
            Self::OtherUnix
        }
    }
}

/// One row of the process table.
#[derive(Debug, Clone)]
pub struct ProcessEntry {
    pub pid: u32,
    pub ppid: u32,
    /// argv[0] where available, otherwise the kernel's short command name.
    pub command: String,
}

/// Read access to the process table. Tests inject fakes.
pub trait ProcessTable {
    fn current_pid(&self) -> u32;
    fn lookup(&self, pid: u32) -> Option<ProcessEntry>;
}

/// Environment variables that only one shell sets, checked before touching
/// the process table.
static ENV_MARKERS: Lazy<Vec<(&'static str, ShellFlavor)>> = Lazy::new(|| {
    vec![
        ("XONSH_VERSION", ShellFlavor::Xonsh),
        ("ZSH_VERSION", ShellFlavor::Zsh),
        ("BASH_VERSION", ShellFlavor::Bash),
        ("KSH_VERSION", ShellFlavor::Ksh),
        ("POSH_VERSION", ShellFlavor::Posh),
        ("tcsh", ShellFlavor::Tcsh),
    ]
});

/// Classify the invoking shell.
///
/// Resolution order: shell-unique environment markers, then the parent
/// process chain, then `sh` disambiguation from the host OS and the depth
/// at which the `sh` ancestor was found. Unclassifiable shells are a hard
/// error; callers must abort before mutating anything.
pub fn detect(
    env: &EnvTable,
    table: &dyn ProcessTable,
    os: HostOs,
) -> crate::Result<ShellFlavor> {
    for (marker, flavor) in ENV_MARKERS.iter() {
        if env.get(marker).is_some_and(|value| !value.is_empty()) {
            tracing::debug!(marker, %flavor, "shell detected from environment marker");
            return Ok(*flavor);
        }
    }

    let mut next = table.lookup(table.current_pid()).map(|entry| entry.ppid);
    let mut ambiguous_sh: Option<(usize, bool)> = None;

    for depth in 1..=MAX_ANCESTRY_DEPTH {
        let Some(pid) = next.filter(|pid| *pid > 1) else {
            break;
        };
        let Some(entry) = table.lookup(pid) else {
            break;
        };
        let (name, login) = normalize_command(&entry.command);
        if let Some(flavor) = ShellFlavor::from_command_name(&name) {
            tracing::debug!(pid, command = %entry.command, %flavor, "shell detected from process ancestry");
            return Ok(flavor);
        }
        if name == "sh" && ambiguous_sh.is_none() {
            ambiguous_sh = Some((depth, login));
        }
        if entry.ppid == pid {
            break;
        }
        next = Some(entry.ppid);
    }

    if let Some((depth, login)) = ambiguous_sh {
        let flavor = resolve_sh(os, depth, login);
        tracing::debug!(depth, login, %flavor, "ambiguous `sh` ancestor resolved from host OS");
        return Ok(flavor);
    }

    Err(crate::Error::UnrecognizedShell {
        detail: "no known shell found in process ancestry".to_string(),
    })
}

/// Strip the pieces that vary between invocations of the same shell: a
/// directory prefix, the login-shell `-` marker, an `.exe` suffix, and case.
fn normalize_command(command: &str) -> (String, bool) {
    let argv0 = command.split_whitespace().next().unwrap_or(command);
    let base = argv0
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(argv0);
    let login = base.starts_with('-');
    let mut name = base.trim_start_matches('-').to_ascii_lowercase();
    if let Some(stripped) = name.strip_suffix(".exe") {
        name = stripped.to_string();
    }
    (name, login)
}

/// Decide what `sh` really is.
///
/// `/bin/sh` is a symlink to a distribution-specific shell: dash on Debian
/// style Linux, bash on macOS, ksh on the traditional unixes. A login shell
/// reported as `-sh` at depth 1 is the user's login shell and is treated as
/// the OS default interactive shell instead of the script interpreter.
fn resolve_sh(os: HostOs, depth: usize, login: bool) -> ShellFlavor {
    let interactive = login && depth == 1;
    match os {
        HostOs::MacOs | HostOs::Windows => ShellFlavor::Bash,
        HostOs::Linux => {
            if interactive {
                ShellFlavor::Bash
            } else {
                ShellFlavor::Dash
            }
        }
        HostOs::OtherUnix => ShellFlavor::Ksh,
    }
}

/// Process table backed by the host OS.
///
/// On Linux this reads `/proc`; on other unixes it shells out to `ps(1)`.
/// On Windows lookups always fail and detection falls back to environment
/// markers or the explicit `--shell` flag.
pub struct SystemProcessTable;

impl ProcessTable for SystemProcessTable {
    fn current_pid(&self) -> u32 {
        std::process::id()
    }

    fn lookup(&self, pid: u32) -> Option<ProcessEntry> {
        imp::lookup(pid)
    }
}

#[cfg(target_os = "linux")]
mod imp {
    use super::ProcessEntry;

    pub(super) fn lookup(pid: u32) -> Option<ProcessEntry> {
        let stat = std::fs::read_to_string(format!("/proc/{pid}/stat")).ok()?;
        // Format: pid (comm) state ppid ... where comm may contain both
        // spaces and parentheses, hence the rfind.
        let open = stat.find('(')?;
        let close = stat.rfind(')')?;
        let comm = stat.get(open + 1..close)?.to_string();
        let ppid: u32 = stat
            .get(close + 1..)?
            .split_whitespace()
            .nth(1)?
            .parse()
            .ok()?;
        // Prefer argv[0], which keeps the login-shell `-` marker that the
        // kernel's comm field drops.
        let command = std::fs::read(format!("/proc/{pid}/cmdline"))
            .ok()
            .and_then(|raw| {
                raw.split(|byte| *byte == 0)
                    .next()
                    .map(|argv0| String::from_utf8_lossy(argv0).into_owned())
            })
            .filter(|argv0| !argv0.is_empty())
            .unwrap_or(comm);
        Some(ProcessEntry { pid, ppid, command })
    }
}

#[cfg(all(unix, not(target_os = "linux")))]
mod imp {
    use super::ProcessEntry;

    pub(super) fn lookup(pid: u32) -> Option<ProcessEntry> {
        let output = std::process::Command::new("ps")
            .args(["-o", "ppid=,command=", "-p", &pid.to_string()])
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let text = String::from_utf8_lossy(&output.stdout);
        let line = text.lines().next()?.trim();
        let mut fields = line.split_whitespace();
        let ppid: u32 = fields.next()?.parse().ok()?;
        let command = fields.collect::<Vec<_>>().join(" ");
        if command.is_empty() {
            return None;
        }
        Some(ProcessEntry { pid, ppid, command })
    }
}

#[cfg(windows)]
mod imp {
    use super::ProcessEntry;

    pub(super) fn lookup(_pid: u32) -> Option<ProcessEntry> {
        None
    }
}
