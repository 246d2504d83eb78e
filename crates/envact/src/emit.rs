// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

//! Rendering of engine operations into shell-dialect snippets.
//!
//! The engine computes one ordered [`EnvOp`] list; this module is the only
//! place dialect syntax appears. The emitted text is meant to be evaluated
//! by the calling shell (`eval "$(envact activate dev)"` and equivalents),
//! so every value is escaped for the dialect's quoting rules and nothing
//! else is ever written to stdout.

use std::path::Path;

use crate::engine::EnvOp;
use crate::shell::ShellFlavor;

#[cfg(test)]
#[path = "./emit_test.rs"]
mod emit_test;

/// Syntax family: several flavors share one quoting and statement style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Posix,
    Csh,
    Cmd,
    Powershell,
    Xonsh,
}

fn family(flavor: ShellFlavor) -> Family {
    match flavor {
        ShellFlavor::Bash
        | ShellFlavor::Zsh
        | ShellFlavor::Dash
        | ShellFlavor::Posh
        | ShellFlavor::Ksh => Family::Posix,
        ShellFlavor::Csh | ShellFlavor::Tcsh => Family::Csh,
        ShellFlavor::Cmd => Family::Cmd,
        ShellFlavor::Powershell => Family::Powershell,
        ShellFlavor::Xonsh => Family::Xonsh,
    }
}

/// Render operations as an eval-snippet for the given dialect.
pub fn emit(flavor: ShellFlavor, ops: &[EnvOp]) -> String {
    let lines: Vec<String> = ops.iter().filter_map(|op| emit_op(flavor, op)).collect();
    if lines.is_empty() {
        String::new()
    } else {
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn emit_op(flavor: ShellFlavor, op: &EnvOp) -> Option<String> {
    let family = family(flavor);
    match op {
        EnvOp::Export { name, value } => Some(match family {
            Family::Posix => format!("export {name}=\"{}\"", escape_posix(value)),
            Family::Csh => format!("setenv {name} \"{}\"", escape_csh(value)),
            Family::Cmd => format!("@SET \"{name}={}\"", escape_cmd(value)),
            Family::Powershell => format!("$Env:{name} = \"{}\"", escape_powershell(value)),
            Family::Xonsh => format!("${name} = \"{}\"", escape_xonsh(value)),
        }),
        EnvOp::Unset { name } => Some(match family {
            Family::Posix => format!("unset {name}"),
            Family::Csh => format!("unsetenv {name}"),
            Family::Cmd => format!("@SET {name}="),
            Family::Powershell => {
                format!("Remove-Item Env:\\{name} -ErrorAction SilentlyContinue")
            }
            Family::Xonsh => format!("del ${name}"),
        }),
        EnvOp::SetPrompt { value } => {
            let var = flavor.prompt_var()?;
            Some(match family {
                Family::Posix => format!("{var}=\"{}\"", escape_posix(value)),
                Family::Csh => format!("set prompt=\"{}\"", escape_csh(value)),
                Family::Cmd => format!("@SET \"{var}={}\"", escape_cmd(value)),
                // PowerShell prompts are functions, not variables.
                Family::Powershell => return None,
                Family::Xonsh => format!("${var} = \"{}\"", escape_xonsh(value)),
            })
        }
        EnvOp::RunScript { path } => Some(match family {
            Family::Posix => format!(". \"{}\"", escape_posix_path(path)),
            Family::Csh => format!("source \"{}\"", escape_csh(&path.display().to_string())),
            Family::Cmd => format!("@CALL \"{}\"", escape_cmd(&path.display().to_string())),
            Family::Powershell => {
                format!(". \"{}\"", escape_powershell(&path.display().to_string()))
            }
            Family::Xonsh => format!("source \"{}\"", escape_xonsh(&path.display().to_string())),
        }),
        EnvOp::Rehash => match family {
            Family::Posix => Some("hash -r 2>/dev/null".to_string()),
            Family::Csh => Some("rehash".to_string()),
            // cmd, PowerShell, and xonsh keep no command hash table.
            Family::Cmd | Family::Powershell | Family::Xonsh => None,
        },
    }
}

fn escape_posix_path(path: &Path) -> String {
    escape_posix(&path.display().to_string())
}

/// Escape for a POSIX double-quoted string.
fn escape_posix(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Escape for a csh double-quoted string; `!` triggers history expansion
/// even inside quotes.
fn escape_csh(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '"' | '$' | '`' | '!') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// cmd.exe expands `%VAR%` even inside quoted SET values.
fn escape_cmd(value: &str) -> String {
    value.replace('%', "%%")
}

/// Escape for a PowerShell double-quoted string.
fn escape_powershell(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '`' | '"' | '$') {
            out.push('`');
        }
        out.push(ch);
    }
    out
}

/// Escape for a Python-style double-quoted string.
fn escape_xonsh(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '"') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
