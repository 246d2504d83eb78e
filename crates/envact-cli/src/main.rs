// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

//! envact - Shell Environment Activation Manager CLI
//!
//! Each subcommand prints an eval-snippet for the calling shell on stdout;
//! diagnostics and logging go to stderr so the snippet stays clean.

use clap::{Parser, Subcommand};
use miette::Result;

mod cmd_activate;
mod cmd_deactivate;
mod cmd_detect;
mod cmd_reactivate;

use cmd_activate::CmdActivate;
use cmd_deactivate::CmdDeactivate;
use cmd_detect::CmdDetect;
use cmd_reactivate::CmdReactivate;

use envact::{EnvTable, HostOs, ShellFlavor, SystemProcessTable};

#[cfg(test)]
#[path = "./main_test.rs"]
mod main_test;

#[derive(Parser)]
#[clap(
    name = "envact",
    about = "Shell Environment Activation Manager",
    version,
    long_about = "Activate and deactivate named environments from any supported shell.\n\
                  The command prints a snippet on stdout for the calling shell to eval, \n\
                  e.g.: eval \"$(envact activate dev)\""
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase verbosity (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[clap(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Activate an environment (default: root)
    Activate(CmdActivate),

    /// Deactivate the current environment
    Deactivate(CmdDeactivate),

    /// Refresh the current environment after installing into it
    Reactivate(CmdReactivate),

    /// Report the detected shell dialect
    Detect(CmdDetect),
}

impl Opt {
    fn run(self) -> Result<i32> {
        // Setup logging; stdout is reserved for the emitted snippet.
        let log_level = match (self.logging.quiet, self.logging.verbose) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .init();

        // Dispatch to command
        match self.cmd {
            Command::Activate(mut cmd) => cmd.run(),
            Command::Deactivate(mut cmd) => cmd.run(),
            Command::Reactivate(mut cmd) => cmd.run(),
            Command::Detect(mut cmd) => cmd.run(),
        }
    }
}

/// Use the `--shell` override when given, otherwise detect the invoking
/// shell. Nothing may be mutated or emitted before this succeeds.
pub(crate) fn resolve_flavor(
    shell: Option<&str>,
    table: &EnvTable,
) -> envact::Result<ShellFlavor> {
    match shell {
        Some(name) => name.parse().map_err(|_| {
            envact::Error::MalformedArgument(format!("unknown shell flavor '{name}'"))
        }),
        None => envact::detect(table, &SystemProcessTable, HostOs::current()),
    }
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    let code = opt.run()?;
    std::process::exit(code);
}
