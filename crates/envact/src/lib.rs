// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

//! envact - Shell Environment Activation Engine
//!
//! This crate provides the core library for activating and deactivating
//! named virtual environments from any supported shell dialect.
//!
//! # Overview
//!
//! Historically this kind of tool is written once per shell syntax, with
//! the same activation state machine hand-maintained for bash, zsh, csh,
//! cmd.exe, and friends. envact implements the state machine exactly once:
//! the engine reads session state out of an explicit environment-variable
//! table, computes the activation or deactivation transition, and emits a
//! small eval-snippet in the dialect of the calling shell.
//!
//! # Example
//!
//! ```no_run
//! use envact::{emit, Config, DirsLocator, Engine, EnvTable, EnvironmentState, ShellFlavor};
//!
//! # fn main() -> envact::Result<()> {
//! let table = EnvTable::from_process();
//! let config = Config::load(&table)?;
//! let locator = DirsLocator::from_config(&config);
//! let flavor = ShellFlavor::Bash;
//!
//! let mut state = EnvironmentState::capture(&table, flavor);
//! let engine = Engine::new(&locator, &config, flavor);
//! let ops = engine.activate(&mut state, "dev")?;
//!
//! // The calling shell evaluates this snippet.
//! print!("{}", emit(flavor, &ops));
//! # Ok(())
//! # }
//! ```

pub mod cleanup;
pub mod config;
pub mod emit;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod locator;
pub mod shell;
pub mod state;

pub use cleanup::{CleanupMode, cleanup};
pub use config::Config;
pub use emit::emit;
pub use engine::{Engine, EnvOp};
pub use error::{Error, Result};
pub use locator::{DirsLocator, EnvLocator, ROOT_ENV_NAMES};
pub use shell::{HostOs, ProcessEntry, ProcessTable, ShellFlavor, SystemProcessTable, detect};
pub use state::{EnvTable, EnvironmentState};

/// Variable holding the active environment's absolute prefix.
pub const PREFIX_VAR: &str = "ENVACT_PREFIX";

/// Variable holding the active environment's short display form.
pub const DEFAULT_ENV_VAR: &str = "ENVACT_DEFAULT_ENV";

/// Variable holding the prompt snapshot taken at activation.
pub const PROMPT_BACKUP_VAR: &str = "ENVACT_PROMPT_BACKUP";

/// Variable holding the activation nesting counter.
pub const STACK_DEPTH_VAR: &str = "ENVACT_SHLVL";

/// The search-path variable the engine maintains.
pub const PATH_VAR: &str = "PATH";

/// Hook scripts sourced after activation, relative to the prefix.
pub const ACTIVATE_HOOKS_DIR: &str = "etc/envact/activate.d";

/// Hook scripts sourced before deactivation, relative to the prefix.
pub const DEACTIVATE_HOOKS_DIR: &str = "etc/envact/deactivate.d";
