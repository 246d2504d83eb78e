// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for envact operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience Result type with envact Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during envact operations.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// The invoking shell could not be classified
    #[error("Unable to determine the invoking shell: {detail}")]
    #[diagnostic(
        code(envact::unrecognized_shell),
        help("Pass the shell explicitly with --shell (bash, zsh, dash, posh, ksh, csh, tcsh, cmd, powershell, xonsh)")
    )]
    UnrecognizedShell { detail: String },

    /// Environment reference did not resolve to an existing environment
    #[error("Could not find environment: {reference}")]
    #[diagnostic(
        code(envact::environment_not_found),
        help("{}", searched_message(searched))
    )]
    EnvironmentNotFound {
        reference: String,
        searched: Vec<PathBuf>,
    },

    /// Invalid command-line or function argument
    #[error("Malformed argument: {0}")]
    #[diagnostic(code(envact::malformed_argument))]
    MalformedArgument(String),

    /// Invalid YAML in the config file
    #[error("Invalid config file: {error}")]
    #[diagnostic(
        code(envact::invalid_config),
        help("Check YAML syntax in ~/.config/envact/config.yaml")
    )]
    InvalidConfig {
        #[source]
        error: serde_yaml::Error,
    },

    /// Failed to read file
    #[error("Failed to read file: {path:?}")]
    #[diagnostic(code(envact::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// IO error passthrough
    #[error(transparent)]
    #[diagnostic(code(envact::io_error))]
    Io(#[from] std::io::Error),
}

fn searched_message(searched: &[PathBuf]) -> String {
    if searched.is_empty() {
        "Check that the environment name or path is correct".to_string()
    } else {
        let dirs: Vec<String> = searched.iter().map(|p| format!("{}", p.display())).collect();
        format!("Searched environment directories: {}", dirs.join(", "))
    }
}
