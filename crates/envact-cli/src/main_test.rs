// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

use clap::CommandFactory;
use clap::error::ErrorKind;
use rstest::rstest;

use super::*;

#[rstest]
#[case(vec!["envact", "--help"])]
#[case(vec!["envact", "activate", "-h"])]
#[case(vec!["envact", "deactivate", "--help"])]
fn test_help_flag_short_circuits_before_any_command_runs(#[case] argv: Vec<&str>) {
    // Parsing fails with a help request, so no command is constructed and
    // nothing can be mutated or emitted.
    let err = Opt::command()
        .try_get_matches_from(argv)
        .expect_err("help should short-circuit parsing");
    assert_eq!(err.kind(), ErrorKind::DisplayHelp);
}

#[rstest]
fn test_unknown_flag_is_a_usage_error() {
    let err = Opt::command()
        .try_get_matches_from(["envact", "activate", "--bogus"])
        .expect_err("unknown flag should be rejected");
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
}

#[rstest]
fn test_activate_defaults_to_root() {
    let opt = Opt::try_parse_from(["envact", "activate"]).expect("bare activate should parse");
    match opt.cmd {
        Command::Activate(cmd) => assert_eq!(cmd.env_ref, "root"),
        _ => panic!("expected the activate subcommand"),
    }
}

#[rstest]
#[case("zsh", ShellFlavor::Zsh)]
#[case("PWSH", ShellFlavor::Powershell)]
fn test_shell_override_parses_flavor(#[case] name: &str, #[case] expected: ShellFlavor) {
    let table = EnvTable::new();
    let flavor = resolve_flavor(Some(name), &table).expect("known flavor should parse");
    assert_eq!(flavor, expected);
}

#[rstest]
fn test_shell_override_rejects_unknown_flavor() {
    let table = EnvTable::new();
    assert!(matches!(
        resolve_flavor(Some("fish"), &table),
        Err(envact::Error::MalformedArgument(_))
    ));
}
