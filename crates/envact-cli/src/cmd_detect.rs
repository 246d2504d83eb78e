// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `envact detect` command.

use clap::Args;
use colored::Colorize;
use miette::Result;

use envact::{EnvTable, HostOs, SystemProcessTable};

/// Report which shell dialect envact would emit for
#[derive(Debug, Args)]
pub struct CmdDetect {}

impl CmdDetect {
    pub fn run(&mut self) -> Result<i32> {
        let table = EnvTable::from_process();
        let flavor = envact::detect(&table, &SystemProcessTable, HostOs::current())?;
        println!("{}", flavor.to_string().green());
        Ok(0)
    }
}
