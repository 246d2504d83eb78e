// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `envact deactivate` command.

use clap::Args;
use miette::Result;

use envact::{Config, DirsLocator, Engine, EnvTable, EnvironmentState, emit};

/// Deactivate the current environment
#[derive(Debug, Args)]
pub struct CmdDeactivate {
    /// Shell dialect to emit for (default: detect the invoking shell)
    #[clap(short, long)]
    pub shell: Option<String>,
}

impl CmdDeactivate {
    pub fn run(&mut self) -> Result<i32> {
        let table = EnvTable::from_process();
        let flavor = crate::resolve_flavor(self.shell.as_deref(), &table)?;
        let config = Config::load(&table)?;
        let locator = DirsLocator::from_config(&config);

        let mut state = EnvironmentState::capture(&table, flavor);
        let engine = Engine::new(&locator, &config, flavor);
        // Deactivating with nothing active is a successful no-op.
        let ops = engine.deactivate(&mut state)?;

        print!("{}", emit(flavor, &ops));
        Ok(0)
    }
}
