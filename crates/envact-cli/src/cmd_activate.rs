// Copyright (c) Contributors to the envact project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `envact activate` command.

use clap::Args;
use miette::Result;

use envact::{Config, DirsLocator, Engine, EnvTable, EnvironmentState, emit};

/// Activate an environment
#[derive(Debug, Args)]
pub struct CmdActivate {
    /// Shell dialect to emit for (default: detect the invoking shell)
    #[clap(short, long)]
    pub shell: Option<String>,

    /// Environment name or prefix path
    #[clap(default_value = "root")]
    pub env_ref: String,
}

impl CmdActivate {
    pub fn run(&mut self) -> Result<i32> {
        let table = EnvTable::from_process();
        let flavor = crate::resolve_flavor(self.shell.as_deref(), &table)?;
        let config = Config::load(&table)?;
        let locator = DirsLocator::from_config(&config);

        let mut state = EnvironmentState::capture(&table, flavor);
        let engine = Engine::new(&locator, &config, flavor);
        let ops = engine.activate(&mut state, &self.env_ref)?;

        print!("{}", emit(flavor, &ops));
        Ok(0)
    }
}
