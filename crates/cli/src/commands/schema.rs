// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{fs::File, io::Write, path::PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use clap::{ArgMatches, Command};
use tracing::info;

use crate::commands::command::{
    CommandDefinition, config_arg, env_arg, factory_from_matches, get, get_surface, output_arg,
    surface_arg,
};

pub(crate) struct SchemaCommandDefinition {}

#[async_trait]
impl CommandDefinition for SchemaCommandDefinition {
    fn command(&self) -> Command {
        Command::new("schema")
            .about("Print the composed schema of an API")
            .arg(surface_arg())
            .arg(config_arg())
            .arg(env_arg())
            .arg(output_arg())
    }

    async fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let surface = get_surface(matches)?;
        let api = factory_from_matches(matches)?.build(surface).await?;

        match get::<PathBuf>(matches, "output") {
            Some(output) => {
                File::create(&output)?.write_all(api.type_defs.as_bytes())?;
                info!(surface = %surface, output = %output.display(), "Wrote schema");
            }
            None => println!("{}", api.type_defs),
        }

        Ok(())
    }
}
