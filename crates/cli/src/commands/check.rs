// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use clap::{ArgMatches, Command};
use colored::Colorize;
use common::ApiSurface;

use crate::commands::command::{CommandDefinition, config_arg, env_arg, factory_from_matches};

pub(crate) struct CheckCommandDefinition {}

#[async_trait]
impl CommandDefinition for CheckCommandDefinition {
    fn command(&self) -> Command {
        Command::new("check")
            .about("Compose both APIs and report any errors")
            .arg(config_arg())
            .arg(env_arg())
    }

    async fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let factory = factory_from_matches(matches)?;

        let mut failed = false;
        for surface in ApiSurface::ALL {
            match factory.build(surface).await {
                Ok(api) => println!(
                    "{} {} API at {} ({} types, {} resolvers, {} directives)",
                    "✓".green(),
                    surface,
                    api.path.bold(),
                    api.schema.type_definitions().count(),
                    api.resolvers.len(),
                    api.directives.len(),
                ),
                Err(e) => {
                    failed = true;
                    eprintln!("{} {}", "✗".red(), e.to_string().red());
                }
            }
        }

        if failed {
            Err(anyhow!("The APIs could not be composed"))
        } else {
            Ok(())
        }
    }
}
