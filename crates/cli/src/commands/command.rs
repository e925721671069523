// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Result, anyhow};
use api_config::{DEFAULT_CONFIG_FILE, load_config};
use api_router::ApiModuleFactory;
use async_trait::async_trait;
use clap::{Arg, ArgAction, ArgMatches, Command, builder::PossibleValuesParser};
use common::ApiSurface;
use storefront_env::{MapEnvironment, SystemEnvironment};

#[async_trait]
pub trait CommandDefinition: Send + Sync {
    fn command(&self) -> Command;

    async fn execute(&self, matches: &ArgMatches) -> Result<()>;
}

pub struct SubcommandDefinition {
    pub name: &'static str,
    pub about: &'static str,
    pub command_definitions: Vec<Box<dyn CommandDefinition>>,
}

impl SubcommandDefinition {
    pub fn new(
        name: &'static str,
        about: &'static str,
        command_definitions: Vec<Box<dyn CommandDefinition>>,
    ) -> Self {
        Self {
            name,
            about,
            command_definitions,
        }
    }
}

#[async_trait]
impl CommandDefinition for SubcommandDefinition {
    fn command(&self) -> Command {
        Command::new(self.name)
            .about(self.about)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .disable_help_subcommand(true)
            .subcommands(
                self.command_definitions
                    .iter()
                    .map(|command_definition| command_definition.command()),
            )
    }

    async fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let (name, matches) = matches
            .subcommand()
            .ok_or_else(|| anyhow!("No subcommand given"))?;

        for command_definition in &self.command_definitions {
            if command_definition.command().get_name() == name {
                return command_definition.execute(matches).await;
            }
        }

        Err(anyhow!("Unknown subcommand: {}", name))
    }
}

pub fn get<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, arg_id: &str) -> Option<T> {
    matches.get_one::<T>(arg_id).cloned()
}

pub fn config_arg() -> Arg {
    Arg::new("config")
        .help("The path to the configuration file.")
        .long_help("The path to the configuration file. Type paths are resolved relative to its directory. Defaults apply when the file does not exist.")
        .short('c')
        .long("config")
        .required(false)
        .value_parser(clap::value_parser!(PathBuf))
        .default_value(DEFAULT_CONFIG_FILE)
        .num_args(1)
}

pub fn env_arg() -> Arg {
    Arg::new("env")
        .help("Override an environment variable (KEY=VALUE)")
        .long_help("Override an environment variable for this run, for example `-e STOREFRONT_DEPLOYMENT_MODE=dev`. May be repeated. Other variables are read from the process environment.")
        .short('e')
        .long("env")
        .required(false)
        .action(ArgAction::Append)
        .num_args(1)
}

pub fn surface_arg() -> Arg {
    Arg::new("surface")
        .help("The API to compose")
        .short('s')
        .long("surface")
        .required(true)
        .value_parser(PossibleValuesParser::new(ApiSurface::ALL.map(|s| s.as_str())))
        .num_args(1)
}

pub fn output_arg() -> Arg {
    Arg::new("output")
        .help("Output file path")
        .long_help("If specified, the output will be written to this file path instead of stdout.")
        .short('o')
        .long("output")
        .required(false)
        .value_parser(clap::value_parser!(PathBuf))
        .num_args(1)
}

pub fn get_surface(matches: &ArgMatches) -> Result<ApiSurface> {
    let surface: String =
        get(matches, "surface").ok_or_else(|| anyhow!("Required argument `surface` is not present"))?;
    Ok(surface.parse()?)
}

/// A factory for the configuration at `config_path`, with type paths resolved against the
/// directory holding it.
pub fn factory_for_config(config_path: &Path) -> Result<ApiModuleFactory> {
    let config = load_config(config_path)?;
    let root = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    Ok(ApiModuleFactory::new(config, root))
}

/// The process environment with the `--env` overrides on top.
pub fn environment_from_matches(matches: &ArgMatches) -> Result<MapEnvironment> {
    let assignments = matches
        .get_many::<String>("env")
        .into_iter()
        .flatten();

    let mut env = MapEnvironment::layered_over(Arc::new(SystemEnvironment));
    for assignment in assignments {
        env = env.with_assignment(assignment)?;
    }
    Ok(env)
}

pub fn factory_from_matches(matches: &ArgMatches) -> Result<ApiModuleFactory> {
    let config_path: PathBuf = get(matches, "config").unwrap_or_else(|| DEFAULT_CONFIG_FILE.into());
    let env = environment_from_matches(matches)?;
    Ok(factory_for_config(&config_path)?.with_environment(Arc::new(env)))
}
