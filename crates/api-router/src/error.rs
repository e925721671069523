// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use api_config::ConfigurationError;
use common::ApiSurface;
use schema_builder::{CompositionError, LoadError};
use storefront_env::EnvError;
use thiserror::Error;

/// Two contributors claim the same name.
#[derive(Error, Debug)]
pub enum ConflictError {
    #[error(
        "Conflicting schema directive \"{directive}\" in the {surface} API, defined in {first_plugin} and {second_plugin}"
    )]
    DuplicateDirective {
        directive: String,
        first_plugin: String,
        second_plugin: String,
        surface: ApiSurface,
    },

    #[error(
        "Conflicting resolvers for {type_name}.{field_name} in the {surface} API, provided by {first} and {second}"
    )]
    DuplicateResolver {
        type_name: String,
        field_name: String,
        first: String,
        second: String,
        surface: ApiSurface,
    },
}

#[derive(Error, Debug)]
pub enum ApiBuildError {
    #[error("Invalid configuration for the {surface} API: {source}")]
    Configuration {
        surface: ApiSurface,
        #[source]
        source: ConfigurationError,
    },

    #[error("Invalid environment for the {surface} API: {source}")]
    Environment {
        surface: ApiSurface,
        #[source]
        source: EnvError,
    },

    #[error("Failed to load the type definitions of the {surface} API: {source}")]
    Load {
        surface: ApiSurface,
        #[source]
        source: LoadError,
    },

    #[error("Failed to compose the {surface} API schema: {source}")]
    Composition {
        surface: ApiSurface,
        #[source]
        source: CompositionError,
    },

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error(
        "{contributor} provides a resolver for {type_name}.{field_name}, which is not part of the {surface} API schema"
    )]
    UnknownResolverField {
        surface: ApiSurface,
        contributor: String,
        type_name: String,
        field_name: String,
    },

    #[error(
        "{contributor} guards {type_name}.{field_name} in the {surface} API with unknown permission '{permission}'"
    )]
    UnknownPermission {
        surface: ApiSurface,
        contributor: String,
        type_name: String,
        field_name: String,
        permission: String,
    },
}

impl ApiBuildError {
    pub fn surface(&self) -> ApiSurface {
        match self {
            ApiBuildError::Configuration { surface, .. }
            | ApiBuildError::Environment { surface, .. }
            | ApiBuildError::Load { surface, .. }
            | ApiBuildError::Composition { surface, .. }
            | ApiBuildError::UnknownResolverField { surface, .. }
            | ApiBuildError::UnknownPermission { surface, .. } => *surface,
            ApiBuildError::Conflict(ConflictError::DuplicateDirective { surface, .. })
            | ApiBuildError::Conflict(ConflictError::DuplicateResolver { surface, .. }) => *surface,
        }
    }
}
