// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::{
    parse_schema,
    types::{TypeKind, TypeSystemDefinition},
};

use crate::error::{ConfigurationError, is_graphql_name};

pub const NATIVE_AUTH_STRATEGY_NAME: &str = "native";

const NATIVE_AUTH_INPUT: &str = "input NativeAuthInput {\n  username: String!\n  password: String!\n}";

/// An authentication strategy as far as schema composition is concerned: a name and the SDL of
/// the input it accepts through `authenticate(input: AuthenticationInput!)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticationStrategy {
    name: String,
    input_sdl: String,
    input_type_name: String,
}

impl AuthenticationStrategy {
    /// `input_sdl` must define at least one input type; the first one is the type of the
    /// strategy's `AuthenticationInput` field.
    pub fn new(name: &str, input_sdl: &str) -> Result<Self, ConfigurationError> {
        if !is_graphql_name(name) {
            return Err(ConfigurationError::InvalidName {
                context: "authentication strategy",
                name: name.to_string(),
            });
        }

        let invalid = |message: String| ConfigurationError::InvalidAuthenticationStrategy {
            name: name.to_string(),
            message,
        };

        let document = parse_schema(input_sdl).map_err(|e| invalid(e.to_string()))?;

        let input_type_name = document
            .definitions
            .iter()
            .find_map(|definition| match definition {
                TypeSystemDefinition::Type(typ)
                    if !typ.node.extend && matches!(typ.node.kind, TypeKind::InputObject(_)) =>
                {
                    Some(typ.node.name.node.to_string())
                }
                _ => None,
            })
            .ok_or_else(|| invalid("no input type is defined".to_string()))?;

        Ok(Self {
            name: name.to_string(),
            input_sdl: input_sdl.to_string(),
            input_type_name,
        })
    }

    /// The username/password strategy that is configured when nothing else is.
    pub fn native() -> Self {
        Self {
            name: NATIVE_AUTH_STRATEGY_NAME.to_string(),
            input_sdl: NATIVE_AUTH_INPUT.to_string(),
            input_type_name: "NativeAuthInput".to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_sdl(&self) -> &str {
        &self.input_sdl
    }

    pub fn input_type_name(&self) -> &str {
        &self.input_type_name
    }
}
