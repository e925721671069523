// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use common::ApiSurface;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Custom fields are not supported on entity '{0}'")]
    UnknownEntity(String),

    #[error("Invalid {context} name '{name}': must be a GraphQL identifier")]
    InvalidName { context: &'static str, name: String },

    #[error("Custom field '{field}' is defined more than once on entity '{entity}'")]
    DuplicateCustomField { entity: String, field: String },

    #[error("Invalid permission '{0}'")]
    InvalidPermission(String),

    #[error("Authentication strategy '{name}' is configured more than once for the {surface} API")]
    DuplicateAuthenticationStrategy { surface: ApiSurface, name: String },

    #[error("Invalid input type for authentication strategy '{name}': {message}")]
    InvalidAuthenticationStrategy { name: String, message: String },

    #[error("Invalid API path '{0}'")]
    InvalidApiPath(String),

    #[error("Failed to parse configuration file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to read configuration file '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Whether `name` is a valid GraphQL name (`/[_A-Za-z][_0-9A-Za-z]*/`).
pub fn is_graphql_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_names() {
        assert!(is_graphql_name("giftMessage"));
        assert!(is_graphql_name("_internal2"));
        assert!(!is_graphql_name("2fast"));
        assert!(!is_graphql_name("gift-message"));
        assert!(!is_graphql_name(""));
    }
}
