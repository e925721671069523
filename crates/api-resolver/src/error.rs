// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolverError {
    #[error("Not authorized to access {type_name}.{field_name}")]
    Forbidden {
        type_name: String,
        field_name: String,
    },

    #[error("Invalid argument '{0}'")]
    InvalidArgument(String),

    #[error("{0}")]
    UserDisplayError(String), // Message meant for the client (resolvers should hide internal errors through this)

    #[error("{0}")]
    Internal(String),
}

impl ResolverError {
    pub fn user_error_message(&self) -> Option<String> {
        match self {
            ResolverError::Forbidden { .. } => Some("Not authorized".to_string()),
            ResolverError::InvalidArgument(_) | ResolverError::UserDisplayError(_) => {
                Some(self.to_string())
            }
            ResolverError::Internal(_) => None,
        }
    }
}
