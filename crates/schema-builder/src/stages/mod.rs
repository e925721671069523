// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Schema transforms. Each one consumes a [SchemaDocument] and returns the rewritten document.
//!
//! [SchemaDocument]: schema_model::SchemaDocument

pub mod auth_types;
pub mod custom_fields;
pub mod error_code;
pub mod extensions;
pub mod list_options;
pub mod permission;

use async_graphql_parser::{
    parse_schema,
    types::{ServiceDocument, TypeSystemDefinition},
};
use schema_model::{SchemaDocument, SchemaError, type_normalization::scalar_type_definition};

use crate::error::CompositionError;

pub(crate) const JSON_SCALAR: &str = "JSON";
pub(crate) const DATE_TIME_SCALAR: &str = "DateTime";

pub(crate) trait StageResultExt<T> {
    fn in_stage(self, stage: &'static str) -> Result<T, CompositionError>;
}

impl<T> StageResultExt<T> for Result<T, SchemaError> {
    fn in_stage(self, stage: &'static str) -> Result<T, CompositionError> {
        self.map_err(|source| CompositionError::InvalidStage { stage, source })
    }
}

pub(crate) fn parse_contribution(
    contributor: &str,
    sdl: &str,
) -> Result<ServiceDocument, CompositionError> {
    parse_schema(sdl).map_err(|e| CompositionError::Unparsable {
        contributor: contributor.to_string(),
        message: e.to_string(),
    })
}

/// Names of the (non-extension) types a document defines.
pub(crate) fn defined_type_names(document: &ServiceDocument) -> Vec<String> {
    document
        .definitions
        .iter()
        .filter_map(|definition| match definition {
            TypeSystemDefinition::Type(typ) if !typ.node.extend => {
                Some(typ.node.name.node.to_string())
            }
            _ => None,
        })
        .collect()
}

pub(crate) fn with_json_scalar(schema: SchemaDocument) -> SchemaDocument {
    schema.with_type_if_absent(scalar_type_definition(JSON_SCALAR, None))
}
