// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use schema_model::{SchemaDocument, SchemaError};
use tracing::{debug, instrument};

use crate::{error::CompositionError, stages::parse_contribution};

pub const BASE_SCHEMA_CONTRIBUTOR: &str = "the base schema";

/// Build the starting schema from the merged base type definitions.
///
/// References to undefined types are only checked once the pipeline has run, since the base
/// definitions may refer to types the pipeline generates (such as `ErrorCode` or `Permission`).
#[instrument(skip_all)]
pub fn build_base_schema(type_defs: &str) -> Result<SchemaDocument, CompositionError> {
    let document = parse_contribution(BASE_SCHEMA_CONTRIBUTOR, type_defs)?;

    let schema = SchemaDocument::from_service_document(document).map_err(|source| match source {
        SchemaError::DuplicateType(type_name) => CompositionError::DuplicateType {
            type_name,
            first: BASE_SCHEMA_CONTRIBUTOR.to_string(),
            second: BASE_SCHEMA_CONTRIBUTOR.to_string(),
        },
        source => CompositionError::InvalidContribution {
            contributor: BASE_SCHEMA_CONTRIBUTOR.to_string(),
            source,
        },
    })?;

    let query_type_name = schema.query_type_name();
    if !schema.has_type(query_type_name) {
        return Err(CompositionError::InvalidContribution {
            contributor: BASE_SCHEMA_CONTRIBUTOR.to_string(),
            source: SchemaError::MissingQueryRoot(query_type_name.to_string()),
        });
    }

    debug!(
        types = schema.type_definitions().count(),
        "Built base schema"
    );
    Ok(schema)
}
