// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use schema_model::{SchemaDocument, SchemaError};
use tracing::{debug, warn};

use crate::{
    base::BASE_SCHEMA_CONTRIBUTOR,
    error::CompositionError,
    stages::{defined_type_names, parse_contribution},
};

/// SDL contributed to a surface by a plugin.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaExtension {
    pub contributor: String,
    pub sdl: String,
}

impl SchemaExtension {
    pub fn new(contributor: impl Into<String>, sdl: impl Into<String>) -> Self {
        Self {
            contributor: contributor.into(),
            sdl: sdl.into(),
        }
    }
}

/// Fold plugin extensions into the schema one at a time, in registration order.
///
/// A later extension may refer to (and extend) types defined by an earlier one. Defining a type
/// that already exists is an error naming both contributors.
pub fn apply_schema_extensions(
    schema: SchemaDocument,
    extensions: &[SchemaExtension],
) -> Result<SchemaDocument, CompositionError> {
    let mut origins: HashMap<String, &str> = HashMap::new();
    let mut schema = schema;

    for extension in extensions {
        if extension.sdl.trim().is_empty() {
            warn!(contributor = %extension.contributor, "Ignoring empty schema extension");
            continue;
        }

        let document = parse_contribution(&extension.contributor, &extension.sdl)?;
        let new_types = defined_type_names(&document);

        for type_name in &new_types {
            if schema.has_type(type_name) {
                return Err(CompositionError::DuplicateType {
                    type_name: type_name.clone(),
                    first: origins
                        .get(type_name)
                        .copied()
                        .unwrap_or(BASE_SCHEMA_CONTRIBUTOR)
                        .to_string(),
                    second: extension.contributor.clone(),
                });
            }
        }

        schema = schema.extend(document).map_err(|source| match source {
            SchemaError::DuplicateType(type_name) => CompositionError::DuplicateType {
                type_name,
                first: extension.contributor.clone(),
                second: extension.contributor.clone(),
            },
            source => CompositionError::InvalidContribution {
                contributor: extension.contributor.clone(),
                source,
            },
        })?;

        for type_name in new_types {
            origins.entry(type_name).or_insert(&extension.contributor);
        }

        debug!(contributor = %extension.contributor, "Applied schema extension");
    }

    Ok(schema)
}

#[cfg(test)]
mod tests {
    use crate::build_base_schema;

    use super::*;

    fn base() -> SchemaDocument {
        build_base_schema("type Query { product: String }").unwrap()
    }

    #[test]
    fn later_extensions_build_on_earlier_ones() {
        let schema = apply_schema_extensions(
            base(),
            &[
                SchemaExtension::new("ReviewsPlugin", "type Review { body: String }"),
                SchemaExtension::new("", ""),
                SchemaExtension::new(
                    "ModerationPlugin",
                    "extend type Review { flagged: Boolean }\nextend type Query { reviews: [Review!]! }",
                ),
            ],
        )
        .unwrap();

        assert_eq!(
            schema.to_sdl(),
            "type Query {\n  product: String\n  reviews: [Review!]!\n}\n\ntype Review {\n  body: String\n  flagged: Boolean\n}\n"
        );
    }

    #[test]
    fn redefinitions_name_both_contributors() {
        let result = apply_schema_extensions(
            base(),
            &[
                SchemaExtension::new("ReviewsPlugin", "type Review { body: String }"),
                SchemaExtension::new("OtherReviewsPlugin", "type Review { text: String }"),
            ],
        );

        assert!(matches!(
            result,
            Err(CompositionError::DuplicateType { type_name, first, second })
                if type_name == "Review" && first == "ReviewsPlugin" && second == "OtherReviewsPlugin"
        ));

        let result = apply_schema_extensions(
            base(),
            &[SchemaExtension::new("QueryPlugin", "type Query { other: String }")],
        );
        assert!(matches!(
            result,
            Err(CompositionError::DuplicateType { first, .. }) if first == BASE_SCHEMA_CONTRIBUTOR
        ));
    }

    #[test]
    fn invalid_extensions_name_the_contributor() {
        let result = apply_schema_extensions(
            base(),
            &[SchemaExtension::new("BrokenPlugin", "extend type Missing { a: Int }")],
        );

        assert!(matches!(
            result,
            Err(CompositionError::InvalidContribution { contributor, source: SchemaError::ExtensionTargetMissing(_) })
                if contributor == "BrokenPlugin"
        ));
    }
}
