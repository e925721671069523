// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use api_config::AuthenticationStrategy;
use schema_model::{
    SchemaDocument,
    type_normalization::{
        TypeDefinitionIntrospection, input_object_type_definition, input_value_definition,
        named_type,
    },
};
use tracing::debug;

use crate::{
    error::CompositionError,
    stages::{StageResultExt, defined_type_names, parse_contribution},
};

const STAGE: &str = "authentication types";

pub const AUTHENTICATION_INPUT: &str = "AuthenticationInput";
const AUTHENTICATE_MUTATION: &str = "authenticate";

/// Add the input types of the configured strategies, and an `AuthenticationInput` with one
/// field per strategy:
///
/// ```graphql
/// input AuthenticationInput {
///   native: NativeAuthInput
/// }
/// ```
pub fn generate_authentication_types(
    schema: SchemaDocument,
    strategies: &[AuthenticationStrategy],
) -> Result<SchemaDocument, CompositionError> {
    if strategies.is_empty() {
        return Ok(schema);
    }

    let mut schema = schema;
    for strategy in strategies {
        let contributor = format!("authentication strategy '{}'", strategy.name());
        let document = parse_contribution(&contributor, strategy.input_sdl())?;

        if let Some(type_name) = defined_type_names(&document)
            .into_iter()
            .find(|name| schema.has_type(name))
        {
            return Err(CompositionError::DuplicateType {
                type_name,
                first: "the schema".to_string(),
                second: contributor,
            });
        }

        schema = schema
            .extend(document)
            .map_err(|source| CompositionError::InvalidContribution {
                contributor: contributor.clone(),
                source,
            })?;
        debug!(strategy = strategy.name(), "Added authentication strategy input");
    }

    let strategy_fields = strategies.iter().map(|strategy| {
        input_value_definition(
            strategy.name(),
            named_type(strategy.input_type_name(), true),
            None,
        )
    });

    if schema.has_type(AUTHENTICATION_INPUT) {
        let declared: Vec<String> = schema
            .get_type(AUTHENTICATION_INPUT)
            .and_then(|input| input.input_fields())
            .into_iter()
            .flatten()
            .map(|f| f.node.name.node.to_string())
            .collect();

        for field in strategy_fields {
            if declared.iter().any(|d| d == field.node.name.node.as_str()) {
                continue;
            }
            schema = schema
                .with_input_field(AUTHENTICATION_INPUT, field)
                .in_stage(STAGE)?;
        }
    } else {
        schema = schema
            .with_type(input_object_type_definition(
                AUTHENTICATION_INPUT,
                None,
                strategy_fields.collect(),
            ))
            .in_stage(STAGE)?;
    }

    let mutation_type_name = schema.mutation_type_name().to_string();
    let needs_input = schema
        .get_type(&mutation_type_name)
        .and_then(|mutation| mutation.field(AUTHENTICATE_MUTATION))
        .map(|field| !field.arguments.iter().any(|a| a.node.name.node.as_str() == "input"))
        .unwrap_or(false);

    if needs_input {
        schema = schema
            .with_field_argument(
                &mutation_type_name,
                AUTHENTICATE_MUTATION,
                input_value_definition("input", named_type(AUTHENTICATION_INPUT, false), None),
            )
            .in_stage(STAGE)?;
    }

    Ok(schema)
}

#[cfg(test)]
mod tests {
    use schema_model::printer::print_type_definition;

    use crate::build_base_schema;

    use super::*;

    fn base() -> SchemaDocument {
        build_base_schema(
            "type Query { me: String }\ntype Mutation { authenticate(rememberMe: Boolean): String }",
        )
        .unwrap()
    }

    #[test]
    fn one_field_per_strategy() {
        let strategies = vec![
            AuthenticationStrategy::native(),
            AuthenticationStrategy::new("google", "input GoogleAuthInput { token: String! }")
                .unwrap(),
        ];

        let schema = generate_authentication_types(base(), &strategies).unwrap();

        assert_eq!(
            print_type_definition(schema.get_type(AUTHENTICATION_INPUT).unwrap()),
            "input AuthenticationInput {\n  native: NativeAuthInput\n  google: GoogleAuthInput\n}"
        );
        assert!(schema.has_type("NativeAuthInput"));
        assert!(schema.has_type("GoogleAuthInput"));

        let authenticate = schema
            .get_type("Mutation")
            .unwrap()
            .field("authenticate")
            .unwrap()
            .clone();
        let arguments: Vec<_> = authenticate
            .arguments
            .iter()
            .map(|a| format!("{}: {}", a.node.name.node, a.node.ty.node))
            .collect();
        assert_eq!(
            arguments,
            vec!["rememberMe: Boolean", "input: AuthenticationInput!"]
        );
    }

    #[test]
    fn strategy_types_must_not_collide() {
        let strategies = vec![
            AuthenticationStrategy::new("token", "input Query { token: String! }").unwrap(),
        ];

        assert!(matches!(
            generate_authentication_types(base(), &strategies),
            Err(CompositionError::DuplicateType { type_name, .. }) if type_name == "Query"
        ));
    }

    #[test]
    fn no_strategies_leave_the_schema_alone() {
        let schema = generate_authentication_types(base(), &[]).unwrap();
        assert_eq!(schema.to_sdl(), base().to_sdl());
    }
}
