// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The ordered sequence of schema transforms applied to a surface's base schema.
//!
//! Order matters: the error code enum must see the error types contributed by plugin extensions,
//! and the permission enum comes last so that it sees every type that may refer to it.

use api_config::{AuthenticationStrategy, CustomFields, PermissionDefinition};
use common::ApiSurface;
use schema_model::SchemaDocument;
use tracing::{debug, info, instrument};

use crate::{
    error::CompositionError,
    stages::{
        auth_types::generate_authentication_types,
        custom_fields::{
            add_active_administrator_custom_fields, add_graphql_custom_fields,
            add_modify_order_custom_fields, add_order_line_custom_fields_input,
            add_register_customer_custom_fields_input, add_server_config_custom_fields,
        },
        error_code::generate_error_code_enum,
        extensions::{SchemaExtension, apply_schema_extensions},
        list_options::generate_list_options,
        permission::generate_permission_enum,
    },
};

/// Everything the transforms read besides the schema itself.
pub struct PipelineContext<'a> {
    pub surface: ApiSurface,
    pub extensions: &'a [SchemaExtension],
    pub custom_fields: &'a CustomFields,
    pub authentication_strategies: &'a [AuthenticationStrategy],
    pub built_in_permissions: &'a [PermissionDefinition],
    pub custom_permissions: &'a [PermissionDefinition],
}

type Transform = fn(SchemaDocument, &PipelineContext) -> Result<SchemaDocument, CompositionError>;

struct Stage {
    name: &'static str,
    surfaces: &'static [ApiSurface],
    transform: Transform,
}

const BOTH: &[ApiSurface] = &[ApiSurface::Shop, ApiSurface::Admin];
const ADMIN: &[ApiSurface] = &[ApiSurface::Admin];
const SHOP: &[ApiSurface] = &[ApiSurface::Shop];

const STAGES: [Stage; 11] = [
    Stage {
        name: "schema extensions",
        surfaces: BOTH,
        transform: |schema, context| apply_schema_extensions(schema, context.extensions),
    },
    Stage {
        name: "list options",
        surfaces: BOTH,
        transform: |schema, _| generate_list_options(schema),
    },
    Stage {
        name: "custom fields",
        surfaces: BOTH,
        transform: |schema, context| {
            add_graphql_custom_fields(schema, context.custom_fields, context.surface)
        },
    },
    Stage {
        name: "order line custom fields",
        surfaces: BOTH,
        transform: |schema, context| {
            add_order_line_custom_fields_input(
                schema,
                context.custom_fields.for_entity("OrderLine"),
                context.surface,
            )
        },
    },
    Stage {
        name: "modify order custom fields",
        surfaces: BOTH,
        transform: |schema, context| {
            add_modify_order_custom_fields(
                schema,
                context.custom_fields.for_entity("Order"),
                context.surface,
            )
        },
    },
    Stage {
        name: "authentication types",
        surfaces: BOTH,
        transform: |schema, context| {
            generate_authentication_types(schema, context.authentication_strategies)
        },
    },
    Stage {
        name: "error code enum",
        surfaces: BOTH,
        transform: |schema, _| Ok(generate_error_code_enum(schema)),
    },
    Stage {
        name: "server config custom fields",
        surfaces: ADMIN,
        transform: |schema, context| add_server_config_custom_fields(schema, context.custom_fields),
    },
    Stage {
        name: "active administrator custom fields",
        surfaces: ADMIN,
        transform: |schema, context| {
            add_active_administrator_custom_fields(
                schema,
                context.custom_fields.for_entity("Administrator"),
            )
        },
    },
    Stage {
        name: "register customer custom fields",
        surfaces: SHOP,
        transform: |schema, context| {
            add_register_customer_custom_fields_input(
                schema,
                context.custom_fields.for_entity("Customer"),
            )
        },
    },
    Stage {
        name: "permission enum",
        surfaces: BOTH,
        transform: |schema, context| {
            Ok(generate_permission_enum(
                schema,
                context.built_in_permissions,
                context.custom_permissions,
            ))
        },
    },
];

/// Names of the stages that run for `surface`, in order.
pub fn stage_names(surface: ApiSurface) -> Vec<&'static str> {
    STAGES
        .iter()
        .filter(|stage| stage.surfaces.contains(&surface))
        .map(|stage| stage.name)
        .collect()
}

/// Run every stage for the context's surface, then check that the result is a complete schema.
#[instrument(skip_all, fields(surface = %context.surface))]
pub fn run_pipeline(
    schema: SchemaDocument,
    context: &PipelineContext,
) -> Result<SchemaDocument, CompositionError> {
    let mut schema = schema;

    for stage in STAGES
        .iter()
        .filter(|stage| stage.surfaces.contains(&context.surface))
    {
        debug!(stage = stage.name, "Running schema transform");
        schema = (stage.transform)(schema, context)?;
    }

    schema.validate().map_err(CompositionError::InvalidSchema)?;

    info!(
        types = schema.type_definitions().count(),
        "Composed schema"
    );
    Ok(schema)
}
