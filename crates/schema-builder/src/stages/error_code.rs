// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::TypeKind;
use heck::ToShoutySnakeCase;
use schema_model::{
    SchemaDocument,
    type_normalization::{TypeDefinitionIntrospection, enum_type_definition},
};
use tracing::debug;

pub const ERROR_RESULT_INTERFACE: &str = "ErrorResult";
pub const ERROR_CODE_ENUM: &str = "ErrorCode";
pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";

/// (Re)define `ErrorCode` with a member for every object type implementing `ErrorResult`
/// (`InsufficientStockError` becomes `INSUFFICIENT_STOCK_ERROR`), after `UNKNOWN_ERROR`.
pub fn generate_error_code_enum(schema: SchemaDocument) -> SchemaDocument {
    let mut codes = vec![UNKNOWN_ERROR.to_string()];
    for definition in schema.type_definitions() {
        if matches!(definition.kind, TypeKind::Object(_))
            && definition.implements(ERROR_RESULT_INTERFACE)
        {
            let code = definition.name().to_shouty_snake_case();
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
    }

    debug!(count = codes.len(), "Generated error codes");

    let error_code = enum_type_definition(
        ERROR_CODE_ENUM,
        None,
        codes.iter().map(|code| (code.as_str(), None)),
    );
    schema.replacing_type(error_code)
}
