// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Sorting, filtering and paging inputs for paginated lists.
//!
//! A type is listable when it implements `PaginatedList` and its `items` field is a list of an
//! object type. For `ProductList` (with `items: [Product!]!`) this generates:
//!
//! ```graphql
//! input ProductListOptions {
//!   skip: Int
//!   take: Int
//!   sort: ProductSortParameter
//!   filter: ProductFilterParameter
//!   filterOperator: LogicalOperator
//! }
//! ```
//!
//! along with the sort and filter parameters, and adds an `options` argument to the query fields
//! that return the list.

use async_graphql_parser::types::{TypeKind, TypeSystemDefinition};
use schema_model::{
    SchemaDocument,
    type_normalization::{
        TypeDefinitionIntrospection, input_object_type_definition, input_value_definition,
        is_list, list_type, named_type, underlying_type,
    },
};
use tracing::debug;

use crate::{
    error::CompositionError,
    stages::{StageResultExt, parse_contribution},
};

const STAGE: &str = "list options";

pub const PAGINATED_LIST_INTERFACE: &str = "PaginatedList";
pub const SORT_ORDER_ENUM: &str = "SortOrder";
pub const LOGICAL_OPERATOR_ENUM: &str = "LogicalOperator";

const ALWAYS_PRESENT_TYPES: &str = r#"
scalar DateTime

enum SortOrder {
  ASC
  DESC
}

enum LogicalOperator {
  AND
  OR
}

input StringOperators {
  eq: String
  notEq: String
  contains: String
  notContains: String
  in: [String!]
  notIn: [String!]
  regex: String
  isNull: Boolean
}

input IDOperators {
  eq: String
  notEq: String
  in: [String!]
  notIn: [String!]
  isNull: Boolean
}

input BooleanOperators {
  eq: Boolean
  isNull: Boolean
}

input NumberRange {
  start: Float!
  end: Float!
}

input NumberOperators {
  eq: Float
  lt: Float
  lte: Float
  gt: Float
  gte: Float
  between: NumberRange
  isNull: Boolean
}

input DateRange {
  start: DateTime!
  end: DateTime!
}

input DateOperators {
  eq: DateTime
  before: DateTime
  after: DateTime
  between: DateRange
  isNull: Boolean
}
"#;

/// The operator input used to filter on a field of the given scalar type.
pub(crate) fn filter_operators_for(type_name: &str) -> Option<&'static str> {
    match type_name {
        "String" => Some("StringOperators"),
        "ID" => Some("IDOperators"),
        "Int" | "Float" => Some("NumberOperators"),
        "Boolean" => Some("BooleanOperators"),
        "DateTime" => Some("DateOperators"),
        _ => None,
    }
}

pub(crate) fn is_sortable(type_name: &str) -> bool {
    matches!(type_name, "String" | "ID" | "Int" | "Float" | "DateTime")
}

pub fn generate_list_options(schema: SchemaDocument) -> Result<SchemaDocument, CompositionError> {
    let mut schema = with_always_present_types(schema)?;

    let listables: Vec<(String, String)> = schema
        .type_definitions()
        .filter(|td| matches!(td.kind, TypeKind::Object(_)) && td.implements(PAGINATED_LIST_INTERFACE))
        .filter_map(|td| {
            let items = td.field("items")?;
            if !is_list(&items.ty.node) {
                return None;
            }
            let item_type = underlying_type(&items.ty.node).as_str();
            schema
                .get_type(item_type)
                .filter(|item| matches!(item.kind, TypeKind::Object(_)))
                .map(|_| (td.name().to_string(), item_type.to_string()))
        })
        .collect();

    for (list_type_name, item_type_name) in listables {
        debug!(list = %list_type_name, "Generating list options");
        schema = with_list_options(schema, &list_type_name, &item_type_name)?;
    }

    Ok(schema)
}

fn with_always_present_types(schema: SchemaDocument) -> Result<SchemaDocument, CompositionError> {
    let document = parse_contribution(STAGE, ALWAYS_PRESENT_TYPES)?;

    Ok(document
        .definitions
        .into_iter()
        .fold(schema, |schema, definition| match definition {
            TypeSystemDefinition::Type(typ) => schema.with_type_if_absent(typ.node),
            _ => schema,
        }))
}

fn with_list_options(
    schema: SchemaDocument,
    list_type_name: &str,
    item_type_name: &str,
) -> Result<SchemaDocument, CompositionError> {
    let sort_type_name = format!("{item_type_name}SortParameter");
    let filter_type_name = format!("{item_type_name}FilterParameter");
    let options_type_name = format!("{list_type_name}Options");

    // Plain (argument-less, non-list) fields of the item type, with their type name
    let scalar_fields: Vec<(String, String)> = schema
        .get_type(item_type_name)
        .and_then(|item| item.fields())
        .into_iter()
        .flatten()
        .map(|field| &field.node)
        .filter(|field| field.arguments.is_empty() && !is_list(&field.ty.node))
        .map(|field| {
            (
                field.name.node.to_string(),
                underlying_type(&field.ty.node).to_string(),
            )
        })
        .collect();

    let sort_fields: Vec<_> = scalar_fields
        .iter()
        .filter(|(_, type_name)| is_sortable(type_name))
        .map(|(name, _)| input_value_definition(name, named_type(SORT_ORDER_ENUM, true), None))
        .collect();

    let filter_fields: Vec<_> = scalar_fields
        .iter()
        .filter_map(|(name, type_name)| {
            let operators = filter_operators_for(type_name).or_else(|| {
                schema
                    .get_type(type_name)
                    .filter(|td| matches!(td.kind, TypeKind::Enum(_)))
                    .map(|_| "StringOperators")
            })?;
            Some(input_value_definition(name, named_type(operators, true), None))
        })
        .chain(["_and", "_or"].map(|name| {
            input_value_definition(name, list_type(&filter_type_name, false, true), None)
        }))
        .collect();

    let has_sort = !sort_fields.is_empty() || schema.has_type(&sort_type_name);

    let mut schema = schema.with_type_if_absent(input_object_type_definition(
        &filter_type_name,
        None,
        filter_fields,
    ));
    if !sort_fields.is_empty() {
        schema = schema.with_type_if_absent(input_object_type_definition(
            &sort_type_name,
            None,
            sort_fields,
        ));
    }

    let mut option_fields = vec![
        input_value_definition("skip", named_type("Int", true), None),
        input_value_definition("take", named_type("Int", true), None),
    ];
    if has_sort {
        option_fields.push(input_value_definition(
            "sort",
            named_type(&sort_type_name, true),
            None,
        ));
    }
    option_fields.push(input_value_definition(
        "filter",
        named_type(&filter_type_name, true),
        Some("Allows the results to be filtered"),
    ));
    option_fields.push(input_value_definition(
        "filterOperator",
        named_type(LOGICAL_OPERATOR_ENUM, true),
        Some("Specifies whether multiple top-level \"filter\" fields should be combined with a logical AND or OR operation. Defaults to AND."),
    ));

    let declared_fields: Option<Vec<String>> =
        schema.get_type(&options_type_name).map(|existing| {
            existing
                .input_fields()
                .into_iter()
                .flatten()
                .map(|f| f.node.name.node.to_string())
                .collect()
        });

    match declared_fields {
        None => {
            schema = schema
                .with_type(input_object_type_definition(
                    &options_type_name,
                    None,
                    option_fields,
                ))
                .in_stage(STAGE)?;
        }
        Some(declared_fields) => {
            for field in option_fields {
                if declared_fields.iter().any(|f| f == field.node.name.node.as_str()) {
                    continue;
                }
                schema = schema
                    .with_input_field(&options_type_name, field)
                    .in_stage(STAGE)?;
            }
        }
    }

    let query_type_name = schema.query_type_name().to_string();
    let fields_without_options: Vec<String> = schema
        .get_type(&query_type_name)
        .and_then(|query| query.fields())
        .into_iter()
        .flatten()
        .map(|field| &field.node)
        .filter(|field| {
            !is_list(&field.ty.node)
                && underlying_type(&field.ty.node).as_str() == list_type_name
                && !field
                    .arguments
                    .iter()
                    .any(|a| a.node.name.node.as_str() == "options")
        })
        .map(|field| field.name.node.to_string())
        .collect();

    for field_name in fields_without_options {
        schema = schema
            .with_field_argument(
                &query_type_name,
                &field_name,
                input_value_definition("options", named_type(&options_type_name, true), None),
            )
            .in_stage(STAGE)?;
    }

    Ok(schema)
}
